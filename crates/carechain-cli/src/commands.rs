use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;

use carechain_chain::{ChainLinker, ChainVerifier};
use carechain_codec::{DocumentRecord, RecordCodec, KEY_CREATED_BY, KEY_HASH, KEY_TAGS};
use carechain_store::{DirStore, RecordStore, StoreState, GENESIS_FILE};
use carechain_types::{Clock, RecordKind, SystemClock};

use crate::cli::{Cli, Command, EntryArgs, InitArgs, ReadArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => cmd_init(&cli.store, args),
        Command::Entry(args) => cmd_entry(&cli.store, args),
        Command::Read(args) => cmd_read(&cli.store, args),
        Command::Log(_) => cmd_log(&cli.store),
        Command::Verify(_) => cmd_verify(&cli.store),
    }
}

fn open_store(path: &str) -> anyhow::Result<DirStore> {
    if !Path::new(path).is_dir() {
        bail!("no record store at {path}");
    }
    Ok(DirStore::open(path))
}

fn cmd_init(base: &str, args: InitArgs) -> anyhow::Result<()> {
    let root = Path::new(base).join(&args.name);
    if root.exists() {
        bail!("already exists: {}", root.display());
    }
    let store = DirStore::create(&root)?;
    store.write_state(&StoreState::new(&args.name))?;

    let mut genesis = DocumentRecord::new(RecordKind::Encounter, "system", SystemClock.now());
    genesis.add_line(format!("Record store created: {}", args.name));
    let hash = ChainLinker::new(&store).genesis(&mut genesis)?;

    println!(
        "{} Initialized record store at {}",
        "✓".green().bold(),
        root.display().to_string().bold()
    );
    println!("  Genesis: {} ({})", GENESIS_FILE, hash.short_hex().yellow());
    Ok(())
}

fn cmd_entry(store_path: &str, args: EntryArgs) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let kind: RecordKind = args
        .kind
        .parse()
        .with_context(|| format!("invalid --kind {:?}", args.kind))?;

    let mut record = DocumentRecord::new(kind, &args.author, SystemClock.now());
    record.add_lines(args.text.lines());
    let hash = ChainLinker::new(&store).append(&mut record)?;

    println!(
        "{} Appended {} entry {}",
        "✓".green().bold(),
        kind.name().cyan(),
        record.filename().bold()
    );
    println!("  hash: {}", hash.short_hex().yellow());
    if let Some(prev) = record.prev_hash() {
        println!("  prev: {}", short(prev).yellow());
    }
    Ok(())
}

fn cmd_read(store_path: &str, args: ReadArgs) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let raw = store.read_raw(&args.filename)?;
    // Decode first so corruption surfaces as an error, not garbled output.
    let record = RecordCodec::decode(&raw)
        .with_context(|| format!("record {} is corrupt", args.filename))?;

    println!("{}", args.filename.bold());
    if let Some(by) = record.metadata().get(KEY_CREATED_BY) {
        println!("  author: {by}");
    }
    println!();
    println!("{raw}");
    Ok(())
}

fn cmd_log(store_path: &str) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let names = store.list_entries()?;
    if names.is_empty() {
        println!("Empty store: no records.");
        return Ok(());
    }
    for name in names {
        let raw = store.read_raw(&name)?;
        match RecordCodec::decode(&raw) {
            Ok(record) => {
                let tags = record.metadata().get(KEY_TAGS).unwrap_or("-");
                let by = record.metadata().get(KEY_CREATED_BY).unwrap_or("-");
                let hash = record.metadata().get(KEY_HASH).unwrap_or("-");
                println!(
                    "{} {} {} {}",
                    name.bold(),
                    short(hash).yellow(),
                    tags.cyan(),
                    by
                );
            }
            Err(err) => println!("{} {}", name.bold(), format!("corrupt: {err}").red()),
        }
    }
    Ok(())
}

fn cmd_verify(store_path: &str) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let report = ChainVerifier::verify(&store)?;
    println!(
        "{} Chain intact: {} record(s) verified.",
        "✓".green().bold(),
        report.records.to_string().bold()
    );
    Ok(())
}

/// First 8 characters of a hash-like value. Stored metadata is arbitrary
/// text, so the cut must land on a char boundary.
fn short(hash: &str) -> &str {
    hash.char_indices()
        .nth(8)
        .map_or(hash, |(idx, _)| &hash[..idx])
}
