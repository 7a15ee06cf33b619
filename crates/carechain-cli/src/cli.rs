use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "carechain",
    about = "CareChain — append-only clinical record chain on a plain directory",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the store directory to operate on.
    #[arg(long, global = true, default_value = ".")]
    pub store: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new record store with its genesis record
    Init(InitArgs),
    /// Append a new record entry to the chain
    Entry(EntryArgs),
    /// Read one stored record and print it
    Read(ReadArgs),
    /// List the chain in order
    Log(LogArgs),
    /// Verify chain integrity across the whole store
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Name of the store; also used as the directory name.
    pub name: String,
}

#[derive(Args)]
pub struct EntryArgs {
    /// Free-text contents of the entry.
    pub text: String,
    /// Record category: encounter, medications, or allergies.
    #[arg(short, long, default_value = "encounter")]
    pub kind: String,
    /// Author recorded in the entry metadata.
    #[arg(short, long, default_value = "PLACEHOLDER")]
    pub author: String,
}

#[derive(Args)]
pub struct ReadArgs {
    /// Filename of the record to read.
    pub filename: String,
}

#[derive(Args)]
pub struct LogArgs {}

#[derive(Args)]
pub struct VerifyArgs {}
