use carechain_crypto::SignatureBlock;

use crate::error::{CodecResult, FormatError};
use crate::metadata::{split_metadata_line, MetadataBlock, METADATA_DELIMITER};
use crate::record::DocumentRecord;

/// Decoder position within a stored record.
///
/// The decoder is an explicit line-oriented state machine rather than a
/// pattern match over the whole file: every boundary is a single exact line
/// comparison, so a delimiter-looking line inside the body can never close
/// the metadata section, and a signature marker is only recognized once the
/// body has begun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecodeState {
    /// Before the opening metadata delimiter. Only the first line is read
    /// in this state; anything but the delimiter is a format error.
    BeforeMetadata,
    /// Inside the metadata block, collecting `key:value` lines until the
    /// closing delimiter.
    InMetadata,
    /// Between the metadata close and the signature begin-marker.
    InBody,
    /// From the begin-marker through end of input.
    InSignature,
}

/// Composes a [`DocumentRecord`] into its on-disk byte layout and back.
pub struct RecordCodec;

impl RecordCodec {
    /// Encode a record: metadata block, body, and signature block, each
    /// separated by a blank line, with a trailing newline.
    pub fn encode(record: &DocumentRecord) -> String {
        let sections = [
            record.metadata().to_block_string(),
            record.body_text(),
            record.signature().text().to_string(),
        ];
        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }

    /// Decode a stored record from its raw text.
    ///
    /// The input must start with the metadata delimiter line. The body is
    /// every line strictly between the metadata close and the signature
    /// begin-marker, with leading and trailing blank lines trimmed; the
    /// signature is everything from the begin-marker to end of input. A
    /// missing trailing newline is accepted.
    pub fn decode(raw: &str) -> CodecResult<DocumentRecord> {
        let mut state = DecodeState::BeforeMetadata;
        let mut metadata = MetadataBlock::new();
        let mut body: Vec<String> = Vec::new();
        let mut signature_lines: Vec<&str> = Vec::new();

        for line in raw.lines() {
            match state {
                DecodeState::BeforeMetadata => {
                    if line != METADATA_DELIMITER {
                        return Err(FormatError::MissingOpeningDelimiter);
                    }
                    state = DecodeState::InMetadata;
                }
                DecodeState::InMetadata => {
                    if line == METADATA_DELIMITER {
                        state = DecodeState::InBody;
                    } else {
                        let (key, value) = split_metadata_line(line);
                        metadata.insert(key, value);
                    }
                }
                DecodeState::InBody => {
                    if SignatureBlock::is_begin_marker(line) {
                        signature_lines.push(line);
                        state = DecodeState::InSignature;
                    } else {
                        body.push(line.to_string());
                    }
                }
                DecodeState::InSignature => {
                    signature_lines.push(line);
                }
            }
        }

        match state {
            DecodeState::BeforeMetadata => Err(FormatError::MissingOpeningDelimiter),
            DecodeState::InMetadata => Err(FormatError::UnterminatedMetadata),
            DecodeState::InBody => Err(FormatError::MissingSignature),
            DecodeState::InSignature => {
                trim_blank_edges(&mut body);
                let signature = SignatureBlock::from_text(signature_lines.join("\n"));
                Ok(DocumentRecord::from_parts(metadata, body, signature))
            }
        }
    }
}

/// Drop leading and trailing blank lines; interior blank lines are body
/// content and stay.
fn trim_blank_edges(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let lead = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..lead);
}
