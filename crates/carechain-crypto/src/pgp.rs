use std::fmt;

/// First line of a record's trailing signature section.
pub const SIGNATURE_BEGIN_MARKER: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----";

/// Last line of a record's trailing signature section.
pub const SIGNATURE_END_MARKER: &str = "-----END PGP PUBLIC KEY BLOCK-----";

/// Opaque PGP-armored text standing in for a real detached signature.
///
/// The codec only ever locates the begin marker to know where a record's
/// body ends; everything from the marker to end of file is carried verbatim.
/// Validating the armored content is explicitly out of scope.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    text: String,
}

impl SignatureBlock {
    /// Wrap existing armored text, e.g. recovered by the codec.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Placeholder block attached to newly created records until real key
    /// management lands.
    pub fn placeholder() -> Self {
        let lines = [
            SIGNATURE_BEGIN_MARKER,
            "THIS IS A PLACEHOLDER PGP PUBLIC KEY",
            "mQINBFRUAGoBEACuk6ze2V2pZtScf1Ul25N2CX19AeL7sVYwnyrTYuWdG2FmJx4x",
            "=nUop",
            SIGNATURE_END_MARKER,
        ];
        Self {
            text: lines.join("\n"),
        }
    }

    /// The full armored text, markers included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if a line opens a signature section.
    ///
    /// Matching is exact: a truncated or padded marker never matches.
    pub fn is_begin_marker(line: &str) -> bool {
        line == SIGNATURE_BEGIN_MARKER
    }
}

impl fmt::Debug for SignatureBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureBlock")
            .field("lines", &self.text.lines().count())
            .finish()
    }
}

impl fmt::Display for SignatureBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
