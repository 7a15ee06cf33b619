use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Closed set of clinical record categories.
///
/// Resolution from a name is a plain total lookup ([`FromStr`], case
/// insensitive); unknown names are rejected rather than resolved
/// dynamically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Encounter,
    Medications,
    Allergies,
}

impl RecordKind {
    /// All record kinds, in declaration order.
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Encounter,
        RecordKind::Medications,
        RecordKind::Allergies,
    ];

    /// The canonical upper-case name, as written into the `tags` metadata.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Encounter => "ENCOUNTER",
            RecordKind::Medications => "MEDICATIONS",
            RecordKind::Allergies => "ALLERGIES",
        }
    }
}

impl Default for RecordKind {
    fn default() -> Self {
        RecordKind::Encounter
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENCOUNTER" => Ok(RecordKind::Encounter),
            "MEDICATIONS" => Ok(RecordKind::Medications),
            "ALLERGIES" => Ok(RecordKind::Allergies),
            other => Err(TypeError::UnknownRecordKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrips_through_from_str() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.name().parse::<RecordKind>().unwrap(), kind);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(
            "encounter".parse::<RecordKind>().unwrap(),
            RecordKind::Encounter
        );
        assert_eq!(
            "Medications".parse::<RecordKind>().unwrap(),
            RecordKind::Medications
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "IMAGING".parse::<RecordKind>().unwrap_err();
        assert_eq!(err, TypeError::UnknownRecordKind("IMAGING".to_string()));
    }

    #[test]
    fn default_is_encounter() {
        assert_eq!(RecordKind::default(), RecordKind::Encounter);
    }
}
