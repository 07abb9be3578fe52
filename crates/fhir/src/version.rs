//! FHIR release selection.

use crate::FhirError;
use std::fmt;
use std::str::FromStr;

/// FHIR releases the converter can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FhirVersion {
    /// FHIR Release 4 (4.0.1).
    R4,
}

/// Latest supported FHIR release.
pub const LATEST_FHIR: FhirVersion = FhirVersion::R4;

impl FhirVersion {
    /// Returns the version tag callers pass in, e.g. `"R4"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R4 => "R4",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FhirVersion {
    type Err = FhirError;

    /// Tags are matched exactly; `"r4"` and `"4.0.1"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R4" => Ok(Self::R4),
            other => Err(FhirError::UnsupportedVersion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_r4() {
        assert_eq!("R4".parse::<FhirVersion>().expect("R4"), FhirVersion::R4);
        assert_eq!(FhirVersion::R4.to_string(), "R4");
        assert_eq!(LATEST_FHIR, FhirVersion::R4);
    }

    #[test]
    fn rejects_other_tags() {
        for tag in ["R5", "R4B", "r4", "", "STU3"] {
            let err = tag.parse::<FhirVersion>().expect_err("should reject");
            match err {
                FhirError::UnsupportedVersion(v) => assert_eq!(v, tag),
                other => panic!("expected UnsupportedVersion, got {other:?}"),
            }
        }
    }
}
