//! Converter configuration.
//!
//! Configuration is resolved once by the caller and passed into [`crate::Converter`]. The
//! converter itself never reads the environment, so two converters with different settings can
//! run side by side.

use crate::constants::{DEFAULT_FILE_MAX_SIZE, LATEST_FHIR};
use crate::ConversionResult;
use fhir::FhirVersion;

/// Converter configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
    fhir_version: FhirVersion,
    default_file_max_size: u64,
}

impl ConverterConfig {
    /// Create a configuration targeting `fhir_version` with default settings.
    pub fn new(fhir_version: FhirVersion) -> Self {
        Self {
            fhir_version,
            default_file_max_size: DEFAULT_FILE_MAX_SIZE,
        }
    }

    /// Set the `maxSize` given to `file` elements rebuilt from FHIR attachments.
    pub fn with_default_file_max_size(mut self, max_size: u64) -> Self {
        self.default_file_max_size = max_size;
        self
    }

    pub fn fhir_version(&self) -> FhirVersion {
        self.fhir_version
    }

    pub fn default_file_max_size(&self) -> u64 {
        self.default_file_max_size
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(LATEST_FHIR)
    }
}

/// Parse the FHIR version from an optional string value (for example an environment variable).
///
/// If `value` is `None` or empty/whitespace, returns the latest supported version.
///
/// # Errors
///
/// Returns [`crate::ConversionError::UnsupportedVersion`] for any other unknown tag.
pub fn fhir_version_from_env_value(value: Option<String>) -> ConversionResult<FhirVersion> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<FhirVersion>()).transpose()?;

    Ok(parsed.unwrap_or(LATEST_FHIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionError;

    #[test]
    fn defaults_to_latest_version() {
        let config = ConverterConfig::default();
        assert_eq!(config.fhir_version(), FhirVersion::R4);
        assert_eq!(config.default_file_max_size(), 0);
    }

    #[test]
    fn builder_overrides_file_max_size() {
        let config = ConverterConfig::new(FhirVersion::R4).with_default_file_max_size(2048);
        assert_eq!(config.default_file_max_size(), 2048);
    }

    #[test]
    fn env_value_blank_means_latest() {
        assert_eq!(
            fhir_version_from_env_value(None).expect("latest"),
            FhirVersion::R4
        );
        assert_eq!(
            fhir_version_from_env_value(Some("  ".into())).expect("latest"),
            FhirVersion::R4
        );
        assert_eq!(
            fhir_version_from_env_value(Some(" R4 ".into())).expect("trimmed"),
            FhirVersion::R4
        );
    }

    #[test]
    fn env_value_rejects_unknown_versions() {
        let err = fhir_version_from_env_value(Some("R5".into())).expect_err("should reject");
        assert!(matches!(err, ConversionError::UnsupportedVersion(v) if v == "R5"));
    }
}
