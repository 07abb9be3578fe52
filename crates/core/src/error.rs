//! Error types for the conversion entry points.

use fhir::FhirError;
use surveyjs::SurveyJsError;

/// Errors returned by the conversion entry points.
///
/// Only caller-visible failures live here. Sub-structures the converter cannot map are not
/// errors; they are skipped and reported as [`crate::ConversionWarning`]s.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("FHIR version not implemented: {0}")]
    UnsupportedVersion(String),

    #[error("FHIR error: {0}")]
    Fhir(FhirError),

    #[error("SurveyJS error: {0}")]
    SurveyJs(#[from] SurveyJsError),
}

impl From<FhirError> for ConversionError {
    fn from(err: FhirError) -> Self {
        match err {
            FhirError::UnsupportedVersion(version) => Self::UnsupportedVersion(version),
            other => Self::Fhir(other),
        }
    }
}

/// Type alias for Results that can fail with a [`ConversionError`].
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;
