//! FHIR wire/boundary support for questionnaire conversion.
//!
//! This crate provides **wire models** and **parse/render helpers** for the FHIR resources the
//! converter reads and writes:
//! - `Questionnaire` (a tree of typed items)
//! - `QuestionnaireResponse` (the same tree carrying typed answers)
//!
//! Unlike the `surveyjs` crate, this crate is version-aware: each supported FHIR release has its
//! own module (currently only [`r4`]) and callers select one through [`FhirVersion`].

pub mod r4;
pub mod version;

pub use version::{FhirVersion, LATEST_FHIR};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("FHIR version not implemented: {0}")]
    UnsupportedVersion(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Deserialize `T` from JSON text, reporting the path of the first mismatching field.
pub(crate) fn parse_with_path<T>(json_text: &str, what: &str) -> FhirResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(parsed) => {
            deserializer.end()?;
            Ok(parsed)
        }
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(FhirError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}
