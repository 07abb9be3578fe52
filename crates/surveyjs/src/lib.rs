//! SurveyJS wire/boundary support.
//!
//! This crate provides **wire models** and **parse/render helpers** for the SurveyJS
//! survey-authoring JSON format:
//! - survey definitions (pages containing typed input elements)
//! - flat survey responses (element name to answer)
//!
//! It knows nothing about FHIR. Translation between the two formats lives in
//! `survey-fhir-core`, which depends on this crate and on `fhir`.
//!
//! The models are deliberately permissive: SurveyJS emits many presentation fields this
//! crate does not model, and they are ignored on input rather than rejected.

pub mod response;
pub mod survey;

// Re-export facades
pub use response::SurveyResponse;
pub use survey::Survey;

// Re-export public wire types
pub use response::{comment_key, FileDescriptor, FlatResponseMap, COMMENT_SUFFIX};
pub use survey::{Choice, ElementKind, InputType, SurveyDocument, SurveyElement, SurveyPage};

/// Errors returned by the `surveyjs` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum SurveyJsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`SurveyJsError`].
pub type SurveyJsResult<T> = Result<T, SurveyJsError>;

/// Deserialize `T` from JSON text, reporting the path of the first mismatching field.
pub(crate) fn parse_with_path<T>(json_text: &str, what: &str) -> SurveyJsResult<T>
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
            Err(SurveyJsError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
