//! # Survey FHIR Core
//!
//! Conversion between SurveyJS survey documents and FHIR `Questionnaire` /
//! `QuestionnaireResponse` resources.
//!
//! The crate is a pure transform over in-memory documents: no I/O, no shared state. Wire models
//! live in the `surveyjs` and `fhir` crates; this crate holds the translation between them:
//! - [`codec`]: scalar values ⇄ FHIR `value[x]` wrappers
//! - [`mapping`]: survey elements ⇄ questionnaire leaf items
//! - [`folding`]: survey pages ⇄ questionnaire item trees
//! - [`response`]: flat survey responses ⇄ questionnaire response trees
//! - [`Converter`]: the four document-level operations
//!
//! The free functions below take the FHIR version tag as a string and report skipped
//! sub-structures through `tracing`. Use [`Converter`] directly to collect warnings instead.

pub mod codec;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod folding;
pub mod json;
pub mod mapping;
pub mod response;
pub mod warnings;

pub use config::{fhir_version_from_env_value, ConverterConfig};
pub use converter::Converter;
pub use error::{ConversionError, ConversionResult};
pub use warnings::{ConversionWarning, TracingSink, WarningSink};

use fhir::r4::{Questionnaire, QuestionnaireResponse};
use surveyjs::{FlatResponseMap, SurveyDocument};

/// Convert a survey into a questionnaire.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedVersion`] unless `version` is `"R4"`.
pub fn survey_to_questionnaire(
    survey: &SurveyDocument,
    version: &str,
) -> ConversionResult<Questionnaire> {
    let converter = Converter::for_version(version)?;
    Ok(converter.survey_to_questionnaire(survey, &mut TracingSink))
}

/// Convert a questionnaire into a survey.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedVersion`] unless `version` is `"R4"`.
pub fn questionnaire_to_survey(
    questionnaire: &Questionnaire,
    version: &str,
) -> ConversionResult<SurveyDocument> {
    let converter = Converter::for_version(version)?;
    Ok(converter.questionnaire_to_survey(questionnaire, &mut TracingSink))
}

/// Answer a questionnaire from a flat survey response.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedVersion`] unless `version` is `"R4"`.
pub fn survey_response_to_questionnaire_response(
    questionnaire: &Questionnaire,
    responses: &FlatResponseMap,
    version: &str,
) -> ConversionResult<QuestionnaireResponse> {
    let converter = Converter::for_version(version)?;
    Ok(converter.survey_response_to_questionnaire_response(
        questionnaire,
        responses,
        &mut TracingSink,
    ))
}

/// Flatten a questionnaire response into a survey response.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedVersion`] unless `version` is `"R4"`.
pub fn questionnaire_response_to_survey_response(
    response: &QuestionnaireResponse,
    version: &str,
) -> ConversionResult<FlatResponseMap> {
    let converter = Converter::for_version(version)?;
    Ok(converter.questionnaire_response_to_survey_response(response, &mut TracingSink))
}
