//! JSON text entry points.
//!
//! Thin wrappers over the typed operations for callers holding raw JSON documents. The version
//! tag is checked before any input is parsed, so an unsupported tag never reports a parse error.

use crate::warnings::TracingSink;
use crate::{ConversionResult, Converter};
use fhir::r4::{Questionnaire, QuestionnaireResponse};
use surveyjs::{Survey, SurveyResponse};

/// Convert SurveyJS survey JSON into FHIR `Questionnaire` JSON.
pub fn survey_to_questionnaire(survey_json: &str, version: &str) -> ConversionResult<String> {
    let converter = Converter::for_version(version)?;
    let survey = Survey::parse(survey_json)?;
    let questionnaire = converter.survey_to_questionnaire(&survey, &mut TracingSink);
    Ok(questionnaire.render()?)
}

/// Convert FHIR `Questionnaire` JSON into SurveyJS survey JSON.
pub fn questionnaire_to_survey(questionnaire_json: &str, version: &str) -> ConversionResult<String> {
    let converter = Converter::for_version(version)?;
    let questionnaire = Questionnaire::parse(questionnaire_json)?;
    let survey = converter.questionnaire_to_survey(&questionnaire, &mut TracingSink);
    Ok(Survey::render(&survey)?)
}

/// Answer FHIR `Questionnaire` JSON from SurveyJS response JSON.
pub fn survey_response_to_questionnaire_response(
    questionnaire_json: &str,
    response_json: &str,
    version: &str,
) -> ConversionResult<String> {
    let converter = Converter::for_version(version)?;
    let questionnaire = Questionnaire::parse(questionnaire_json)?;
    let responses = SurveyResponse::parse(response_json)?;
    let response = converter.survey_response_to_questionnaire_response(
        &questionnaire,
        &responses,
        &mut TracingSink,
    );
    Ok(response.render()?)
}

/// Flatten FHIR `QuestionnaireResponse` JSON into SurveyJS response JSON.
pub fn questionnaire_response_to_survey_response(
    response_json: &str,
    version: &str,
) -> ConversionResult<String> {
    let converter = Converter::for_version(version)?;
    let response = QuestionnaireResponse::parse(response_json)?;
    let responses = converter.questionnaire_response_to_survey_response(&response, &mut TracingSink);
    Ok(SurveyResponse::render(&responses)?)
}
