//! Conversion entry points.
//!
//! [`Converter`] assembles the tree folder, element type mapper and response packer into the
//! four document-level operations. Every operation dispatches on the configured FHIR version
//! first; sub-structures that cannot be mapped are reported through the caller's
//! [`WarningSink`] and never abort the call.

use crate::config::ConverterConfig;
use crate::folding::{fold_survey, unfold_questionnaire};
use crate::response::{pack_items, unpack_items};
use crate::warnings::WarningSink;
use crate::ConversionResult;
use fhir::r4::{Questionnaire, QuestionnaireResponse};
use fhir::FhirVersion;
use surveyjs::{FlatResponseMap, SurveyDocument};

/// Converts between SurveyJS and FHIR documents for one FHIR version.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Create a converter for the version named by `version` (for example `"R4"`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConversionError::UnsupportedVersion`] for any tag other than a supported
    /// FHIR release.
    pub fn for_version(version: &str) -> ConversionResult<Self> {
        let fhir_version = version.parse::<FhirVersion>()?;
        Ok(Self::new(ConverterConfig::new(fhir_version)))
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert a survey definition into a questionnaire, one group item per page.
    pub fn survey_to_questionnaire(
        &self,
        survey: &SurveyDocument,
        sink: &mut dyn WarningSink,
    ) -> Questionnaire {
        match self.config.fhir_version() {
            FhirVersion::R4 => {
                let questionnaire = Questionnaire::new(fold_survey(survey, sink));
                tracing::debug!(
                    pages = survey.pages.len(),
                    groups = questionnaire.item.len(),
                    "converted survey to questionnaire"
                );
                questionnaire
            }
        }
    }

    /// Convert a questionnaire into a survey definition, flattening nested groups into pages.
    pub fn questionnaire_to_survey(
        &self,
        questionnaire: &Questionnaire,
        sink: &mut dyn WarningSink,
    ) -> SurveyDocument {
        match self.config.fhir_version() {
            FhirVersion::R4 => {
                let survey = SurveyDocument {
                    pages: unfold_questionnaire(questionnaire, &self.config, sink),
                };
                tracing::debug!(
                    items = questionnaire.item.len(),
                    pages = survey.pages.len(),
                    "converted questionnaire to survey"
                );
                survey
            }
        }
    }

    /// Answer `questionnaire` from a flat survey response.
    pub fn survey_response_to_questionnaire_response(
        &self,
        questionnaire: &Questionnaire,
        responses: &FlatResponseMap,
        sink: &mut dyn WarningSink,
    ) -> QuestionnaireResponse {
        match self.config.fhir_version() {
            FhirVersion::R4 => {
                let response = QuestionnaireResponse::new(pack_items(
                    &questionnaire.item,
                    responses,
                    sink,
                ));
                tracing::debug!(
                    responses = responses.len(),
                    "converted survey response to questionnaire response"
                );
                response
            }
        }
    }

    /// Flatten a questionnaire response into a survey response.
    pub fn questionnaire_response_to_survey_response(
        &self,
        response: &QuestionnaireResponse,
        sink: &mut dyn WarningSink,
    ) -> FlatResponseMap {
        match self.config.fhir_version() {
            FhirVersion::R4 => {
                let mut responses = FlatResponseMap::new();
                unpack_items(&response.item, &mut responses, sink);
                tracing::debug!(
                    responses = responses.len(),
                    "converted questionnaire response to survey response"
                );
                responses
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::ConversionWarning;
    use crate::ConversionError;
    use serde_json::{json, Value};

    /// A survey using every supported element kind.
    fn sample_survey() -> Value {
        json!({
            "pages": [
                {
                    "name": "page1",
                    "title": "Simple Inputs",
                    "elements": [
                        {"type": "text", "name": "single-input", "title": "Single Input",
                         "defaultValue": "abc", "isRequired": true, "maxLength": 10},
                        {"type": "text", "name": "single-input-number", "inputType": "number",
                         "defaultValue": 11.22},
                        {"type": "text", "name": "single-input-date", "inputType": "date",
                         "defaultValue": "1982-11-22"},
                        {"type": "text", "name": "single-input-datetime", "inputType": "datetime"},
                        {"type": "text", "name": "single-input-time", "inputType": "time",
                         "readOnly": true},
                        {"type": "text", "name": "single-input-url", "inputType": "url",
                         "defaultValue": "http://www.github.com"},
                        {"type": "boolean", "name": "Required Boolean", "defaultValue": "true"},
                        {"type": "comment", "name": "comment", "title": "Comment"}
                    ]
                },
                {
                    "name": "page2",
                    "title": "Choices and Files",
                    "elements": [
                        {"type": "dropdown", "name": "dropdown", "defaultValue": "item2",
                         "choices": [
                             {"value": "item1", "text": "Item 1"},
                             {"value": "item2", "text": "Item 2"}
                         ]},
                        {"type": "dropdown", "name": "dropdown-with-other", "hasOther": true,
                         "choices": [
                             {"value": "item1", "text": "Item 1"},
                             {"value": "item2", "text": "Item 2"}
                         ]},
                        {"type": "file", "name": "file-uploader", "title": "Upload",
                         "maxSize": 0}
                    ]
                }
            ]
        })
    }

    fn sample_response() -> Value {
        json!({
            "single-input": "text answer",
            "single-input-number": 123,
            "single-input-date": "2019-05-01",
            "single-input-datetime": "2019-05-01T10:00:00Z",
            "single-input-time": "10:30",
            "single-input-url": "http://example.org",
            "Required Boolean": false,
            "comment": "Longer text",
            "dropdown": "item1",
            "dropdown-with-other": "other",
            "dropdown-with-other-Comment": "Other Selected!",
            "file-uploader": [
                {"name": "test_file.txt", "type": "text/plain",
                 "content": "data:text/plain;base64,dGVzdF9maWxlCg=="},
                {"name": "image.png", "type": "image/png", "content": "data:image/png;base64,iVBO"}
            ]
        })
    }

    fn survey(value: Value) -> SurveyDocument {
        serde_json::from_value(value).expect("valid survey")
    }

    #[test]
    fn survey_round_trip_on_supported_subset() {
        let converter = Converter::default();
        let mut warnings = Vec::new();
        let original = survey(sample_survey());

        let questionnaire = converter.survey_to_questionnaire(&original, &mut warnings);
        let back = converter.questionnaire_to_survey(&questionnaire, &mut warnings);

        assert_eq!(back, original);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn questionnaire_has_fixed_header() {
        let converter = Converter::default();
        let mut warnings = Vec::new();
        let questionnaire = converter.survey_to_questionnaire(&survey(sample_survey()), &mut warnings);
        let value = serde_json::to_value(&questionnaire).expect("serialize");

        assert_eq!(value["resourceType"], json!("Questionnaire"));
        assert_eq!(value["status"], json!("unknown"));
        assert_eq!(value["item"][0]["type"], json!("group"));
        assert_eq!(value["item"][0]["item"][1]["type"], json!("decimal"));
        assert_eq!(value["item"][0]["item"][1]["initial"], json!([{"valueDecimal": 11.22}]));
    }

    #[test]
    fn response_round_trip() {
        let converter = Converter::default();
        let mut warnings = Vec::new();
        let questionnaire = converter.survey_to_questionnaire(&survey(sample_survey()), &mut warnings);
        let responses: FlatResponseMap =
            serde_json::from_value(sample_response()).expect("valid response");

        let packed = converter.survey_response_to_questionnaire_response(
            &questionnaire,
            &responses,
            &mut warnings,
        );
        assert_eq!(packed.status, "completed");
        assert_eq!(packed.item.len(), 2);

        let unpacked = converter.questionnaire_response_to_survey_response(&packed, &mut warnings);
        assert_eq!(unpacked, responses);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn choice_default_survives_round_trip() {
        let converter = Converter::default();
        let mut warnings = Vec::new();
        let original = survey(json!({
            "pages": [{
                "name": "p",
                "elements": [{
                    "type": "dropdown",
                    "name": "d",
                    "defaultValue": "b",
                    "choices": [{"value": "a", "text": "A"}, {"value": "b", "text": "B"}]
                }]
            }]
        }));

        let questionnaire = converter.survey_to_questionnaire(&original, &mut warnings);
        let options = &questionnaire.item[0].item.as_ref().expect("leaf items")[0].answer_option;
        let selected: Vec<_> = options
            .iter()
            .filter(|option| option.initial_selected == Some(true))
            .filter_map(|option| option.value_coding.as_ref()?.code.as_deref())
            .collect();
        assert_eq!(selected, vec!["b"]);

        let back = converter.questionnaire_to_survey(&questionnaire, &mut warnings);
        assert_eq!(
            back.pages[0].elements[0].default_value,
            Some(json!("b"))
        );
    }

    #[test]
    fn lossy_kinds_come_back_normalised() {
        let converter = Converter::new(ConverterConfig::default().with_default_file_max_size(1024));
        let mut warnings = Vec::new();
        let original = survey(json!({
            "pages": [{
                "name": "p",
                "elements": [
                    {"type": "url", "name": "homepage", "defaultValue": "http://example.org"},
                    {"type": "file", "name": "upload"},
                    {"type": "dropdown", "name": "d", "choices": [{"value": "a"}, "b"]}
                ]
            }]
        }));

        let questionnaire = converter.survey_to_questionnaire(&original, &mut warnings);
        let back = converter.questionnaire_to_survey(&questionnaire, &mut warnings);

        assert_ne!(back, original);
        assert_eq!(
            serde_json::to_value(&back.pages[0].elements).expect("serialize"),
            json!([
                {"type": "text", "name": "homepage", "inputType": "url",
                 "defaultValue": "http://example.org"},
                {"type": "file", "name": "upload", "maxSize": 1024},
                {"type": "dropdown", "name": "d", "choices": [
                    {"value": "a", "text": "a"},
                    {"value": "b", "text": "b"}
                ]}
            ])
        );
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn empty_pages_never_reach_the_questionnaire() {
        let converter = Converter::default();
        let mut warnings = Vec::new();
        let questionnaire = converter.survey_to_questionnaire(
            &survey(json!({
                "pages": [
                    {"name": "empty", "elements": []},
                    {"name": "unsupported", "elements": [{"type": "rating", "name": "r"}]}
                ]
            })),
            &mut warnings,
        );

        assert!(questionnaire.item.is_empty());
        assert_eq!(warnings.len(), 3);
        assert!(matches!(warnings[0], ConversionWarning::EmptyPage { .. }));
    }

    #[test]
    fn unknown_versions_are_rejected() {
        for version in ["R5", "r4", "STU3", ""] {
            let err = Converter::for_version(version).expect_err("should reject");
            assert!(
                matches!(&err, ConversionError::UnsupportedVersion(v) if v == version),
                "{err}"
            );
        }

        let converter = Converter::for_version("R4").expect("R4 is supported");
        assert_eq!(converter.config().fhir_version(), FhirVersion::R4);
    }
}
