//! R4 `QuestionnaireResponse` wire model.
//!
//! The response item tree mirrors the questionnaire it answers: every questionnaire item has a
//! response item with the same `linkId`, groups keep their children under `item`, and leaves
//! carry their answers under `answer`.

use super::constants::{QUESTIONNAIRE_RESPONSE_RESOURCE_TYPE, QUESTIONNAIRE_RESPONSE_STATUS};
use super::data_types::AnswerValue;
use crate::{parse_with_path, FhirError, FhirResult};
use serde::{Deserialize, Serialize};

/// R4 `QuestionnaireResponse`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub status: String,

    #[serde(default)]
    pub item: Vec<ResponseItem>,
}

impl QuestionnaireResponse {
    /// Create a completed questionnaire response.
    pub fn new(item: Vec<ResponseItem>) -> Self {
        Self {
            resource_type: QUESTIONNAIRE_RESPONSE_RESOURCE_TYPE.to_string(),
            id: None,
            status: QUESTIONNAIRE_RESPONSE_STATUS.to_string(),
            item,
        }
    }

    /// Parse a questionnaire response from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if the JSON does not match the wire model (naming the
    /// failing path) or if `resourceType` is not `QuestionnaireResponse`.
    pub fn parse(json_text: &str) -> FhirResult<Self> {
        let response: Self = parse_with_path(json_text, "QuestionnaireResponse")?;

        if response.resource_type != QUESTIONNAIRE_RESPONSE_RESOURCE_TYPE {
            return Err(FhirError::Translation(format!(
                "expected resourceType {QUESTIONNAIRE_RESPONSE_RESOURCE_TYPE}, found {}",
                response.resource_type
            )));
        }

        Ok(response)
    }

    /// Render this response as pretty-printed JSON text.
    pub fn render(&self) -> FhirResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            FhirError::Translation(format!("Failed to serialize questionnaire response: {e}"))
        })
    }
}

/// R4 `QuestionnaireResponse.item`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer: Vec<AnswerValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<ResponseItem>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn new_response_is_completed() {
        let response = QuestionnaireResponse::new(vec![]);
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({"resourceType": "QuestionnaireResponse", "status": "completed", "item": []})
        );
    }

    #[test]
    fn parses_and_renders_answers() {
        let input = r#"{
  "resourceType": "QuestionnaireResponse",
  "status": "completed",
  "item": [
    {
      "linkId": "page",
      "text": "Page",
      "item": [
        { "linkId": "q", "answer": [{ "valueString": "other" }, { "valueString": "custom" }] }
      ]
    }
  ]
}"#;

        let response = QuestionnaireResponse::parse(input).expect("parse response");
        let leaf = &response.item[0].item.as_ref().expect("children")[0];
        assert_eq!(leaf.answer.len(), 2);
        assert_eq!(leaf.answer[1], AnswerValue::string("custom"));

        let rendered = response.render().expect("render");
        let original: Value = serde_json::from_str(input).expect("valid json");
        let round_tripped: Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(original, round_tripped);
    }

    #[test]
    fn rejects_questionnaire_resource() {
        let input = r#"{"resourceType": "Questionnaire", "status": "unknown"}"#;
        let err = QuestionnaireResponse::parse(input).expect_err("should reject");
        assert!(matches!(err, FhirError::Translation(msg) if msg.contains("Questionnaire")));
    }
}
