//! R4 data types shared by questionnaire resources.
//!
//! Key types:
//! - [`AnswerValue`]: the `value[x]` choice element used by `Questionnaire.item.initial` and
//!   `QuestionnaireResponse.item.answer`.
//! - [`Coding`], [`Quantity`], [`Attachment`]: the complex `value[x]` payloads.
//!
//! Primitive payloads are kept as [`serde_json::Value`]. Producers of these documents are not
//! always strict about primitive types (a boolean default may arrive as `"true"`), and the
//! converter copies such values through rather than coercing them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A FHIR `value[x]` wrapper such as `{ "valueString": "x" }`.
///
/// FHIR allows exactly one `value[x]` member per instance. The wire model keeps every member
/// optional so that malformed input still parses; consumers decide which member wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_decimal: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_integer: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date_time: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_time: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_uri: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_coding: Option<Coding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_attachment: Option<Attachment>,
}

impl AnswerValue {
    /// Wraps a string payload as `valueString`.
    pub fn string(value: impl Into<Value>) -> Self {
        Self {
            value_string: Some(value.into()),
            ..Default::default()
        }
    }

    /// Wraps an attachment as `valueAttachment`.
    pub fn attachment(attachment: Attachment) -> Self {
        Self {
            value_attachment: Some(attachment),
            ..Default::default()
        }
    }
}

/// R4 `Coding`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// R4 `Quantity`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// R4 `Attachment` (inline data only).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Base64 payload without any data-URL prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_single_tag() {
        let value = serde_json::to_value(AnswerValue::string("abc")).expect("serialize");
        assert_eq!(value, json!({"valueString": "abc"}));
    }

    #[test]
    fn keeps_primitive_payloads_untouched() {
        let parsed: AnswerValue =
            serde_json::from_value(json!({"valueBoolean": "true"})).expect("parse");
        assert_eq!(parsed.value_boolean, Some(json!("true")));

        let parsed: AnswerValue =
            serde_json::from_value(json!({"valueDecimal": 11.22})).expect("parse");
        assert_eq!(parsed.value_decimal, Some(json!(11.22)));
    }

    #[test]
    fn parses_complex_payloads() {
        let parsed: AnswerValue = serde_json::from_value(json!({
            "valueAttachment": {"contentType": "text/plain", "data": "Zm9v", "title": "f.txt"}
        }))
        .expect("parse");
        assert_eq!(
            parsed.value_attachment,
            Some(Attachment {
                content_type: Some("text/plain".into()),
                data: Some("Zm9v".into()),
                title: Some("f.txt".into()),
            })
        );

        let parsed: AnswerValue =
            serde_json::from_value(json!({"valueQuantity": {"value": 5, "unit": "mg"}}))
                .expect("parse");
        let quantity = parsed.value_quantity.expect("quantity");
        assert_eq!(quantity.value, Some(json!(5)));
        assert_eq!(quantity.unit.as_deref(), Some("mg"));
    }
}
