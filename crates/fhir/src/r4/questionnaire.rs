//! R4 `Questionnaire` wire model.
//!
//! Responsibilities:
//! - Define the wire model for a questionnaire and its (arbitrarily nested) items
//! - Name the item types the converter understands ([`ItemType`])
//! - Parse/render questionnaire JSON text, checking `resourceType`
//!
//! Notes:
//! - Only the members the SurveyJS conversion reads or writes are modelled; anything else on
//!   input is ignored.
//! - `type` stays a plain string on the wire so that questionnaires using item types the
//!   converter cannot map still parse.

use super::constants::{QUESTIONNAIRE_RESOURCE_TYPE, QUESTIONNAIRE_STATUS};
use super::data_types::{AnswerValue, Coding};
use crate::{parse_with_path, FhirError, FhirResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// R4 `Questionnaire`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Computer-friendly name; becomes the name of the root survey page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-friendly title; the default title of every derived survey page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub status: String,

    #[serde(default)]
    pub item: Vec<QuestionnaireItem>,
}

impl Questionnaire {
    /// Create a questionnaire with the status the converter stamps on its output.
    pub fn new(item: Vec<QuestionnaireItem>) -> Self {
        Self {
            resource_type: QUESTIONNAIRE_RESOURCE_TYPE.to_string(),
            id: None,
            name: None,
            title: None,
            status: QUESTIONNAIRE_STATUS.to_string(),
            item,
        }
    }

    /// Parse a questionnaire from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if the JSON does not match the wire model (naming the
    /// failing path) or if `resourceType` is not `Questionnaire`.
    pub fn parse(json_text: &str) -> FhirResult<Self> {
        let questionnaire: Self = parse_with_path(json_text, "Questionnaire")?;

        if questionnaire.resource_type != QUESTIONNAIRE_RESOURCE_TYPE {
            return Err(FhirError::Translation(format!(
                "expected resourceType {QUESTIONNAIRE_RESOURCE_TYPE}, found {}",
                questionnaire.resource_type
            )));
        }

        Ok(questionnaire)
    }

    /// Render this questionnaire as pretty-printed JSON text.
    pub fn render(&self) -> FhirResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            FhirError::Translation(format!("Failed to serialize questionnaire: {e}"))
        })
    }
}

/// R4 `Questionnaire.item`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_option: Vec<AnswerOption>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial: Vec<AnswerValue>,

    /// Child items. Presence (even empty) marks the item as a container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireItem>>,
}

/// R4 `Questionnaire.item.answerOption`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_coding: Option<Coding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_integer: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_time: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_selected: Option<bool>,
}

/// R4 `QuestionnaireItemType` codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemType {
    Group,
    Display,
    Boolean,
    Decimal,
    Integer,
    Date,
    DateTime,
    Time,
    String,
    Text,
    Url,
    Choice,
    OpenChoice,
    Attachment,
    Reference,
    Quantity,
}

impl ItemType {
    /// Parses an item `type` code.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidInput`] if the code is not an R4 item type.
    pub fn parse(s: &str) -> FhirResult<Self> {
        match s {
            "group" => Ok(Self::Group),
            "display" => Ok(Self::Display),
            "boolean" => Ok(Self::Boolean),
            "decimal" => Ok(Self::Decimal),
            "integer" => Ok(Self::Integer),
            "date" => Ok(Self::Date),
            "dateTime" => Ok(Self::DateTime),
            "time" => Ok(Self::Time),
            "string" => Ok(Self::String),
            "text" => Ok(Self::Text),
            "url" => Ok(Self::Url),
            "choice" => Ok(Self::Choice),
            "open-choice" => Ok(Self::OpenChoice),
            "attachment" => Ok(Self::Attachment),
            "reference" => Ok(Self::Reference),
            "quantity" => Ok(Self::Quantity),
            _ => Err(FhirError::InvalidInput(format!(
                "Unknown questionnaire item type: {s}"
            ))),
        }
    }

    /// Returns the R4 code for this item type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Display => "display",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::String => "string",
            Self::Text => "text",
            Self::Url => "url",
            Self::Choice => "choice",
            Self::OpenChoice => "open-choice",
            Self::Attachment => "attachment",
            Self::Reference => "reference",
            Self::Quantity => "quantity",
        }
    }
}
