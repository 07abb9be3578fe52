//! SurveyJS survey definition wire model.
//!
//! Responsibilities:
//! - Define the wire model for a survey (`SurveyDocument` → `SurveyPage` → `SurveyElement`)
//! - Name the element kinds and text input types that have a FHIR counterpart
//! - Parse/render survey JSON text
//!
//! Notes:
//! - `type` and `inputType` stay plain strings on the wire so that surveys using element kinds
//!   without a FHIR counterpart still parse. [`ElementKind::parse`] and [`InputType::parse`]
//!   narrow them to the supported set.

use crate::{is_false, parse_with_path, SurveyJsError, SurveyJsResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Public Survey operations
// ============================================================================

/// Survey definition operations.
///
/// This is a zero-sized type used for namespacing survey parse/render operations.
pub struct Survey;

impl Survey {
    /// Parse a survey definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyJsError::Translation`] naming the failing path when the JSON does not
    /// match the survey wire model, or [`SurveyJsError::InvalidJson`] for trailing input.
    pub fn parse(json_text: &str) -> SurveyJsResult<SurveyDocument> {
        parse_with_path(json_text, "Survey")
    }

    /// Render a survey definition as pretty-printed JSON text.
    pub fn render(document: &SurveyDocument) -> SurveyJsResult<String> {
        serde_json::to_string_pretty(document).map_err(|e| {
            SurveyJsError::Translation(format!("Failed to serialize survey: {e}"))
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// A SurveyJS survey: an ordered list of pages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyDocument {
    #[serde(default)]
    pub pages: Vec<SurveyPage>,
}

/// One page of a survey.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<SurveyElement>,
}

/// A single input element (a "question" in SurveyJS terms).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyElement {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Refines `text` elements (`number`, `date`, `datetime`, `time`, `url`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Maximum upload size for `file` elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,

    /// Visibility condition expression. Carried on the wire but never converted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,

    /// Dropdown offers a free-text "other" entry.
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_other: bool,
}

/// One dropdown option.
///
/// SurveyJS accepts either `{ "value": ..., "text": ... }` objects or bare scalars in a
/// `choices` list. Both forms deserialize into this struct; it always serializes as an object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Choice {
    pub value: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Choice {
    pub fn new(value: impl Into<Value>, text: Option<String>) -> Self {
        Self {
            value: value.into(),
            text,
        }
    }
}

#[derive(Deserialize)]
struct ChoiceObject {
    #[serde(default)]
    value: Value,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceWire {
    Object(ChoiceObject),
    Bare(Value),
}

impl<'de> Deserialize<'de> for Choice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ChoiceWire::deserialize(deserializer)? {
            ChoiceWire::Object(object) => Choice {
                value: object.value,
                text: object.text,
            },
            ChoiceWire::Bare(value) => Choice { value, text: None },
        })
    }
}

// ============================================================================
// Element kinds
// ============================================================================

/// SurveyJS element kinds that have a FHIR questionnaire counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    Boolean,
    Comment,
    Url,
    Dropdown,
    File,
}

impl ElementKind {
    /// Parses an element `type` tag.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyJsError::InvalidInput`] for tags outside the supported set.
    pub fn parse(s: &str) -> Result<Self, SurveyJsError> {
        match s {
            "text" => Ok(Self::Text),
            "boolean" => Ok(Self::Boolean),
            "comment" => Ok(Self::Comment),
            "url" => Ok(Self::Url),
            "dropdown" => Ok(Self::Dropdown),
            "file" => Ok(Self::File),
            _ => Err(SurveyJsError::InvalidInput(format!(
                "Unsupported survey element type: {s}"
            ))),
        }
    }

    /// Returns the wire tag for this element kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Comment => "comment",
            Self::Url => "url",
            Self::Dropdown => "dropdown",
            Self::File => "file",
        }
    }
}

/// `inputType` refinements of a `text` element that have a FHIR counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputType {
    Number,
    Date,
    DateTime,
    Time,
    Url,
}

impl InputType {
    /// Parses an `inputType` tag.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyJsError::InvalidInput`] for tags outside the supported set.
    pub fn parse(s: &str) -> Result<Self, SurveyJsError> {
        match s {
            "number" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            "time" => Ok(Self::Time),
            "url" => Ok(Self::Url),
            _ => Err(SurveyJsError::InvalidInput(format!(
                "Unsupported string input type: {s}"
            ))),
        }
    }

    /// Returns the wire tag for this input type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Url => "url",
        }
    }
}
