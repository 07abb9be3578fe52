//! Recoverable conversion warnings.
//!
//! Conversion is best-effort: a sub-structure the converter cannot map is dropped and the rest
//! of the document still converts. Every drop is reported as a [`ConversionWarning`] through a
//! caller-supplied [`WarningSink`], so callers can assert on exactly what was skipped.
//!
//! Sinks provided here:
//! - `Vec<ConversionWarning>` collects warnings for inspection.
//! - [`TracingSink`] forwards each warning to `tracing` at `WARN` level.

use crate::codec::ValueKind;
use serde_json::Value;
use std::fmt;

/// A sub-structure that was skipped (or only partly converted) during conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum ConversionWarning {
    /// The survey has no pages; the questionnaire is empty.
    SurveyWithoutPages,

    /// A page without a name cannot become a group item.
    PageWithoutName { index: usize },

    /// A page had no convertible elements and was left out.
    EmptyPage { name: String },

    /// An element lacks `name` or `type`.
    ElementMissingNameOrType { name: Option<String> },

    /// An element `type` with no FHIR counterpart.
    UnsupportedElementType { name: String, element_type: String },

    /// A `text` element `inputType` with no FHIR counterpart.
    UnsupportedInputType { name: String, input_type: String },

    /// A `visibleIf` condition was dropped; the element itself was converted.
    VisibilityConditionDropped { name: String },

    /// A dropdown choice with neither a usable value nor text.
    MalformedChoice { name: String, index: usize },

    /// A dropdown default matches a choice only after textual normalisation (e.g. `1` vs `"1"`).
    CrossTypeChoiceDefault {
        name: String,
        choice_value: Value,
        default_value: Value,
    },

    /// A leaf questionnaire item without a `linkId`.
    ItemMissingLinkId { item_type: Option<String> },

    /// A questionnaire item type with no SurveyJS counterpart.
    UnsupportedItemType {
        link_id: String,
        item_type: Option<String>,
    },

    /// An `answerOption` with no coding and no scalar value.
    InvalidAnswerOption { link_id: String, index: usize },

    /// An `initial` entry whose member does not match the item type.
    UnexpectedInitialValue { link_id: String, expected: ValueKind },

    /// A response exists for an item whose type cannot carry an answer.
    UnsupportedAnswerType {
        link_id: String,
        item_type: Option<String>,
    },

    /// An `attachment` item answered with something other than a file list.
    MalformedAttachmentResponse { link_id: String },

    /// A response item whose answers match none of the known answer patterns.
    UnrecognisedAnswer { link_id: String, answers: usize },
}

impl ConversionWarning {
    /// Stable machine-readable code for this warning kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SurveyWithoutPages => "survey_without_pages",
            Self::PageWithoutName { .. } => "page_without_name",
            Self::EmptyPage { .. } => "empty_page",
            Self::ElementMissingNameOrType { .. } => "element_missing_name_or_type",
            Self::UnsupportedElementType { .. } => "unsupported_element_type",
            Self::UnsupportedInputType { .. } => "unsupported_input_type",
            Self::VisibilityConditionDropped { .. } => "visibility_condition_dropped",
            Self::MalformedChoice { .. } => "malformed_choice",
            Self::CrossTypeChoiceDefault { .. } => "cross_type_choice_default",
            Self::ItemMissingLinkId { .. } => "item_missing_link_id",
            Self::UnsupportedItemType { .. } => "unsupported_item_type",
            Self::InvalidAnswerOption { .. } => "invalid_answer_option",
            Self::UnexpectedInitialValue { .. } => "unexpected_initial_value",
            Self::UnsupportedAnswerType { .. } => "unsupported_answer_type",
            Self::MalformedAttachmentResponse { .. } => "malformed_attachment_response",
            Self::UnrecognisedAnswer { .. } => "unrecognised_answer",
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurveyWithoutPages => {
                write!(f, "survey has no pages; returning a blank questionnaire")
            }
            Self::PageWithoutName { index } => {
                write!(f, "survey page {index} has no name and was skipped")
            }
            Self::EmptyPage { name } => {
                write!(f, "page {name} has no convertible elements and was skipped")
            }
            Self::ElementMissingNameOrType { name } => match name {
                Some(name) => write!(f, "element {name} has no type and was skipped"),
                None => write!(f, "element without a name was skipped"),
            },
            Self::UnsupportedElementType { name, element_type } => write!(
                f,
                "skipping element {name}: unsupported survey element type {element_type}"
            ),
            Self::UnsupportedInputType { name, input_type } => write!(
                f,
                "skipping element {name}: unsupported string input type {input_type}"
            ),
            Self::VisibilityConditionDropped { name } => {
                write!(f, "visibleIf is not supported; dropped condition on {name}")
            }
            Self::MalformedChoice { name, index } => {
                write!(f, "dropdown {name} choice {index} has no value or text")
            }
            Self::CrossTypeChoiceDefault {
                name,
                choice_value,
                default_value,
            } => write!(
                f,
                "dropdown {name} default {default_value} only matches choice {choice_value} \
                 after type conversion; not selected"
            ),
            Self::ItemMissingLinkId { item_type } => match item_type {
                Some(item_type) => write!(f, "{item_type} item without a linkId was skipped"),
                None => write!(f, "item without a linkId was skipped"),
            },
            Self::UnsupportedItemType { link_id, item_type } => write!(
                f,
                "skipping item {link_id}: unsupported questionnaire item type {}",
                item_type.as_deref().unwrap_or("<missing>")
            ),
            Self::InvalidAnswerOption { link_id, index } => {
                write!(f, "item {link_id} answerOption {index} is invalid and was skipped")
            }
            Self::UnexpectedInitialValue { link_id, expected } => {
                write!(f, "item {link_id} initial value is not a {expected}; ignored")
            }
            Self::UnsupportedAnswerType { link_id, item_type } => write!(
                f,
                "response for {link_id} ignored: item type {} cannot carry an answer",
                item_type.as_deref().unwrap_or("<missing>")
            ),
            Self::MalformedAttachmentResponse { link_id } => {
                write!(f, "response for attachment {link_id} is not a file list")
            }
            Self::UnrecognisedAnswer { link_id, answers } => write!(
                f,
                "response item {link_id} has {answers} answer(s) in an unrecognised shape"
            ),
        }
    }
}

/// Receiver for recoverable conversion warnings.
pub trait WarningSink {
    fn report(&mut self, warning: ConversionWarning);
}

impl WarningSink for Vec<ConversionWarning> {
    fn report(&mut self, warning: ConversionWarning) {
        self.push(warning);
    }
}

/// Forwards warnings to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn report(&mut self, warning: ConversionWarning) {
        tracing::warn!(code = warning.code(), "{warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<ConversionWarning> = Vec::new();
        sink.report(ConversionWarning::SurveyWithoutPages);
        sink.report(ConversionWarning::EmptyPage { name: "p".into() });
        assert_eq!(
            sink,
            vec![
                ConversionWarning::SurveyWithoutPages,
                ConversionWarning::EmptyPage { name: "p".into() },
            ]
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let warning = ConversionWarning::UnsupportedElementType {
            name: "matrix-1".into(),
            element_type: "matrixdynamic".into(),
        };
        let message = warning.to_string();
        assert!(message.contains("matrix-1"));
        assert!(message.contains("matrixdynamic"));
        assert_eq!(warning.code(), "unsupported_element_type");

        let warning = ConversionWarning::UnexpectedInitialValue {
            link_id: "q".into(),
            expected: ValueKind::Decimal,
        };
        assert!(warning.to_string().contains("valueDecimal"));
    }

    #[test]
    fn tracing_sink_accepts_warnings() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let mut sink = TracingSink;
        sink.report(ConversionWarning::UnsupportedItemType {
            link_id: "q".into(),
            item_type: None,
        });
    }
}
