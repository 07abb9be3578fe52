//! Element type mapper: SurveyJS elements ⇄ FHIR questionnaire leaf items.
//!
//! The kinds both schemas share form a closed set, [`SurveyShape`]. Conversion in either
//! direction classifies the source into a shape, looks the target type up in the table below,
//! and copies the common fields:
//!
//! | survey element          | FHIR item type |
//! |-------------------------|----------------|
//! | `text`                  | `string`       |
//! | `text` / `number`       | `decimal`      |
//! | `text` / `date`         | `date`         |
//! | `text` / `datetime`     | `dateTime`     |
//! | `text` / `time`         | `time`         |
//! | `text` / `url`          | `url`          |
//! | `url`                   | `url`          |
//! | `boolean`               | `boolean`      |
//! | `comment`               | `text`         |
//! | `file`                  | `attachment`   |
//! | `dropdown`              | `choice`       |
//! | `dropdown` + `hasOther` | `open-choice`  |
//!
//! FHIR `url` maps back to `text` / `url`. Anything outside the table is skipped and reported.

use crate::codec::{self, textual_form, ValueKind};
use crate::config::ConverterConfig;
use crate::warnings::{ConversionWarning, WarningSink};
use fhir::r4::{AnswerOption, Coding, ItemType, QuestionnaireItem};
use serde_json::Value;
use survey_fhir_types::Identifier;
use surveyjs::{Choice, ElementKind, InputType, SurveyElement};

/// The element kinds with a counterpart on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurveyShape {
    /// `text`, optionally refined by `inputType`.
    Text(Option<InputType>),
    Boolean,
    Comment,
    Url,
    Dropdown { has_other: bool },
    File,
}

impl SurveyShape {
    /// Forward table: the FHIR item type for this shape.
    pub fn item_type(self) -> ItemType {
        match self {
            Self::Text(None) => ItemType::String,
            Self::Text(Some(InputType::Number)) => ItemType::Decimal,
            Self::Text(Some(InputType::Date)) => ItemType::Date,
            Self::Text(Some(InputType::DateTime)) => ItemType::DateTime,
            Self::Text(Some(InputType::Time)) => ItemType::Time,
            Self::Text(Some(InputType::Url)) => ItemType::Url,
            Self::Boolean => ItemType::Boolean,
            Self::Comment => ItemType::Text,
            Self::Url => ItemType::Url,
            Self::Dropdown { has_other: false } => ItemType::Choice,
            Self::Dropdown { has_other: true } => ItemType::OpenChoice,
            Self::File => ItemType::Attachment,
        }
    }

    /// Reverse table: the shape for a FHIR item type, if it has one.
    pub fn from_item_type(item_type: ItemType) -> Option<Self> {
        match item_type {
            ItemType::String => Some(Self::Text(None)),
            ItemType::Decimal => Some(Self::Text(Some(InputType::Number))),
            ItemType::Date => Some(Self::Text(Some(InputType::Date))),
            ItemType::DateTime => Some(Self::Text(Some(InputType::DateTime))),
            ItemType::Time => Some(Self::Text(Some(InputType::Time))),
            ItemType::Url => Some(Self::Text(Some(InputType::Url))),
            ItemType::Boolean => Some(Self::Boolean),
            ItemType::Text => Some(Self::Comment),
            ItemType::Choice => Some(Self::Dropdown { has_other: false }),
            ItemType::OpenChoice => Some(Self::Dropdown { has_other: true }),
            ItemType::Attachment => Some(Self::File),
            ItemType::Group
            | ItemType::Display
            | ItemType::Integer
            | ItemType::Reference
            | ItemType::Quantity => None,
        }
    }

    /// Classify a survey element by its `type` tag (and `inputType` for `text`).
    fn classify(
        name: &Identifier,
        element_type: &str,
        element: &SurveyElement,
    ) -> Result<Self, ConversionWarning> {
        let kind = ElementKind::parse(element_type).map_err(|_| {
            ConversionWarning::UnsupportedElementType {
                name: name.to_string(),
                element_type: element_type.to_string(),
            }
        })?;

        Ok(match kind {
            ElementKind::Text => match element.input_type.as_deref() {
                None => Self::Text(None),
                Some(input_type) => {
                    let input_type = InputType::parse(input_type).map_err(|_| {
                        ConversionWarning::UnsupportedInputType {
                            name: name.to_string(),
                            input_type: input_type.to_string(),
                        }
                    })?;
                    Self::Text(Some(input_type))
                }
            },
            ElementKind::Boolean => Self::Boolean,
            ElementKind::Comment => Self::Comment,
            ElementKind::Url => Self::Url,
            ElementKind::Dropdown => Self::Dropdown {
                has_other: element.has_other,
            },
            ElementKind::File => Self::File,
        })
    }

    /// Write this shape's `type`, `inputType` and `hasOther` onto a survey element.
    fn apply_to(self, element: &mut SurveyElement) {
        let (kind, input_type) = match self {
            Self::Text(input_type) => (ElementKind::Text, input_type),
            Self::Boolean => (ElementKind::Boolean, None),
            Self::Comment => (ElementKind::Comment, None),
            Self::Url => (ElementKind::Url, None),
            Self::Dropdown { has_other } => {
                element.has_other = has_other;
                (ElementKind::Dropdown, None)
            }
            Self::File => (ElementKind::File, None),
        };
        element.element_type = Some(kind.as_str().to_string());
        element.input_type = input_type.map(|t| t.as_str().to_string());
    }
}

/// The value kind used for `initial` values of an item type, if any.
///
/// Choice types carry their defaults in `answerOption`, and attachments have none.
pub fn value_kind(item_type: ItemType) -> Option<ValueKind> {
    match item_type {
        ItemType::String | ItemType::Text => Some(ValueKind::String),
        ItemType::Decimal => Some(ValueKind::Decimal),
        ItemType::Date => Some(ValueKind::Date),
        ItemType::DateTime => Some(ValueKind::DateTime),
        ItemType::Time => Some(ValueKind::Time),
        ItemType::Url => Some(ValueKind::Uri),
        ItemType::Boolean => Some(ValueKind::Boolean),
        _ => None,
    }
}

// ============================================================================
// Survey → FHIR
// ============================================================================

/// Convert one survey element into a FHIR leaf item.
///
/// Returns `None` (after reporting why) when the element cannot be converted.
pub fn element_to_item(
    element: &SurveyElement,
    sink: &mut dyn WarningSink,
) -> Option<QuestionnaireItem> {
    let name = Identifier::from_optional(element.name.as_deref());
    let element_type = element.element_type.as_deref().filter(|t| !t.trim().is_empty());

    let (name, element_type) = match (name, element_type) {
        (Some(name), Some(element_type)) => (name, element_type),
        _ => {
            sink.report(ConversionWarning::ElementMissingNameOrType {
                name: element.name.clone(),
            });
            return None;
        }
    };

    let shape = match SurveyShape::classify(&name, element_type, element) {
        Ok(shape) => shape,
        Err(warning) => {
            sink.report(warning);
            return None;
        }
    };

    if element.visible_if.is_some() {
        sink.report(ConversionWarning::VisibilityConditionDropped {
            name: name.to_string(),
        });
    }

    let item_type = shape.item_type();
    let mut item = QuestionnaireItem {
        link_id: Some(name.to_string()),
        text: element.title.clone(),
        item_type: Some(item_type.as_str().to_string()),
        required: element.is_required,
        read_only: element.read_only,
        max_length: element.max_length,
        ..Default::default()
    };

    match shape {
        SurveyShape::Dropdown { .. } => {
            item.answer_option = choices_to_options(&name, element, sink);
        }
        SurveyShape::File => {}
        _ => {
            if let (Some(default), Some(kind)) = (&element.default_value, value_kind(item_type)) {
                item.initial = vec![codec::encode(default.clone(), kind)];
            }
        }
    }

    Some(item)
}

/// Build `answerOption`s from dropdown choices, marking the default as `initialSelected`.
///
/// The default matches a choice only when both are the same JSON value. A default that equals a
/// choice only after textual normalisation is reported and left unselected.
///
/// A choice without `text` gets no `display`; converting back reuses the code as its text.
fn choices_to_options(
    name: &Identifier,
    element: &SurveyElement,
    sink: &mut dyn WarningSink,
) -> Vec<AnswerOption> {
    let mut options = Vec::with_capacity(element.choices.len());

    for (index, choice) in element.choices.iter().enumerate() {
        let code = textual_form(&choice.value);

        // A null value is allowed as long as there is text to display.
        if code.is_none() && (!choice.value.is_null() || choice.text.is_none()) {
            sink.report(ConversionWarning::MalformedChoice {
                name: name.to_string(),
                index,
            });
            continue;
        }

        let initial_selected = match &element.default_value {
            Some(default) if *default == choice.value => Some(true),
            Some(default) => {
                if code.is_some() && textual_form(default) == code {
                    sink.report(ConversionWarning::CrossTypeChoiceDefault {
                        name: name.to_string(),
                        choice_value: choice.value.clone(),
                        default_value: default.clone(),
                    });
                }
                None
            }
            None => None,
        };

        options.push(AnswerOption {
            value_coding: Some(Coding {
                system: None,
                code,
                display: choice.text.clone(),
            }),
            initial_selected,
            ..Default::default()
        });
    }

    options
}

// ============================================================================
// FHIR → Survey
// ============================================================================

/// Convert one FHIR leaf item into a survey element.
///
/// Returns `None` (after reporting why) when the item cannot be converted.
pub fn item_to_element(
    item: &QuestionnaireItem,
    config: &ConverterConfig,
    sink: &mut dyn WarningSink,
) -> Option<SurveyElement> {
    let Some(link_id) = Identifier::from_optional(item.link_id.as_deref()) else {
        sink.report(ConversionWarning::ItemMissingLinkId {
            item_type: item.item_type.clone(),
        });
        return None;
    };

    let shape = item
        .item_type
        .as_deref()
        .and_then(|code| ItemType::parse(code).ok())
        .and_then(|item_type| SurveyShape::from_item_type(item_type).map(|s| (item_type, s)));

    let Some((item_type, shape)) = shape else {
        sink.report(ConversionWarning::UnsupportedItemType {
            link_id: link_id.to_string(),
            item_type: item.item_type.clone(),
        });
        return None;
    };

    let mut element = SurveyElement {
        name: Some(link_id.to_string()),
        title: item.text.clone(),
        is_required: item.required,
        read_only: item.read_only,
        max_length: item.max_length,
        ..Default::default()
    };
    shape.apply_to(&mut element);

    match shape {
        SurveyShape::Dropdown { .. } => {
            let (choices, default_value) = options_to_choices(&link_id, &item.answer_option, sink);
            element.choices = choices;
            element.default_value = default_value;
        }
        SurveyShape::File => {
            element.max_size = Some(config.default_file_max_size());
        }
        _ => {
            if let Some(kind) = value_kind(item_type) {
                element.default_value = initial_default(&link_id, item, kind, sink);
            }
        }
    }

    Some(element)
}

/// Read an item's default from its single `initial` entry.
///
/// Zero or several entries mean "no default". An entry in a member other than `expected`
/// is reported and ignored.
fn initial_default(
    link_id: &Identifier,
    item: &QuestionnaireItem,
    expected: ValueKind,
    sink: &mut dyn WarningSink,
) -> Option<Value> {
    let [initial] = item.initial.as_slice() else {
        return None;
    };

    match codec::decode(initial) {
        Some((value, kind)) if kind == expected => Some(value),
        _ => {
            sink.report(ConversionWarning::UnexpectedInitialValue {
                link_id: link_id.to_string(),
                expected,
            });
            None
        }
    }
}

/// Rebuild dropdown choices from `answerOption`s, returning them with the selected default.
fn options_to_choices(
    link_id: &Identifier,
    options: &[AnswerOption],
    sink: &mut dyn WarningSink,
) -> (Vec<Choice>, Option<Value>) {
    let mut choices = Vec::with_capacity(options.len());
    let mut default_value = None;

    for (index, option) in options.iter().enumerate() {
        let choice = option
            .value_coding
            .as_ref()
            .and_then(coded_choice)
            .or_else(|| scalar_choice(option));

        let Some(choice) = choice else {
            sink.report(ConversionWarning::InvalidAnswerOption {
                link_id: link_id.to_string(),
                index,
            });
            continue;
        };

        if option.initial_selected == Some(true) {
            default_value = Some(choice.value.clone());
        }
        choices.push(choice);
    }

    (choices, default_value)
}

/// `code` becomes the value, `display` the text; each stands in for the other when missing.
fn coded_choice(coding: &Coding) -> Option<Choice> {
    let value = coding.code.as_ref().or(coding.display.as_ref())?;
    let text = coding.display.as_ref().or(coding.code.as_ref());
    Some(Choice::new(value.clone(), text.cloned()))
}

/// The first of `valueString`, `valueTime`, `valueDate`, `valueInteger`, as both value and text.
fn scalar_choice(option: &AnswerOption) -> Option<Choice> {
    let text = [
        &option.value_string,
        &option.value_time,
        &option.value_date,
        &option.value_integer,
    ]
    .into_iter()
    .flatten()
    .find_map(textual_form)?;

    Some(Choice::new(text.clone(), Some(text)))
}
