//! Response packer/unpacker: flat survey responses ⇄ questionnaire answer trees.
//!
//! Packing walks the questionnaire so every answer is encoded by the item's declared type,
//! never by the runtime shape of the response value. Unpacking has no questionnaire to lean on
//! and infers the flat value from the shape of each item's answers.

use crate::codec::{self, textual_form, ValueKind};
use crate::mapping::value_kind;
use crate::warnings::{ConversionWarning, WarningSink};
use fhir::r4::{AnswerValue, Attachment, ItemType, QuestionnaireItem, ResponseItem};
use serde_json::Value;
use surveyjs::{comment_key, FileDescriptor, FlatResponseMap};

/// Build the response item tree for `items`, answering leaves from `responses`.
///
/// Every questionnaire item yields a response item, answered or not, so the tree shape always
/// mirrors the questionnaire.
pub fn pack_items(
    items: &[QuestionnaireItem],
    responses: &FlatResponseMap,
    sink: &mut dyn WarningSink,
) -> Vec<ResponseItem> {
    items
        .iter()
        .map(|item| pack_item(item, responses, sink))
        .collect()
}

fn pack_item(
    item: &QuestionnaireItem,
    responses: &FlatResponseMap,
    sink: &mut dyn WarningSink,
) -> ResponseItem {
    let item_type = item
        .item_type
        .as_deref()
        .and_then(|t| ItemType::parse(t).ok());

    let answer = match (&item.link_id, item_type) {
        (_, Some(ItemType::Group)) => Vec::new(),
        (Some(link_id), item_type) => match responses.get(link_id) {
            Some(response) => {
                encode_answer(link_id, item, item_type, response, responses, sink)
            }
            None => Vec::new(),
        },
        (None, _) => Vec::new(),
    };

    ResponseItem {
        link_id: item.link_id.clone(),
        definition: item.definition.clone(),
        text: item.text.clone(),
        answer,
        item: item
            .item
            .as_ref()
            .map(|children| pack_items(children, responses, sink)),
    }
}

fn encode_answer(
    link_id: &str,
    item: &QuestionnaireItem,
    item_type: Option<ItemType>,
    response: &Value,
    responses: &FlatResponseMap,
    sink: &mut dyn WarningSink,
) -> Vec<AnswerValue> {
    let kind = match item_type {
        Some(ItemType::Attachment) => {
            return match FileDescriptor::list_from_value(response) {
                Ok(files) => files.iter().map(file_to_answer).collect(),
                Err(_) => {
                    sink.report(ConversionWarning::MalformedAttachmentResponse {
                        link_id: link_id.to_string(),
                    });
                    Vec::new()
                }
            };
        }
        Some(ItemType::Choice | ItemType::OpenChoice) => Some(ValueKind::String),
        Some(item_type) => value_kind(item_type),
        None => None,
    };

    let Some(kind) = kind else {
        sink.report(ConversionWarning::UnsupportedAnswerType {
            link_id: link_id.to_string(),
            item_type: item.item_type.clone(),
        });
        return Vec::new();
    };

    let mut answer = vec![codec::encode(response.clone(), kind)];

    if item_type == Some(ItemType::OpenChoice) {
        if let Some(comment) = responses.get(&comment_key(link_id)) {
            answer.push(AnswerValue::string(comment.clone()));
        }
    }

    answer
}

fn file_to_answer(file: &FileDescriptor) -> AnswerValue {
    // Everything after the first comma is the payload; content without a prefix is kept whole.
    let data = file.content.as_deref().map(|content| {
        content
            .split_once(',')
            .map_or(content, |(_, payload)| payload)
            .to_string()
    });

    AnswerValue::attachment(Attachment {
        content_type: file.content_type.clone(),
        data,
        title: file.name.clone(),
    })
}

/// Flatten a response item tree into `responses`, children before their parent.
pub fn unpack_items(
    items: &[ResponseItem],
    responses: &mut FlatResponseMap,
    sink: &mut dyn WarningSink,
) {
    for item in items {
        if let Some(children) = &item.item {
            unpack_items(children, responses, sink);
        }

        if item.answer.is_empty() {
            continue;
        }

        let Some(link_id) = &item.link_id else {
            sink.report(ConversionWarning::ItemMissingLinkId { item_type: None });
            continue;
        };

        unpack_answer(link_id, &item.answer, responses, sink);
    }
}

fn unpack_answer(
    link_id: &str,
    answer: &[AnswerValue],
    responses: &mut FlatResponseMap,
    sink: &mut dyn WarningSink,
) {
    if let [primary, comment] = answer {
        if let (Some(primary), Some(comment)) = (&primary.value_string, &comment.value_string) {
            responses.insert(link_id.to_string(), primary.clone());
            responses.insert(comment_key(link_id), comment.clone());
            return;
        }
    }

    let attachments: Option<Vec<&Attachment>> =
        answer.iter().map(|a| a.value_attachment.as_ref()).collect();
    if let Some(attachments) = attachments {
        let files = attachments
            .into_iter()
            .map(|attachment| attachment_to_file(attachment).into_value())
            .collect();
        responses.insert(link_id.to_string(), Value::Array(files));
        return;
    }

    match answer {
        [single] => match single_value(single) {
            Some(value) => {
                responses.insert(link_id.to_string(), value);
            }
            None => sink.report(ConversionWarning::UnrecognisedAnswer {
                link_id: link_id.to_string(),
                answers: 1,
            }),
        },
        _ => sink.report(ConversionWarning::UnrecognisedAnswer {
            link_id: link_id.to_string(),
            answers: answer.len(),
        }),
    }
}

/// The flat value of a single answer: the first populated member in a fixed precedence.
fn single_value(answer: &AnswerValue) -> Option<Value> {
    let scalar = [
        &answer.value_boolean,
        &answer.value_decimal,
        &answer.value_integer,
        &answer.value_date,
        &answer.value_date_time,
        &answer.value_time,
        &answer.value_string,
        &answer.value_uri,
    ]
    .into_iter()
    .find_map(Option::clone);
    if scalar.is_some() {
        return scalar;
    }

    if let Some(coding) = &answer.value_coding {
        if let Some(text) = coding.code.as_ref().or(coding.display.as_ref()) {
            return Some(Value::String(text.clone()));
        }
    }

    let quantity = answer.value_quantity.as_ref()?;
    let value = quantity.value.as_ref()?;
    match &quantity.unit {
        // A unit on its own is not an answer.
        Some(unit) => textual_form(value).map(|value| Value::String(format!("{value}{unit}"))),
        None => Some(value.clone()),
    }
}

fn attachment_to_file(attachment: &Attachment) -> FileDescriptor {
    let content = attachment.data.as_ref().map(|data| match &attachment.content_type {
        Some(content_type) => format!("data:{content_type};base64,{data}"),
        None => format!("base64,{data}"),
    });

    FileDescriptor {
        name: attachment.title.clone(),
        content_type: attachment.content_type.clone(),
        content,
    }
}
