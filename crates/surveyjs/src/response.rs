//! SurveyJS flat response wire model.
//!
//! A SurveyJS response is a single JSON object keyed by element name. Most values are scalars;
//! `file` elements answer with a list of file descriptors, and dropdowns with an "other" entry
//! store the free text under `<name>-Comment`.

use crate::{parse_with_path, SurveyJsError, SurveyJsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key suffix SurveyJS uses for the free-text "other" entry of a dropdown.
pub const COMMENT_SUFFIX: &str = "-Comment";

/// A flat survey response: element name (optionally `-Comment` suffixed) to answer.
///
/// Values are kept as raw JSON. Whether a value is a file list depends on the element that
/// asked the question, not on the value's shape; see [`FileDescriptor::list_from_value`].
pub type FlatResponseMap = BTreeMap<String, Value>;

/// Returns the response key holding the free-text comment for `name`.
pub fn comment_key(name: &str) -> String {
    format!("{name}{COMMENT_SUFFIX}")
}

/// One uploaded file, as SurveyJS stores it in a response.
///
/// `content` is a data URL (`data:<mime>;base64,<payload>`). Other descriptor fields SurveyJS
/// may add (such as `size`) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileDescriptor {
    /// Read the answer of a `file` element as a list of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyJsError::InvalidJson`] if `value` is not an array of file objects.
    pub fn list_from_value(value: &Value) -> SurveyJsResult<Vec<Self>> {
        Ok(Vec::<Self>::deserialize(value)?)
    }

    /// Convert this descriptor into the JSON object SurveyJS stores in a response.
    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        if let Some(name) = self.name {
            object.insert("name".into(), Value::String(name));
        }
        if let Some(content_type) = self.content_type {
            object.insert("type".into(), Value::String(content_type));
        }
        if let Some(content) = self.content {
            object.insert("content".into(), Value::String(content));
        }
        Value::Object(object)
    }
}

/// Survey response operations.
///
/// This is a zero-sized type used for namespacing response parse/render operations.
pub struct SurveyResponse;

impl SurveyResponse {
    /// Parse a flat survey response from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyJsError`] if the text is not a JSON object.
    pub fn parse(json_text: &str) -> SurveyJsResult<FlatResponseMap> {
        parse_with_path(json_text, "Survey response")
    }

    /// Render a flat survey response as pretty-printed JSON text.
    pub fn render(response: &FlatResponseMap) -> SurveyJsResult<String> {
        serde_json::to_string_pretty(response).map_err(|e| {
            SurveyJsError::Translation(format!("Failed to serialize survey response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_files_and_scalars_as_raw_json() {
        let input = r#"{
  "single-input-number": 123,
  "checkbox": ["a", "b"],
  "file-uploader": [
    {
      "name": "test_file.txt",
      "type": "text/plain",
      "content": "data:text/plain;base64,dGVzdF9maWxlCg=="
    }
  ],
  "dropdown-with-other": "other",
  "dropdown-with-other-Comment": "Other Selected!"
}"#;

        let response = SurveyResponse::parse(input).expect("parse response");

        assert_eq!(response["single-input-number"], json!(123));
        assert_eq!(response["checkbox"], json!(["a", "b"]));
        assert_eq!(
            response[&comment_key("dropdown-with-other")],
            json!("Other Selected!")
        );

        let files = FileDescriptor::list_from_value(&response["file-uploader"]).expect("files");
        assert_eq!(
            files,
            vec![FileDescriptor {
                name: Some("test_file.txt".into()),
                content_type: Some("text/plain".into()),
                content: Some("data:text/plain;base64,dGVzdF9maWxlCg==".into()),
            }]
        );
    }

    #[test]
    fn file_list_ignores_extra_descriptor_fields() {
        let files = FileDescriptor::list_from_value(&json!([
            {"name": "f.txt", "type": "text/plain", "content": "data:text/plain;base64,Zm9v", "size": 3}
        ]))
        .expect("files");
        assert_eq!(files[0].name.as_deref(), Some("f.txt"));
        assert_eq!(files[0].content.as_deref(), Some("data:text/plain;base64,Zm9v"));
    }

    #[test]
    fn file_list_rejects_non_lists() {
        let err = FileDescriptor::list_from_value(&json!("f.txt")).expect_err("not a list");
        assert!(matches!(err, SurveyJsError::InvalidJson(_)));

        let err = FileDescriptor::list_from_value(&json!([1, 2])).expect_err("not objects");
        assert!(matches!(err, SurveyJsError::InvalidJson(_)));
    }

    #[test]
    fn descriptor_value_omits_missing_fields() {
        let file = FileDescriptor {
            name: Some("a.bin".into()),
            content_type: None,
            content: Some("base64,AAEC".into()),
        };
        assert_eq!(file.into_value(), json!({"name": "a.bin", "content": "base64,AAEC"}));
    }

    #[test]
    fn rejects_non_object_response() {
        let err = SurveyResponse::parse("[1, 2]").expect_err("should reject array");
        assert!(matches!(err, SurveyJsError::Translation(_)));
    }

    #[test]
    fn render_round_trips() {
        let mut response = FlatResponseMap::new();
        response.insert("q".into(), json!("abc"));
        response.insert(
            "f".into(),
            json!([{"name": "a.txt", "content": "base64,Zm9v"}]),
        );

        let rendered = SurveyResponse::render(&response).expect("render");
        let reparsed = SurveyResponse::parse(&rendered).expect("reparse");
        assert_eq!(response, reparsed);
    }
}
