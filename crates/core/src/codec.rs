//! Value codec: scalar values ⇄ FHIR `value[x]` wrappers.
//!
//! SurveyJS stores defaults and answers as bare JSON scalars; FHIR wraps them in a member whose
//! name encodes the type (`valueDate`, `valueBoolean`, ...). [`encode`] and [`decode`] translate
//! between the two for the value kinds the element type mapper produces. Payloads are copied
//! untouched: a number stays a number and a string stays a string.

use fhir::r4::AnswerValue;
use serde_json::Value;
use std::fmt;

/// The declared kind of a scalar, i.e. which `value[x]` member carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Decimal,
    Date,
    DateTime,
    Time,
    Uri,
    Boolean,
}

impl ValueKind {
    /// Every kind, in the order [`decode`] inspects them.
    pub const ALL: [ValueKind; 7] = [
        ValueKind::String,
        ValueKind::Decimal,
        ValueKind::Date,
        ValueKind::DateTime,
        ValueKind::Time,
        ValueKind::Uri,
        ValueKind::Boolean,
    ];

    /// Returns the `value[x]` member name for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::String => "valueString",
            Self::Decimal => "valueDecimal",
            Self::Date => "valueDate",
            Self::DateTime => "valueDateTime",
            Self::Time => "valueTime",
            Self::Uri => "valueUri",
            Self::Boolean => "valueBoolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Wrap `value` in the `value[x]` member for `kind`.
pub fn encode(value: Value, kind: ValueKind) -> AnswerValue {
    let mut wrapper = AnswerValue::default();
    *slot_mut(&mut wrapper, kind) = Some(value);
    wrapper
}

/// Unwrap the first populated declared-kind member of `wrapper`.
///
/// Returns `None` when the wrapper carries none of the [`ValueKind`] members (for example a
/// `valueCoding` or an empty wrapper).
pub fn decode(wrapper: &AnswerValue) -> Option<(Value, ValueKind)> {
    ValueKind::ALL
        .into_iter()
        .find_map(|kind| slot(wrapper, kind).map(|value| (value.clone(), kind)))
}

/// Textual form of a scalar, as used for choice codes.
///
/// Strings are returned as-is; numbers and booleans use their JSON spelling. `null`, arrays and
/// objects have no textual form.
pub fn textual_form(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn slot(wrapper: &AnswerValue, kind: ValueKind) -> Option<&Value> {
    match kind {
        ValueKind::String => wrapper.value_string.as_ref(),
        ValueKind::Decimal => wrapper.value_decimal.as_ref(),
        ValueKind::Date => wrapper.value_date.as_ref(),
        ValueKind::DateTime => wrapper.value_date_time.as_ref(),
        ValueKind::Time => wrapper.value_time.as_ref(),
        ValueKind::Uri => wrapper.value_uri.as_ref(),
        ValueKind::Boolean => wrapper.value_boolean.as_ref(),
    }
}

fn slot_mut(wrapper: &mut AnswerValue, kind: ValueKind) -> &mut Option<Value> {
    match kind {
        ValueKind::String => &mut wrapper.value_string,
        ValueKind::Decimal => &mut wrapper.value_decimal,
        ValueKind::Date => &mut wrapper.value_date,
        ValueKind::DateTime => &mut wrapper.value_date_time,
        ValueKind::Time => &mut wrapper.value_time,
        ValueKind::Uri => &mut wrapper.value_uri,
        ValueKind::Boolean => &mut wrapper.value_boolean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_uses_member_for_kind() {
        let wrapper = encode(json!("1982-11-22"), ValueKind::Date);
        assert_eq!(
            serde_json::to_value(&wrapper).expect("serialize"),
            json!({"valueDate": "1982-11-22"})
        );

        let wrapper = encode(json!("http://www.github.com"), ValueKind::Uri);
        assert_eq!(wrapper.value_uri, Some(json!("http://www.github.com")));
    }

    #[test]
    fn decode_inverts_encode_for_every_kind() {
        let samples = [json!("abc"), json!(11.22), json!(123), json!(true), json!("true")];
        for kind in ValueKind::ALL {
            for value in &samples {
                assert_eq!(
                    decode(&encode(value.clone(), kind)),
                    Some((value.clone(), kind)),
                    "{kind} {value}"
                );
            }
        }
    }

    #[test]
    fn numbers_are_not_stringified() {
        let wrapper = encode(json!(123), ValueKind::String);
        assert_eq!(wrapper.value_string, Some(json!(123)));
    }

    #[test]
    fn decode_ignores_non_scalar_members() {
        let wrapper: AnswerValue =
            serde_json::from_value(json!({"valueCoding": {"code": "a"}})).expect("parse");
        assert_eq!(decode(&wrapper), None);
        assert_eq!(decode(&AnswerValue::default()), None);
    }

    #[test]
    fn textual_form_of_scalars() {
        assert_eq!(textual_form(&json!("item1")), Some("item1".to_string()));
        assert_eq!(textual_form(&json!(3)), Some("3".to_string()));
        assert_eq!(textual_form(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(textual_form(&json!(false)), Some("false".to_string()));
        assert_eq!(textual_form(&Value::Null), None);
        assert_eq!(textual_form(&json!(["a"])), None);
    }
}
