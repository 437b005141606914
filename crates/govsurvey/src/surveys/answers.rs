//! Lenient extraction of answer maps from stored submission payloads.
//!
//! The `data` field of a submission is opaque and permanent once written,
//! and its internal shape varies across eras of the application: some rows
//! nest the answers under an `answers` object, some store them flat at the
//! top level. Extraction reconciles every known shape into one canonical
//! map and never fails; malformed input degrades to an empty map.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single stored answer: free text or a selected option, a multi-select
/// list, or an explicit "unanswered" marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Multi(Vec<String>),
    Null,
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Human-readable rendering for detail views.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Text(value) => value.clone(),
            AnswerValue::Multi(values) => values.join(", "),
            AnswerValue::Null => String::new(),
        }
    }

    fn narrow(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(AnswerValue::Text(text.clone())),
            Value::Null => Some(AnswerValue::Null),
            Value::Array(items) => {
                let mut narrowed = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(text) => narrowed.push(text.clone()),
                        _ => return None,
                    }
                }
                Some(AnswerValue::Multi(narrowed))
            }
            _ => None,
        }
    }
}

/// Canonical question-key to answer map.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// Reserved top-level field that is never itself an answer.
const ANSWERS_FIELD: &str = "answers";

/// Nested container fields probed, in order, when a collection payload is
/// not itself an array.
const CONTAINER_FIELDS: [&str; 4] = ["submissions", "rows", "items", "data"];

/// Extract the canonical answer map from a raw submission payload.
///
/// A nested `answers` object wins; otherwise every top-level field except
/// the reserved one is treated as an answer. Values that are not a string,
/// null, or an all-string array are dropped silently.
pub fn extract_answers(data: &Value) -> AnswerMap {
    let Some(object) = data.as_object() else {
        return AnswerMap::new();
    };

    if let Some(nested) = object.get(ANSWERS_FIELD).and_then(Value::as_object) {
        return nested
            .iter()
            .filter_map(|(key, value)| {
                AnswerValue::narrow(value).map(|answer| (key.clone(), answer))
            })
            .collect();
    }

    object
        .iter()
        .filter(|(key, _)| key.as_str() != ANSWERS_FIELD)
        .filter_map(|(key, value)| AnswerValue::narrow(value).map(|answer| (key.clone(), answer)))
        .collect()
}

/// Locate the submission rows inside a collection payload from an upstream
/// source: a bare array, or the first recognized container field holding
/// one.
pub fn submission_rows(payload: &Value) -> Option<&[Value]> {
    if let Some(rows) = payload.as_array() {
        return Some(rows);
    }
    let object = payload.as_object()?;
    CONTAINER_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_array))
        .map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_and_flat_shapes_extract_identically() {
        let nested = extract_answers(&json!({ "answers": { "a": "1" } }));
        let flat = extract_answers(&json!({ "a": "1" }));
        assert_eq!(nested, flat);
        assert_eq!(nested.get("a"), Some(&AnswerValue::Text("1".to_string())));
    }

    #[test]
    fn non_object_payloads_degrade_to_empty() {
        assert!(extract_answers(&json!(null)).is_empty());
        assert!(extract_answers(&json!("text")).is_empty());
        assert!(extract_answers(&json!([1, 2, 3])).is_empty());
        assert!(extract_answers(&json!(42)).is_empty());
    }

    #[test]
    fn narrows_values_and_drops_the_rest() {
        let map = extract_answers(&json!({
            "kept_text": "yes",
            "kept_null": null,
            "kept_list": ["a", "b"],
            "dropped_number": 3,
            "dropped_object": { "x": 1 },
            "dropped_mixed_list": ["a", 2],
        }));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("kept_null"), Some(&AnswerValue::Null));
        assert_eq!(
            map.get("kept_list"),
            Some(&AnswerValue::Multi(vec!["a".to_string(), "b".to_string()]))
        );
        assert!(!map.contains_key("dropped_number"));
        assert!(!map.contains_key("dropped_mixed_list"));
    }

    #[test]
    fn nested_answers_win_over_flat_siblings() {
        let map = extract_answers(&json!({
            "answers": { "a": "1" },
            "stray": "ignored",
        }));
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("a"));
    }

    #[test]
    fn answers_field_as_array_falls_back_to_flat() {
        let map = extract_answers(&json!({
            "answers": ["not", "a", "map"],
            "a": "1",
        }));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&AnswerValue::Text("1".to_string())));
    }

    #[test]
    fn probes_container_fields_in_fixed_order() {
        let bare = json!([{ "id": "s1" }]);
        assert_eq!(submission_rows(&bare).map(<[Value]>::len), Some(1));

        let under_rows = json!({ "rows": [{}, {}] });
        assert_eq!(submission_rows(&under_rows).map(<[Value]>::len), Some(2));

        // "submissions" outranks "rows" when both are present.
        let both = json!({ "rows": [{}], "submissions": [{}, {}, {}] });
        assert_eq!(submission_rows(&both).map(<[Value]>::len), Some(3));

        assert!(submission_rows(&json!({ "data": "not-an-array" })).is_none());
        assert!(submission_rows(&json!("scalar")).is_none());
    }
}
