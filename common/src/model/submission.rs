use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// A submitted answer.
///
/// Text controls give a string, checkboxes a list of the ticked options and
/// star ratings a number. Untouched controls are `Empty` (JSON `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Empty,
    Text(String),
    List(Vec<String>),
    Number(f64),
}

impl FieldValue {
    /// Absent, empty string or empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Renders lists joined with `"; "`, the form used in CSV exports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::List(items) => f.write_str(&items.join("; ")),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Answers keyed by field id.
pub type SubmissionData = BTreeMap<String, FieldValue>;

/// One completed response to a form. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub data: SubmissionData,
}

impl FormSubmission {
    pub fn new(data: SubmissionData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.data.get(field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_keep_their_json_shape() {
        let data: SubmissionData = serde_json::from_value(json!({
            "name": "Ada",
            "langs": ["Rust", "C"],
            "stars": 4,
            "skipped": null
        }))
        .unwrap();

        assert_eq!(data["name"], FieldValue::from("Ada"));
        assert_eq!(data["langs"], FieldValue::from(vec!["Rust", "C"]));
        assert_eq!(data["stars"], FieldValue::Number(4.0));
        assert!(data["skipped"].is_empty());
        assert_eq!(data["langs"].to_string(), "Rust; C");
        assert_eq!(data["stars"].to_string(), "4");
    }

    #[test]
    fn emptiness() {
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }
}
