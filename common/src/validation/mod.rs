//! Validation of submitted answers against a form's field rules.
//!
//! Failures are returned as values: a non-empty [`FormErrors`] blocks the
//! submission and is shown next to each field. A rule pattern that does not
//! compile is logged and skipped, never reported to the person filling in
//! the form.

mod config;

pub use config::{check_field, FieldConfigError};

use crate::model::field::{Field, TextRules};
use crate::model::form::Form;
use crate::model::submission::{FieldValue, SubmissionData};
use log::warn;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { label: String },
    #[error("{label} must be at least {min} characters long")]
    TooShort { label: String, min: usize },
    #[error("{label} cannot exceed {max} characters")]
    TooLong { label: String, max: usize },
    #[error("{label} format is invalid")]
    InvalidFormat { label: String },
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors per field id; only fields with at least one error appear.
pub type FormErrors = BTreeMap<String, Vec<ValidationError>>;

/// Checks one answer against `field`. A missing answer is passed as `None`.
pub fn validate_field(field: &Field, value: Option<&FieldValue>) -> Vec<ValidationError> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ if field.required => {
            return vec![ValidationError::Required {
                label: field.label.clone(),
            }];
        }
        _ => return Vec::new(),
    };

    match (field.kind.text_rules(), value.as_text()) {
        (Some(rules), Some(text)) => check_text(&field.label, rules, text),
        _ => Vec::new(),
    }
}

/// Runs [`validate_field`] for every field of `form`.
pub fn validate_all(form: &Form, data: &SubmissionData) -> FormErrors {
    form.fields
        .iter()
        .filter_map(|field| {
            let errors = validate_field(field, data.get(&field.id));
            (!errors.is_empty()).then(|| (field.id.clone(), errors))
        })
        .collect()
}

fn check_text(label: &str, rules: &TextRules, text: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let length = text.chars().count();

    if let Some(min) = rules.min() {
        if length < min {
            errors.push(ValidationError::TooShort {
                label: label.to_string(),
                min,
            });
        }
    }
    if let Some(max) = rules.max() {
        if length > max {
            errors.push(ValidationError::TooLong {
                label: label.to_string(),
                max,
            });
        }
    }

    if let Some(pattern) = rules.active_pattern() {
        match compile_full_match(pattern) {
            Ok(re) => {
                if !re.is_match(text) {
                    errors.push(ValidationError::InvalidFormat {
                        label: label.to_string(),
                    });
                }
            }
            Err(e) => warn!("Invalid regex pattern for field {}: {}", label, e),
        }
    }

    errors
}

/// Compiles `pattern` so that it has to match the whole input.
pub(crate) fn compile_full_match(pattern: &str) -> Result<Regex, regex::Error> {
    // The bare pattern is compiled first so that errors point at the user's text.
    Regex::new(pattern)?;
    Regex::new(&format!("^(?:{})$", pattern))
}
