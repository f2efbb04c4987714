use crate::model::field::Field;
use crate::validation::compile_full_match;
use thiserror::Error;

/// Reasons a field definition cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldConfigError {
    #[error("Field label is required")]
    MissingLabel,
    #[error("At least one option is required for this field type")]
    NoOptions,
    #[error("All options must have non-empty values")]
    BlankOption,
    #[error("Min Length cannot be greater than Max Length")]
    LengthRange { min: usize, max: usize },
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),
}

/// Checks a field definition before it is stored.
pub fn check_field(field: &Field) -> Result<(), FieldConfigError> {
    if field.label.trim().is_empty() {
        return Err(FieldConfigError::MissingLabel);
    }

    if field.field_type().has_options() {
        let options = field.kind.options();
        if options.is_empty() {
            return Err(FieldConfigError::NoOptions);
        }
        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(FieldConfigError::BlankOption);
        }
    }

    if let Some(rules) = field.kind.text_rules() {
        if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
            if min > max {
                return Err(FieldConfigError::LengthRange { min, max });
            }
        }
        if let Some(pattern) = rules.active_pattern() {
            compile_full_match(pattern)
                .map_err(|e| FieldConfigError::InvalidPattern(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldKind, TextRules};
    use crate::model::field_type::FieldType;

    #[test]
    fn new_fields_pass() {
        for field_type in FieldType::ALL {
            assert_eq!(check_field(&Field::new(field_type)), Ok(()));
        }
    }

    #[test]
    fn label_must_not_be_blank() {
        let mut field = Field::new(FieldType::Date);
        field.label = "  ".into();
        assert_eq!(check_field(&field), Err(FieldConfigError::MissingLabel));
    }

    #[test]
    fn choice_fields_need_non_blank_options() {
        let mut field = Field::new(FieldType::Radio);
        field.kind = FieldKind::Radio { options: vec![] };
        assert_eq!(check_field(&field), Err(FieldConfigError::NoOptions));

        field.kind = FieldKind::Radio {
            options: vec!["Yes".into(), " ".into()],
        };
        assert_eq!(check_field(&field), Err(FieldConfigError::BlankOption));
    }

    #[test]
    fn length_range_and_pattern() {
        let mut field = Field::new(FieldType::Text);
        field.kind = FieldKind::Text {
            validation: TextRules {
                min_length: Some(6),
                max_length: Some(2),
                pattern: None,
            },
        };
        assert_eq!(
            check_field(&field),
            Err(FieldConfigError::LengthRange { min: 6, max: 2 })
        );

        field.kind = FieldKind::Text {
            validation: TextRules {
                min_length: Some(2),
                max_length: Some(2),
                pattern: Some("(unclosed".into()),
            },
        };
        assert!(matches!(
            check_field(&field),
            Err(FieldConfigError::InvalidPattern(_))
        ));
    }
}
