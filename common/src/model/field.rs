use crate::model::field_type::FieldType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length and pattern rules of a text or textarea field.
///
/// A zero length limit behaves like an absent one. A blank pattern is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRules {
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl TextRules {
    pub fn min(&self) -> Option<usize> {
        self.min_length.filter(|&n| n > 0)
    }

    pub fn max(&self) -> Option<usize> {
        self.max_length.filter(|&n| n > 0)
    }

    /// The pattern, if one is set and not blank.
    pub fn active_pattern(&self) -> Option<&str> {
        self.pattern
            .as_deref()
            .filter(|pattern| !pattern.trim().is_empty())
    }
}

/// The control kind of a field, with the attributes that only make sense for it.
///
/// Stored as `"type": "<id>"` next to the variant's own keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        validation: TextRules,
    },
    Textarea {
        #[serde(default)]
        validation: TextRules,
    },
    Radio {
        #[serde(default)]
        options: Vec<String>,
    },
    Checkbox {
        #[serde(default)]
        options: Vec<String>,
    },
    Dropdown {
        #[serde(default)]
        options: Vec<String>,
    },
    Rating,
    Date,
    File,
}

impl FieldKind {
    /// Builds the kind of the given type with `options` and `rules` applied
    /// where the type accepts them; the other one is dropped.
    pub fn with_parts(field_type: FieldType, options: Vec<String>, rules: TextRules) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text { validation: rules },
            FieldType::Textarea => FieldKind::Textarea { validation: rules },
            FieldType::Radio => FieldKind::Radio { options },
            FieldType::Checkbox => FieldKind::Checkbox { options },
            FieldType::Dropdown => FieldKind::Dropdown { options },
            FieldType::Rating => FieldKind::Rating,
            FieldType::Date => FieldKind::Date,
            FieldType::File => FieldKind::File,
        }
    }

    /// Fresh kind for a field dropped from the palette.
    pub fn default_for(field_type: FieldType) -> Self {
        let options = if field_type.has_options() {
            vec!["Option 1".to_string(), "Option 2".to_string()]
        } else {
            Vec::new()
        };
        FieldKind::with_parts(field_type, options, TextRules::default())
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Textarea { .. } => FieldType::Textarea,
            FieldKind::Radio { .. } => FieldType::Radio,
            FieldKind::Checkbox { .. } => FieldType::Checkbox,
            FieldKind::Dropdown { .. } => FieldType::Dropdown,
            FieldKind::Rating => FieldType::Rating,
            FieldKind::Date => FieldType::Date,
            FieldKind::File => FieldType::File,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Radio { options }
            | FieldKind::Checkbox { options }
            | FieldKind::Dropdown { options } => options,
            _ => &[],
        }
    }

    pub fn text_rules(&self) -> Option<&TextRules> {
        match self {
            FieldKind::Text { validation } | FieldKind::Textarea { validation } => {
                Some(validation)
            }
            _ => None,
        }
    }
}

/// One control of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: String,

    // Backend bookkeeping, absent until the form has been stored remotely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Field {
    /// A new field of `field_type` labelled `New <display name>`.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: FieldKind::default_for(field_type),
            label: format!("New {}", field_type.display_name()),
            placeholder: String::new(),
            required: false,
            default_value: String::new(),
            field_id: None,
            form_id: None,
            sort_order: None,
            is_active: None,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_type_tag_next_to_variant_attributes() {
        let mut field = Field::new(FieldType::Dropdown);
        field.id = "f1".into();
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "dropdown");
        assert_eq!(value["options"], json!(["Option 1", "Option 2"]));
        assert_eq!(value["label"], "New Dropdown");
        assert!(value.get("validation").is_none());
        assert!(value.get("fieldId").is_none());
    }

    #[test]
    fn reads_stored_text_field() {
        let field: Field = serde_json::from_value(json!({
            "id": "1700000000000",
            "type": "text",
            "label": "Name",
            "placeholder": "Your name",
            "required": true,
            "validation": { "minLength": 2, "maxLength": null, "pattern": "" },
            "defaultValue": ""
        }))
        .unwrap();

        assert_eq!(field.field_type(), FieldType::Text);
        let rules = field.kind.text_rules().unwrap();
        assert_eq!(rules.min(), Some(2));
        assert_eq!(rules.max(), None);
        assert_eq!(rules.active_pattern(), None);
    }

    #[test]
    fn zero_limits_are_unset() {
        let rules = TextRules {
            min_length: Some(0),
            max_length: Some(0),
            pattern: Some("   ".into()),
        };
        assert_eq!(rules.min(), None);
        assert_eq!(rules.max(), None);
        assert_eq!(rules.active_pattern(), None);
    }

    #[test]
    fn with_parts_drops_attributes_the_kind_does_not_carry() {
        let rules = TextRules {
            min_length: Some(1),
            ..TextRules::default()
        };
        let kind = FieldKind::with_parts(FieldType::Rating, vec!["a".into()], rules);
        assert_eq!(kind, FieldKind::Rating);
        assert!(kind.options().is_empty());
        assert!(kind.text_rules().is_none());
    }
}
