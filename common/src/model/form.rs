use crate::model::field::Field;
use serde::{Deserialize, Serialize};

/// Colors applied to a rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub background_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#4f46e5".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

/// A named color offered by the theme panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub name: &'static str,
    pub value: &'static str,
}

pub const PRIMARY_COLOR_PRESETS: [ColorOption; 8] = [
    ColorOption { name: "Indigo", value: "#4f46e5" },
    ColorOption { name: "Blue", value: "#3b82f6" },
    ColorOption { name: "Green", value: "#10b981" },
    ColorOption { name: "Red", value: "#ef4444" },
    ColorOption { name: "Purple", value: "#8b5cf6" },
    ColorOption { name: "Pink", value: "#ec4899" },
    ColorOption { name: "Yellow", value: "#f59e0b" },
    ColorOption { name: "Gray", value: "#6b7280" },
];

/// A form as edited and stored locally.
///
/// `id` is the client-local token given at creation. `form_id` and the audit
/// fields are only filled in once the backend has stored the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub theme: Theme,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<i64>,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            id: None,
            title: "Untitled Form".to_string(),
            description: String::new(),
            fields: Vec::new(),
            theme: Theme::default(),
            form_id: None,
            is_active: None,
            created_date: None,
            created_by: None,
            modified_date: None,
            modified_by: None,
        }
    }
}

impl Form {
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Created locally but never stored by the backend.
    pub fn is_unsynced(&self) -> bool {
        self.id.is_some() && self.form_id.is_none()
    }
}

/// Partial theme change; unset keys keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeUpdate {
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
}

/// Partial change to the form being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<Field>>,
    pub theme: Option<ThemeUpdate>,
}

impl FormUpdate {
    pub fn apply(self, form: &mut Form) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(fields) = self.fields {
            form.fields = fields;
        }
        if let Some(theme) = self.theme {
            if let Some(primary) = theme.primary_color {
                form.theme.primary_color = primary;
            }
            if let Some(background) = theme.background_color {
                form.theme.background_color = background;
            }
        }
    }
}
