use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed palette of form controls a field can be built from.
///
/// Each variant has a stable string identifier (used in stored forms), a
/// display name shown in the builder palette and a numeric code matching the
/// `FieldTypes` table of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Dropdown,
    Rating,
    Date,
    File,
}

impl FieldType {
    /// Palette order, which is also backend code order.
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Dropdown,
        FieldType::Rating,
        FieldType::Date,
        FieldType::File,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Dropdown => "dropdown",
            FieldType::Rating => "rating",
            FieldType::Date => "date",
            FieldType::File => "file",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FieldType::Text => "Text Input",
            FieldType::Textarea => "Text Area",
            FieldType::Radio => "Radio Buttons",
            FieldType::Checkbox => "Checkboxes",
            FieldType::Dropdown => "Dropdown",
            FieldType::Rating => "Star Rating",
            FieldType::Date => "Date Picker",
            FieldType::File => "File Upload",
        }
    }

    /// Numeric code used by the backend wire format.
    pub fn code(self) -> i32 {
        match self {
            FieldType::Text => 1,
            FieldType::Textarea => 2,
            FieldType::Radio => 3,
            FieldType::Checkbox => 4,
            FieldType::Dropdown => 5,
            FieldType::Rating => 6,
            FieldType::Date => 7,
            FieldType::File => 8,
        }
    }

    pub fn from_code(code: i32) -> Option<FieldType> {
        FieldType::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn from_id(id: &str) -> Option<FieldType> {
        FieldType::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Radio, checkbox and dropdown fields choose from a list of options.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldType::Radio | FieldType::Checkbox | FieldType::Dropdown
        )
    }

    /// Text and textarea fields accept length and pattern rules.
    pub fn supports_text_rules(self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
