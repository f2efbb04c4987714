//! Wire shapes exchanged with the forms backend.
//!
//! Responses use camelCase keys, save requests use PascalCase keys. The
//! validation record keeps camelCase keys in both.

use crate::model::form::Theme;
use serde::{Deserialize, Serialize};

/// Validation record as stored by the backend; every field type carries one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRecord {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfiguration {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub validation: ValidationRecord,
    #[serde(default)]
    pub default_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendFormResponse {
    pub form_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub created_by: i64,
    #[serde(default)]
    pub modified_date: String,
    #[serde(default)]
    pub modified_by: i64,
    #[serde(default)]
    pub form_fields: Vec<BackendFormFieldResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendFormFieldResponse {
    pub field_id: i64,
    pub form_id: i64,
    pub label: String,
    pub field_type_id: i32,
    pub is_required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub created_by: i64,
    #[serde(default)]
    pub modified_date: String,
    #[serde(default)]
    pub modified_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<FieldConfiguration>,
}

/// Body of `POST /forms` and `PUT /forms/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaveFormRequest {
    pub form: FormPayload,
    pub form_fields: Vec<FormFieldPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormPayload {
    /// 0 for a form the backend has not created yet.
    pub form_id: i64,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub theme: Theme,
    pub modified_by: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormFieldPayload {
    /// 0 for a field the backend has not created yet.
    pub field_id: i64,
    pub form_id: i64,
    pub label: String,
    pub field_type_id: i32,
    pub is_required: bool,
    pub placeholder: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_by: i64,
    pub modified_by: i64,
    pub configuration: FieldConfigurationPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldConfigurationPayload {
    pub options: Vec<String>,
    pub validation: ValidationRecord,
    pub default_value: String,
}
