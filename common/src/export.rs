//! CSV and JSON export of a form's submissions.

use crate::model::form::Form;
use crate::model::submission::FormSubmission;
use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export buffer error: {0}")]
    Buffer(String),
}

/// A text file ready to be handed to the user as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// One row per submission under a `Timestamp, <label>...` header. Data cells
/// are always quoted; header cells only when a label needs it.
/// `None` when there is nothing to export.
pub fn to_csv(form: &Form, submissions: &[FormSubmission]) -> Result<Option<ExportFile>, ExportError> {
    if submissions.is_empty() {
        return Ok(None);
    }

    let mut header_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    let header = std::iter::once("Timestamp").chain(form.fields.iter().map(|f| f.label.as_str()));
    header_writer.write_record(header)?;
    let header_bytes = header_writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(header_bytes);

    for submission in submissions {
        let mut row = Vec::with_capacity(form.fields.len() + 1);
        row.push(submission.timestamp.format(TIMESTAMP_FORMAT).to_string());
        for field in &form.fields {
            row.push(
                submission
                    .value(&field.id)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let content = String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))?;

    Ok(Some(ExportFile {
        filename: format!("{}_submissions.csv", form.title),
        mime_type: "text/csv",
        content,
    }))
}

/// The raw submission records, pretty-printed.
pub fn to_json(form: &Form, submissions: &[FormSubmission]) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        filename: format!("{}_submissions.json", form.title),
        mime_type: "application/json",
        content: serde_json::to_string_pretty(submissions)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::Field;
    use crate::model::field_type::FieldType;
    use crate::model::submission::{FieldValue, SubmissionData};
    use chrono::{TimeZone, Utc};

    fn contact_form() -> Form {
        let mut name = Field::new(FieldType::Text);
        name.id = "name".into();
        name.label = "Name".into();
        let mut topics = Field::new(FieldType::Checkbox);
        topics.id = "topics".into();
        topics.label = "Topics".into();
        let mut stars = Field::new(FieldType::Rating);
        stars.id = "stars".into();
        stars.label = "Stars".into();
        Form {
            id: Some("f1".into()),
            title: "Contact".into(),
            fields: vec![name, topics, stars],
            ..Form::default()
        }
    }

    fn submission(data: SubmissionData) -> FormSubmission {
        FormSubmission {
            id: "s1".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap(),
            data,
        }
    }

    #[test]
    fn csv_of_nothing_is_no_file() {
        assert_eq!(to_csv(&contact_form(), &[]).unwrap(), None);
    }

    #[test]
    fn csv_joins_lists_and_blanks_missing_values() {
        let mut data = SubmissionData::new();
        data.insert("name".into(), FieldValue::from("Ada"));
        data.insert("topics".into(), FieldValue::from(vec!["Billing", "Support"]));

        let file = to_csv(&contact_form(), &[submission(data)]).unwrap().unwrap();

        assert_eq!(file.filename, "Contact_submissions.csv");
        assert_eq!(file.mime_type, "text/csv");
        assert_eq!(
            file.content,
            "Timestamp,Name,Topics,Stars\n\
             \"2024-05-17 09:30:00\",\"Ada\",\"Billing; Support\",\"\"\n"
        );
    }

    #[test]
    fn csv_escapes_embedded_quotes() {
        let mut data = SubmissionData::new();
        data.insert("name".into(), FieldValue::from("The \"Boss\""));
        data.insert("stars".into(), FieldValue::Number(5.0));

        let file = to_csv(&contact_form(), &[submission(data)]).unwrap().unwrap();
        let row = file.content.lines().nth(1).unwrap();
        assert_eq!(row, "\"2024-05-17 09:30:00\",\"The \"\"Boss\"\"\",\"\",\"5\"");
    }

    #[test]
    fn csv_header_quotes_only_labels_that_need_it() {
        let mut form = contact_form();
        form.fields[0].label = "Name, full".into();
        form.fields[1].label = "Say \"hi\"".into();

        let file = to_csv(&form, &[submission(SubmissionData::new())]).unwrap().unwrap();
        let header = file.content.lines().next().unwrap();
        assert_eq!(header, "Timestamp,\"Name, full\",\"Say \"\"hi\"\"\",Stars");
    }

    #[test]
    fn json_is_pretty_printed_raw_records() {
        let mut data = SubmissionData::new();
        data.insert("name".into(), FieldValue::from("Ada"));
        let file = to_json(&contact_form(), &[submission(data)]).unwrap();

        assert_eq!(file.filename, "Contact_submissions.json");
        assert!(file.content.starts_with("[\n  {\n    \"id\": \"s1\""));
        let parsed: Vec<FormSubmission> = serde_json::from_str(&file.content).unwrap();
        assert_eq!(parsed[0].value("name"), Some(&FieldValue::from("Ada")));
    }

    #[test]
    fn json_of_nothing_is_an_empty_array() {
        assert_eq!(to_json(&contact_form(), &[]).unwrap().content, "[]");
    }
}
