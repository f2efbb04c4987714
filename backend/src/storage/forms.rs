//! Backend form records: one `forms` row plus its `form_fields` rows.
//!
//! Requests come in as [`SaveFormRequest`] and are stored with server-assigned
//! ids and audit dates; reads produce [`BackendFormResponse`]s with fields in
//! sort order.

use crate::storage::{Database, StorageError};
use chrono::Utc;
use common::model::dto::{
    BackendFormFieldResponse, BackendFormResponse, FieldConfiguration, FormFieldPayload,
    SaveFormRequest,
};
use common::model::form::Theme;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::HashSet;

/// A `forms` row before its JSON column is decoded.
struct FormRow {
    form_id: i64,
    title: String,
    description: String,
    is_active: bool,
    theme: String,
    created_date: String,
    created_by: i64,
    modified_date: String,
    modified_by: i64,
}

/// A `form_fields` row before its JSON column is decoded.
struct FieldRow {
    field_id: i64,
    form_id: i64,
    label: String,
    field_type_id: i32,
    is_required: bool,
    placeholder: Option<String>,
    sort_order: i32,
    is_active: bool,
    created_date: String,
    created_by: i64,
    modified_date: String,
    modified_by: i64,
    configuration: String,
}

const FORM_COLUMNS: &str = "form_id, title, description, is_active, theme, \
    created_date, created_by, modified_date, modified_by";

const FIELD_COLUMNS: &str = "field_id, form_id, label, field_type_id, is_required, \
    placeholder, sort_order, is_active, created_date, created_by, modified_date, \
    modified_by, configuration";

fn read_form_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FormRow> {
    Ok(FormRow {
        form_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        is_active: row.get(3)?,
        theme: row.get(4)?,
        created_date: row.get(5)?,
        created_by: row.get(6)?,
        modified_date: row.get(7)?,
        modified_by: row.get(8)?,
    })
}

fn read_field_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FieldRow> {
    Ok(FieldRow {
        field_id: row.get(0)?,
        form_id: row.get(1)?,
        label: row.get(2)?,
        field_type_id: row.get(3)?,
        is_required: row.get(4)?,
        placeholder: row.get(5)?,
        sort_order: row.get(6)?,
        is_active: row.get(7)?,
        created_date: row.get(8)?,
        created_by: row.get(9)?,
        modified_date: row.get(10)?,
        modified_by: row.get(11)?,
        configuration: row.get(12)?,
    })
}

fn load_fields(conn: &Connection, form_id: i64) -> Result<Vec<BackendFormFieldResponse>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM form_fields WHERE form_id = ?1 ORDER BY sort_order, field_id",
        FIELD_COLUMNS
    ))?;
    let rows = stmt
        .query_map(params![form_id], read_field_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|row| {
            let configuration: FieldConfiguration = serde_json::from_str(&row.configuration)?;
            Ok(BackendFormFieldResponse {
                field_id: row.field_id,
                form_id: row.form_id,
                label: row.label,
                field_type_id: row.field_type_id,
                is_required: row.is_required,
                placeholder: row.placeholder,
                sort_order: row.sort_order,
                is_active: row.is_active,
                created_date: row.created_date,
                created_by: row.created_by,
                modified_date: row.modified_date,
                modified_by: row.modified_by,
                configuration: Some(configuration),
            })
        })
        .collect()
}

fn assemble(conn: &Connection, row: FormRow) -> Result<BackendFormResponse, StorageError> {
    let theme: Theme = serde_json::from_str(&row.theme)?;
    Ok(BackendFormResponse {
        form_fields: load_fields(conn, row.form_id)?,
        form_id: row.form_id,
        title: row.title,
        description: row.description,
        is_active: row.is_active,
        theme,
        created_date: row.created_date,
        created_by: row.created_by,
        modified_date: row.modified_date,
        modified_by: row.modified_by,
    })
}

/// Every stored form, oldest first.
pub fn list_forms(db: &Database) -> Result<Vec<BackendFormResponse>, StorageError> {
    let conn = db.connect()?;
    let mut stmt = conn.prepare(&format!("SELECT {} FROM forms ORDER BY form_id", FORM_COLUMNS))?;
    let rows = stmt
        .query_map([], read_form_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|row| assemble(&conn, row)).collect()
}

pub fn get_form(db: &Database, form_id: i64) -> Result<BackendFormResponse, StorageError> {
    let conn = db.connect()?;
    let row = conn
        .query_row(
            &format!("SELECT {} FROM forms WHERE form_id = ?1", FORM_COLUMNS),
            params![form_id],
            read_form_row,
        )
        .optional()?
        .ok_or(StorageError::NotFound(form_id))?;
    assemble(&conn, row)
}

/// Stores a new form. Ids in the request are ignored.
pub fn create_form(
    db: &Database,
    request: &SaveFormRequest,
    actor: i64,
) -> Result<BackendFormResponse, StorageError> {
    let mut conn = db.connect()?;
    let tx = conn.transaction()?;
    let now = Utc::now().to_rfc3339();
    let actor = acting_user(request.form.modified_by, actor);

    tx.execute(
        "INSERT INTO forms (title, description, is_active, theme, created_date, created_by, \
         modified_date, modified_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?5, ?6)",
        params![
            request.form.title,
            request.form.description,
            request.form.is_active,
            serde_json::to_string(&request.form.theme)?,
            now,
            actor,
        ],
    )?;
    let form_id = tx.last_insert_rowid();

    for field in &request.form_fields {
        insert_field(&tx, form_id, field, &now, actor)?;
    }
    tx.commit()?;

    get_form(db, form_id)
}

/// Replaces a stored form's content.
///
/// Fields whose id belongs to the form are updated in place, fields with
/// id 0 (or a foreign id) are inserted, stored fields missing from the
/// request are deleted.
pub fn update_form(
    db: &Database,
    form_id: i64,
    request: &SaveFormRequest,
    actor: i64,
) -> Result<BackendFormResponse, StorageError> {
    let mut conn = db.connect()?;
    let tx = conn.transaction()?;
    let now = Utc::now().to_rfc3339();
    let actor = acting_user(request.form.modified_by, actor);

    let updated = tx.execute(
        "UPDATE forms SET title = ?1, description = ?2, is_active = ?3, theme = ?4, \
         modified_date = ?5, modified_by = ?6 WHERE form_id = ?7",
        params![
            request.form.title,
            request.form.description,
            request.form.is_active,
            serde_json::to_string(&request.form.theme)?,
            now,
            actor,
            form_id,
        ],
    )?;
    if updated == 0 {
        return Err(StorageError::NotFound(form_id));
    }

    let existing: HashSet<i64> = tx
        .prepare("SELECT field_id FROM form_fields WHERE form_id = ?1")?
        .query_map(params![form_id], |row| row.get(0))?
        .collect::<Result<_, _>>()?;

    let mut kept = HashSet::new();
    for field in &request.form_fields {
        if existing.contains(&field.field_id) {
            tx.execute(
                "UPDATE form_fields SET label = ?1, field_type_id = ?2, is_required = ?3, \
                 placeholder = ?4, sort_order = ?5, is_active = ?6, modified_date = ?7, \
                 modified_by = ?8, configuration = ?9 WHERE field_id = ?10",
                params![
                    field.label,
                    field.field_type_id,
                    field.is_required,
                    placeholder_column(field),
                    field.sort_order,
                    field.is_active,
                    now,
                    actor,
                    configuration_column(field)?,
                    field.field_id,
                ],
            )?;
            kept.insert(field.field_id);
        } else {
            kept.insert(insert_field(&tx, form_id, field, &now, actor)?);
        }
    }

    for stale in existing.difference(&kept) {
        tx.execute("DELETE FROM form_fields WHERE field_id = ?1", params![stale])?;
    }
    tx.commit()?;

    get_form(db, form_id)
}

pub fn delete_form(db: &Database, form_id: i64) -> Result<(), StorageError> {
    let mut conn = db.connect()?;
    let tx = conn.transaction()?;
    let deleted = tx.execute("DELETE FROM forms WHERE form_id = ?1", params![form_id])?;
    if deleted == 0 {
        return Err(StorageError::NotFound(form_id));
    }
    tx.execute("DELETE FROM form_fields WHERE form_id = ?1", params![form_id])?;
    tx.commit()?;
    Ok(())
}

fn insert_field(
    tx: &Transaction<'_>,
    form_id: i64,
    field: &FormFieldPayload,
    now: &str,
    actor: i64,
) -> Result<i64, StorageError> {
    tx.execute(
        "INSERT INTO form_fields (form_id, label, field_type_id, is_required, placeholder, \
         sort_order, is_active, created_date, created_by, modified_date, modified_by, \
         configuration) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?8, ?9, ?10)",
        params![
            form_id,
            field.label,
            field.field_type_id,
            field.is_required,
            placeholder_column(field),
            field.sort_order,
            field.is_active,
            now,
            acting_user(field.created_by, actor),
            configuration_column(field)?,
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn placeholder_column(field: &FormFieldPayload) -> Option<&str> {
    Some(field.placeholder.as_str()).filter(|p| !p.is_empty())
}

fn configuration_column(field: &FormFieldPayload) -> Result<String, serde_json::Error> {
    serde_json::to_string(&FieldConfiguration {
        options: field.configuration.options.clone(),
        validation: field.configuration.validation.clone(),
        default_value: field.configuration.default_value.clone(),
    })
}

/// The user named in the request, or the service's configured one.
fn acting_user(requested: i64, configured: i64) -> i64 {
    if requested > 0 {
        requested
    } else {
        configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::mapper;
    use common::model::field::{Field, FieldKind, TextRules};
    use common::model::field_type::FieldType;
    use common::model::form::Form;
    use common::storage::MemoryStore;
    use common::workspace::Workspace;
    use tempfile::{tempdir, TempDir};

    fn database() -> (TempDir, Database) {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("forms.sqlite"));
        (dir, db)
    }

    fn request() -> SaveFormRequest {
        let mut email = Field::new(FieldType::Text);
        email.label = "Email".into();
        email.required = true;
        email.kind = FieldKind::Text {
            validation: TextRules {
                pattern: Some(".+@.+".into()),
                ..TextRules::default()
            },
        };
        let form = Form {
            id: Some("local".into()),
            title: "Signup".into(),
            fields: vec![email, Field::new(FieldType::Radio)],
            ..Form::default()
        };
        mapper::to_backend(&form)
    }

    #[test]
    fn create_assigns_ids_and_audit_data() {
        let (_dir, db) = database();
        let stored = create_form(&db, &request(), 9).unwrap();

        assert!(stored.form_id > 0);
        assert_eq!(stored.title, "Signup");
        assert_eq!(stored.created_by, 1);
        assert!(!stored.created_date.is_empty());
        assert_eq!(stored.form_fields.len(), 2);
        assert!(stored.form_fields.iter().all(|f| f.field_id > 0 && f.form_id == stored.form_id));
        let config = stored.form_fields[0].configuration.as_ref().unwrap();
        assert_eq!(config.validation.pattern, ".+@.+");
        assert_eq!(stored.form_fields[1].configuration.as_ref().unwrap().options.len(), 2);

        assert_eq!(get_form(&db, stored.form_id).unwrap(), stored);
        assert_eq!(list_forms(&db).unwrap(), vec![stored]);
    }

    #[test]
    fn configured_actor_fills_missing_user() {
        let (_dir, db) = database();
        let mut anonymous = request();
        anonymous.form.modified_by = 0;
        let stored = create_form(&db, &anonymous, 9).unwrap();
        assert_eq!(stored.modified_by, 9);
    }

    #[test]
    fn update_keeps_updates_inserts_and_drops_fields() {
        let (_dir, db) = database();
        let stored = create_form(&db, &request(), 1).unwrap();
        let kept_id = stored.form_fields[0].field_id;
        let dropped_id = stored.form_fields[1].field_id;

        let mut form = mapper::from_backend(stored.clone());
        form.title = "Signup v2".into();
        form.fields[0].label = "Work email".into();
        form.fields.remove(1);
        form.fields.push(Field::new(FieldType::Date));

        let updated = update_form(&db, stored.form_id, &mapper::to_backend(&form), 1).unwrap();
        assert_eq!(updated.title, "Signup v2");
        assert_eq!(updated.created_date, stored.created_date);
        let ids: Vec<_> = updated.form_fields.iter().map(|f| f.field_id).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], kept_id);
        assert!(!ids.contains(&dropped_id));
        assert_eq!(updated.form_fields[0].label, "Work email");
        assert_eq!(updated.form_fields[1].field_type_id, FieldType::Date.code());
    }

    fn stored_abc(db: &Database) -> BackendFormResponse {
        let fields = [("A", FieldType::Text), ("B", FieldType::Date), ("C", FieldType::File)]
            .into_iter()
            .map(|(label, field_type)| {
                let mut field = Field::new(field_type);
                field.label = label.into();
                field
            })
            .collect();
        let form = Form {
            id: Some("local".into()),
            title: "Letters".into(),
            fields,
            ..Form::default()
        };
        create_form(db, &mapper::to_backend(&form), 1).unwrap()
    }

    fn editing(stored: BackendFormResponse) -> Workspace<MemoryStore> {
        let mut ws = Workspace::new(MemoryStore::new());
        ws.load_form(Ok::<_, StorageError>(stored)).unwrap();
        ws
    }

    #[test]
    fn copied_field_is_bound_to_its_own_row() {
        let (_dir, db) = database();
        let stored = stored_abc(&db);
        let mut ws = editing(stored.clone());
        let a_id = ws.current_form().fields[0].id.clone();
        ws.duplicate_field(&a_id).unwrap();

        let request = ws.prepare_backend_save(1).unwrap();
        let updated = update_form(&db, stored.form_id, &request, 1).unwrap();
        ws.apply_backend_save(updated.clone()).unwrap();

        assert_eq!(ws.current_form().fields.len(), 4);
        for field in &ws.current_form().fields {
            let row = updated
                .form_fields
                .iter()
                .find(|row| Some(row.field_id) == field.field_id)
                .unwrap();
            assert_eq!(row.label, field.label);
            assert_eq!(row.field_type_id, field.field_type().code());
        }
    }

    #[test]
    fn moved_field_keeps_its_position_after_save() {
        let (_dir, db) = database();
        let stored = stored_abc(&db);
        let mut ws = editing(stored.clone());
        let c_id = ws.current_form().fields[2].id.clone();
        ws.move_field(&c_id, 0).unwrap();

        let request = ws.prepare_backend_save(1).unwrap();
        update_form(&db, stored.form_id, &request, 1).unwrap();

        let reloaded = mapper::from_backend(get_form(&db, stored.form_id).unwrap());
        let labels: Vec<_> = reloaded.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "A", "B"]);
        let ids: Vec<_> = reloaded.fields.iter().map(|f| f.field_id).collect();
        let before: Vec<_> = [2, 0, 1]
            .iter()
            .map(|&i| Some(stored.form_fields[i].field_id))
            .collect();
        assert_eq!(ids, before);
    }

    #[test]
    fn missing_forms_are_not_found() {
        let (_dir, db) = database();
        assert!(matches!(get_form(&db, 4), Err(StorageError::NotFound(4))));
        assert!(matches!(
            update_form(&db, 4, &request(), 1),
            Err(StorageError::NotFound(4))
        ));
        assert!(matches!(delete_form(&db, 4), Err(StorageError::NotFound(4))));
    }

    #[test]
    fn delete_removes_form_and_fields() {
        let (_dir, db) = database();
        let stored = create_form(&db, &request(), 1).unwrap();
        delete_form(&db, stored.form_id).unwrap();
        assert!(list_forms(&db).unwrap().is_empty());

        let conn = db.connect().unwrap();
        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM form_fields", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
