//! # Submissions Service Module
//!
//! Responses collected for a stored form, kept in the `kv` table under
//! `formSubmissions_{form_id}`.
//!
//! ## Sub-modules:
//! - `list`: every recorded submission of a form.
//! - `submit`: validation and recording of a new submission.
//! - `delete`: removal of one submission.

mod delete;
mod list;
mod submit;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/forms/{form_id}/submissions";

/// Configures and returns the Actix `Scope` for the submission routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `FormSubmission[]` in submission order.
/// *   **`POST /`**: validates a `SubmitRequest`. `201` with the stored
///     submission, `422` with the errors per field id, `400` if the form has
///     no fields.
/// *   **`DELETE /{submission_id}`**: `204 No Content`, `404` when unknown.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(submit::process))
        .route("/{submission_id}", delete().to(delete::process))
}

#[cfg(test)]
mod tests {
    use crate::services::configure;
    use crate::services::testing::{contact_request, state};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::dto::BackendFormResponse;
    use common::model::submission::{FieldValue, FormSubmission, SubmissionData};
    use common::requests::SubmitRequest;
    use serde_json::Value;

    #[actix_web::test]
    async fn submit_list_and_delete() {
        let (_dir, state) = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/forms")
            .set_json(contact_request())
            .to_request();
        let form: BackendFormResponse = test::call_and_read_body_json(&app, req).await;
        let name_id = form.form_fields[0].field_id.to_string();
        let topics_id = form.form_fields[1].field_id.to_string();
        let uri = format!("/api/forms/{}/submissions", form.form_id);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(SubmitRequest::default())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][&name_id][0], "Name is required");
        assert!(body["errors"].get(&topics_id).is_none());

        let mut data = SubmissionData::new();
        data.insert(name_id.clone(), FieldValue::from("Al"));
        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(SubmitRequest { data })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["errors"][&name_id][0],
            "Name must be at least 3 characters long"
        );

        let mut data = SubmissionData::new();
        data.insert(name_id.clone(), FieldValue::from("Alice"));
        data.insert(topics_id, FieldValue::from(vec!["Billing"]));
        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(SubmitRequest { data: data.clone() })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let stored: FormSubmission = test::read_body_json(resp).await;
        assert_eq!(stored.data, data);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let listed: Vec<FormSubmission> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, vec![stored.clone()]);

        let one = format!("{}/{}", uri, stored.id);
        let req = test::TestRequest::delete().uri(&one).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
        let req = test::TestRequest::delete().uri(&one).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get().uri(&uri).to_request();
        let listed: Vec<FormSubmission> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty());
    }

    #[actix_web::test]
    async fn form_without_fields_takes_no_submissions() {
        let (_dir, state) = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let mut empty = contact_request();
        empty.form_fields.clear();
        let req = test::TestRequest::post()
            .uri("/api/forms")
            .set_json(empty)
            .to_request();
        let form: BackendFormResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/forms/{}/submissions", form.form_id))
            .set_json(SubmitRequest::default())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_form_is_not_found() {
        let (_dir, state) = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/forms/9/submissions")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::post()
            .uri("/api/forms/9/submissions")
            .set_json(SubmitRequest::default())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
