use crate::model::submission::SubmissionData;
use crate::validation::FormErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Request payload for `POST /api/forms/{form_id}/submissions`.
/// Contains the answers keyed by field id.
pub struct SubmitRequest {
    #[serde(default)]
    pub data: SubmissionData,
}

#[derive(Debug, Clone, Serialize)]
/// Body of the `422` response when a submission fails validation.
pub struct ValidationFailure {
    pub errors: FormErrors,
}
