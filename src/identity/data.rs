use serde::{Deserialize, Serialize};

use crate::tasks::data::TaskID;

use std::collections::HashMap;

/// Salted SHA-256 of a user's secret, both hex encoded.
#[derive(Debug, Clone)]
pub struct Credential {
    pub salt: String,
    pub digest: String,
}

/// Users known to this process. Never persisted.
#[derive(Debug, Default)]
pub struct UserDirectory {
    pub users: HashMap<String, Credential>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: Option<String>,
    /// Task the add/update form is currently editing.
    pub editing: Option<TaskID>,
    pub message: Option<String>,
}
