use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// User record in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,                 // opaque unique id
    pub email: String,              // trimmed + lowercased
    pub password_hash: String,      // Argon2 PHC string
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime, // creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,    // current bearer token, if logged in
}
