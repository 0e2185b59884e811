use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::{auth::repo_types::User, db::Document, error::AppError};

const TOKEN_LEN: usize = 48;

/// Fresh opaque bearer token.
pub fn new_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Resolve a bearer token to its user within a loaded document.
pub fn resolve<'a>(doc: &'a Document, token: &str) -> Result<&'a User, AppError> {
    if token.is_empty() {
        return Err(AppError::unauthorized());
    }
    User::find_by_session(doc, token).ok_or_else(AppError::unauthorized)
}
