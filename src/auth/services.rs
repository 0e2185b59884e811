//! Identity operations over a loaded document.
//!
//! Argon2 never runs here. Handlers hash before taking the write lock, and
//! login verifies against a read snapshot ([`login_candidate`]) before
//! [`start_session`] takes the lock to store the token.

use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{repo_types::User, session},
    db::Document,
    error::AppError,
};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub id: String,
    pub email: String,
    pub session_token: String,
}

/// Append a new user. `email` must already be normalized.
pub fn register_user(
    doc: &mut Document,
    email: &str,
    password_hash: String,
    now: OffsetDateTime,
) -> Result<User, AppError> {
    if User::find_by_email(doc, email).is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict("User already exists".into()));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        password_hash,
        created_at: now,
        session: None,
    };
    doc.users.push(user.clone());
    info!(user_id = %user.id, %email, "user registered");
    Ok(user)
}

/// Credentials a login attempt is checked against, copied out of a snapshot.
#[derive(Debug, Clone)]
pub struct LoginCandidate {
    pub user_id: String,
    pub password_hash: String,
}

/// Look up the user for a login. Unknown email is `invalid_credentials`, the
/// same error a wrong password gets.
pub fn login_candidate(doc: &Document, email: &str) -> Result<LoginCandidate, AppError> {
    let Some(user) = User::find_by_email(doc, email) else {
        warn!(%email, "login unknown email");
        return Err(AppError::invalid_credentials());
    };
    Ok(LoginCandidate {
        user_id: user.id.clone(),
        password_hash: user.password_hash.clone(),
    })
}

/// Replace the session token of a user whose password was verified against
/// `candidate`. Fails if the digest changed since the snapshot.
pub fn start_session(
    doc: &mut Document,
    candidate: &LoginCandidate,
) -> Result<LoginOutcome, AppError> {
    let user = User::find_by_id_mut(doc, &candidate.user_id)
        .filter(|u| u.password_hash == candidate.password_hash)
        .ok_or_else(|| {
            warn!(user_id = %candidate.user_id, "credentials changed during login");
            AppError::invalid_credentials()
        })?;

    let token = session::new_token();
    user.session = Some(token.clone());
    info!(user_id = %user.id, email = %user.email, "user logged in");

    Ok(LoginOutcome {
        id: user.id.clone(),
        email: user.email.clone(),
        session_token: token,
    })
}

/// Replace the stored digest. Existing sessions stay valid.
pub fn reset_password(
    doc: &mut Document,
    email: &str,
    new_password_hash: String,
) -> Result<(), AppError> {
    let user = User::find_by_email_mut(doc, email)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    user.password_hash = new_password_hash;
    info!(user_id = %user.id, "password reset");
    Ok(())
}
