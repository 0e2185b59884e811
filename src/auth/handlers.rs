use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{
            present, CredentialsRequest, LoginResponse, MessageResponse, PublicUser,
            ResetPasswordRequest, SignupResponse,
        },
        extractors::SessionToken,
        password::{hash_password, verify_password},
        repo::normalize_email,
        services, session,
    },
    error::AppError,
    extract::JsonBody,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/reset-password", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let (Some(email), Some(password)) = (present(payload.email), present(payload.password))
    else {
        warn!("signup without email or password");
        return Err(AppError::missing("Email and password are required"));
    };
    let email = normalize_email(&email);
    let hash = hash_password(password).await?;

    let user = state
        .db
        .write(|doc| services::register_user(doc, &email, hash, OffsetDateTime::now_utc()))
        .await?;

    Ok(Json(SignupResponse {
        message: "User created".into(),
        email: user.email,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (Some(email), Some(password)) = (present(payload.email), present(payload.password))
    else {
        warn!("login without credentials");
        return Err(AppError::missing("Missing credentials"));
    };
    let email = normalize_email(&email);

    let candidate = state
        .db
        .read(|doc| services::login_candidate(doc, &email))
        .await?;
    if !verify_password(password, candidate.password_hash.clone()).await? {
        warn!(%email, user_id = %candidate.user_id, "login invalid password");
        return Err(AppError::invalid_credentials());
    }

    let out = state
        .db
        .write(|doc| services::start_session(doc, &candidate))
        .await?;

    Ok(Json(LoginResponse {
        id: out.id,
        email: out.email,
        session_token: out.session_token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (Some(email), Some(new_password)) =
        (present(payload.email), present(payload.new_password))
    else {
        warn!("reset without email or new password");
        return Err(AppError::missing("Email and newPassword are required"));
    };
    let email = normalize_email(&email);
    let hash = hash_password(new_password).await?;

    state
        .db
        .write(|doc| services::reset_password(doc, &email, hash))
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".into(),
    }))
}

#[instrument(skip(state, token))]
pub async fn get_me(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<PublicUser>, AppError> {
    let user = state
        .db
        .read(|doc| session::resolve(doc, &token).cloned())
        .await?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_camel_case() {
        let response = LoginResponse {
            id: "u1".into(),
            email: "test@example.com".into(),
            session_token: "tok".into(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionToken"], "tok");
        assert_eq!(json["email"], "test@example.com");
    }

    #[tokio::test]
    async fn signup_rejects_blank_fields() {
        let state = AppState::fake().unwrap();
        let err = signup(
            State(state),
            JsonBody(CredentialsRequest {
                email: Some("a@x.com".into()),
                password: Some("   ".into()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::MissingField(_)));
    }

    #[tokio::test]
    async fn signup_stores_case_folded_email_without_exposing_hash() {
        let state = AppState::fake().unwrap();
        let Json(res) = signup(
            State(state.clone()),
            JsonBody(CredentialsRequest {
                email: Some(" A@X.com".into()),
                password: Some("pw1".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(res.email, "a@x.com");

        let err = signup(
            State(state),
            JsonBody(CredentialsRequest {
                email: Some("a@x.COM".into()),
                password: Some("pw2".into()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
