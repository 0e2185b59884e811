use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    auth::{extractors::SessionToken, session},
    checkout::{dto::CheckoutResponse, repo_types::Order, services},
    error::AppError,
    state::AppState,
};

pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/orders", get(list_orders))
}

#[instrument(skip(state, token))]
pub async fn checkout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<CheckoutResponse>, AppError> {
    let order = state
        .db
        .write(|doc| {
            let user_id = session::resolve(doc, &token)?.id.clone();
            services::checkout(doc, &user_id, OffsetDateTime::now_utc())
        })
        .await?;

    Ok(Json(CheckoutResponse {
        message: "Order placed".into(),
        order,
    }))
}

#[instrument(skip(state, token))]
pub async fn list_orders(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state
        .db
        .read(|doc| {
            let user = session::resolve(doc, &token)?;
            Ok::<_, AppError>(services::list_orders(doc, &user.id))
        })
        .await?;
    Ok(Json(orders))
}
