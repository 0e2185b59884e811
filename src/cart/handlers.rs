use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{dto::present, extractors::SessionToken, session},
    cart::{
        dto::{CartItemRequest, CartResponse},
        repo_types::Cart,
        services,
    },
    error::AppError,
    extract::{JsonBody, Path},
    state::AppState,
};

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart).put(update_cart_item))
        .route("/cart/:product_id", delete(remove_from_cart))
}

#[instrument(skip(state, token))]
pub async fn get_cart(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<Cart>, AppError> {
    let cart = state
        .db
        .read(|doc| {
            let user = session::resolve(doc, &token)?;
            Ok::<_, AppError>(services::get_cart(doc, &user.id))
        })
        .await?;
    Ok(Json(cart))
}

#[instrument(skip(state, token, payload))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    JsonBody(payload): JsonBody<CartItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let product_id = present(payload.product_id);
    let qty = payload.qty.unwrap_or(1);

    let cart = state
        .db
        .write(|doc| {
            let user_id = session::resolve(doc, &token)?.id.clone();
            let product_id = product_id.ok_or_else(|| {
                warn!("add to cart without productId");
                AppError::missing("productId is required")
            })?;
            services::add_item(doc, &user_id, &product_id, qty)
        })
        .await?;
    Ok(Json(CartResponse::new("Added to cart", cart)))
}

#[instrument(skip(state, token, payload))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    JsonBody(payload): JsonBody<CartItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let fields = present(payload.product_id).zip(payload.qty);

    let cart = state
        .db
        .write(|doc| {
            let user_id = session::resolve(doc, &token)?.id.clone();
            let (product_id, qty) = fields.ok_or_else(|| {
                warn!("cart update without productId or qty");
                AppError::missing("productId and qty are required")
            })?;
            services::update_item(doc, &user_id, &product_id, qty)
        })
        .await?;
    Ok(Json(CartResponse::new("Cart updated", cart)))
}

#[instrument(skip(state, token))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = state
        .db
        .write(|doc| {
            let user_id = session::resolve(doc, &token)?.id.clone();
            services::remove_item(doc, &user_id, &product_id)
        })
        .await?;
    Ok(Json(CartResponse::new("Item removed", cart)))
}
