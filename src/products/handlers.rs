use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::AppError,
    extract::{Path, Query},
    products::{dto::ProductQuery, repo_types::Product},
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(q): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    // `?category=` with no value means no filter
    let category = q.category.as_deref().filter(|c| !c.is_empty());
    let products = state
        .db
        .read(|doc| Ok::<_, AppError>(Product::list(doc, category)))
        .await?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .db
        .read(|doc| {
            Product::find(doc, &id).cloned().ok_or_else(|| {
                warn!(product_id = %id, "product not found");
                AppError::not_found("Product not found")
            })
        })
        .await?;
    Ok(Json(product))
}
