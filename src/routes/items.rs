//! `/items` handlers.
//!
//! Each handler works on a request-scoped [`ItemStore`], delegates to
//! [`crate::operations`] and lets `AppError` pick the status code. Handlers
//! with a body check the store out only after the body has been validated, so
//! slow or rejected uploads never hold a pool connection.

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    extract::{ItemPath, ValidJson},
    metrics::Metrics,
    operations::{self, ItemError, ItemResult},
    state::AppState,
    store::ItemStore,
    types::{Item, ItemCreate, ItemUpdate},
};

/// Counts lookup misses before handing the result to the error mapping.
fn observe(metrics: &Metrics, result: ItemResult<Item>) -> AppResult<Json<Item>> {
    match result {
        Ok(item) => Ok(Json(item)),
        Err(err) => {
            if matches!(err, ItemError::NotFound(_)) {
                metrics.inc_not_found();
            }
            Err(err.into())
        }
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ItemCreate>,
) -> AppResult<Json<Item>> {
    let mut store = ItemStore::acquire(&state.db).await?;
    let result = operations::create(&mut store, input).await;
    if result.is_ok() {
        state.metrics.inc_items_created();
    }
    observe(&state.metrics, result)
}

pub async fn read_item(
    State(state): State<AppState>,
    mut store: ItemStore,
    ItemPath(id): ItemPath<i64>,
) -> AppResult<Json<Item>> {
    let result = operations::read(&mut store, id).await;
    if result.is_ok() {
        state.metrics.inc_items_read();
    }
    observe(&state.metrics, result)
}

pub async fn update_item(
    State(state): State<AppState>,
    ItemPath(id): ItemPath<i64>,
    ValidJson(input): ValidJson<ItemUpdate>,
) -> AppResult<Json<Item>> {
    let mut store = ItemStore::acquire(&state.db).await?;
    let result = operations::update(&mut store, id, input).await;
    if result.is_ok() {
        state.metrics.inc_items_updated();
    }
    observe(&state.metrics, result)
}

pub async fn delete_item(
    State(state): State<AppState>,
    mut store: ItemStore,
    ItemPath(id): ItemPath<i64>,
) -> AppResult<Json<Item>> {
    let result = operations::delete(&mut store, id).await;
    if result.is_ok() {
        state.metrics.inc_items_deleted();
    }
    observe(&state.metrics, result)
}
