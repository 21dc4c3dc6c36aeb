use super::common::{created_response, success_response, validate_input};
use crate::auth::CurrentCustomer;
use crate::errors::ServiceError;
use crate::services::inventory::InventoryChanges;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

async fn create_inventory_item(
    State(state): State<AppState>,
    _customer: CurrentCustomer,
    Json(payload): Json<CreateInventoryRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;

    let item = state
        .services
        .inventory
        .create_item(payload.name, payload.price)
        .await?;

    Ok(created_response(item))
}

async fn list_inventory(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let items = state.services.inventory.list_items().await?;
    Ok(success_response(items))
}

async fn get_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    let item = state.services.inventory.get_item(id).await?;
    Ok(success_response(item))
}

async fn update_inventory_item(
    State(state): State<AppState>,
    _customer: CurrentCustomer,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInventoryRequest>,
) -> Result<Response, ServiceError> {
    let item = state
        .services
        .inventory
        .update_item(
            id,
            InventoryChanges {
                name: payload.name,
                price: payload.price,
            },
        )
        .await?;

    Ok(success_response(item))
}

async fn delete_inventory_item(
    State(state): State<AppState>,
    _customer: CurrentCustomer,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.inventory.delete_item(id).await?;
    Ok(success_response(json!({
        "message": format!("Inventory item {} deleted", id),
    })))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inventory_item).get(list_inventory))
        .route("/:item_id", get(get_inventory_item))
        .route("/:item_id", put(update_inventory_item))
        .route("/:item_id", delete(delete_inventory_item))
}
