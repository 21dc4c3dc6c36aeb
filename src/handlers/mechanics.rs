use super::common::{created_response, success_response, validate_input};
use crate::errors::ServiceError;
use crate::services::mechanics::MechanicChanges;
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
pub struct CreateMechanicRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub specialization: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateMechanicRequest {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub is_active: Option<bool>,
}

async fn create_mechanic(
    State(state): State<AppState>,
    Json(payload): Json<CreateMechanicRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;

    let mechanic = state
        .services
        .mechanics
        .create_mechanic(payload.name, payload.specialization, payload.is_active)
        .await?;

    Ok(created_response(mechanic))
}

async fn list_mechanics(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let mechanics = state.services.mechanics.list_mechanics().await?;
    Ok(success_response(mechanics))
}

async fn update_mechanic(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMechanicRequest>,
) -> Result<Response, ServiceError> {
    let mechanic = state
        .services
        .mechanics
        .update_mechanic(
            id,
            MechanicChanges {
                name: payload.name,
                specialization: payload.specialization,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(success_response(mechanic))
}

async fn delete_mechanic(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.mechanics.delete_mechanic(id).await?;
    Ok(success_response(json!({
        "message": format!("Mechanic {} deleted", id),
    })))
}

async fn mechanics_by_ticket_count(
    State(state): State<AppState>,
) -> Result<Response, ServiceError> {
    let rows = state.services.mechanics.mechanics_by_ticket_count().await?;
    Ok(success_response(rows))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_mechanic).get(list_mechanics))
        .route("/by-ticket-count", get(mechanics_by_ticket_count))
        .route("/:id", put(update_mechanic))
        .route("/:id", delete(delete_mechanic))
}
