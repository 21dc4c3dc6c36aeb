use super::common::{created_response, success_response};
use crate::auth::CurrentCustomer;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub description: Option<String>,
    pub vehicle: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditTicketMechanicsRequest {
    #[serde(default)]
    pub add_ids: Vec<i32>,
    #[serde(default)]
    pub remove_ids: Vec<i32>,
}

async fn create_ticket(
    State(state): State<AppState>,
    customer: CurrentCustomer,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<Response, ServiceError> {
    let description = payload
        .description
        .ok_or_else(|| ServiceError::BadRequest("description is required".to_string()))?;

    let ticket = state
        .services
        .tickets
        .create_ticket(customer.id, description, payload.vehicle, payload.status)
        .await?;

    Ok(created_response(ticket))
}

async fn list_tickets(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let tickets = state.services.tickets.list_tickets().await?;
    Ok(success_response(tickets))
}

async fn edit_ticket_mechanics(
    State(state): State<AppState>,
    customer: CurrentCustomer,
    Path(ticket_id): Path<i32>,
    Json(payload): Json<EditTicketMechanicsRequest>,
) -> Result<Response, ServiceError> {
    let ticket = state
        .services
        .tickets
        .edit_ticket_mechanics(customer.id, ticket_id, payload.add_ids, payload.remove_ids)
        .await?;

    Ok(success_response(ticket))
}

async fn add_part_to_ticket(
    State(state): State<AppState>,
    customer: CurrentCustomer,
    Path((ticket_id, inventory_id)): Path<(i32, i32)>,
) -> Result<Response, ServiceError> {
    let ticket = state
        .services
        .tickets
        .add_part_to_ticket(customer.id, ticket_id, inventory_id)
        .await?;

    Ok(success_response(ticket))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ticket).get(list_tickets))
        .route("/:ticket_id/edit", put(edit_ticket_mechanics))
        .route("/:ticket_id/add-part/:inventory_id", put(add_part_to_ticket))
}
