use super::common::{created_response, success_response, validate_input, PaginationParams};
use crate::auth::CurrentCustomer;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// All three fields are required but arrive loose so we can answer with the
/// exact message clients of this API already expect.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Response, ServiceError> {
    let (name, email, password) = match (payload.name, payload.email, payload.password) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => {
            return Err(ServiceError::BadRequest(
                "name, email, and password are required".to_string(),
            ))
        }
    };

    let customer = state
        .services
        .customers
        .create_customer(name, email, password)
        .await?;

    Ok(created_response(customer))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, ServiceError> {
    let page = state
        .services
        .customers
        .list_customers(params.page, params.per_page)
        .await?;

    Ok(success_response(page))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&payload)?;

    let token = state
        .services
        .customers
        .login(payload.email, payload.password)
        .await?;

    Ok(success_response(json!({
        "status": "success",
        "message": "successfully logged in.",
        "token": token,
    })))
}

async fn my_tickets(
    State(state): State<AppState>,
    customer: CurrentCustomer,
) -> Result<Response, ServiceError> {
    let tickets = state
        .services
        .tickets
        .list_tickets_for_customer(customer.id)
        .await?;

    Ok(success_response(tickets))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/login", post(login))
        .route("/my-tickets", get(my_tickets))
}
