//! Customer authentication: HS256 JWT issuance and verification, plus the
//! [`CurrentCustomer`] extractor that guards protected routes.
//!
//! Tokens identify a single customer. The extractor validates the bearer
//! token and re-checks that the customer row still exists before the handler
//! runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::entities::customer;
use crate::errors::ServiceError;
use crate::AppState;

/// Claim structure for customer tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Subject kind, always "customer"
    pub customer_id: i32, // The authenticated customer
    pub jti: String,      // Unique identifier for this token
    pub iat: i64,         // Issued at time
    pub exp: i64,         // Expiration time
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry: ChronoDuration,
}

impl From<&AppConfig> for AuthConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            jwt_secret: cfg.jwt_secret.clone(),
            token_expiry: ChronoDuration::minutes(cfg.jwt_expire_minutes as i64),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header missing or invalid")]
    MissingAuth,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid or expired token")]
    TokenExpired,
    #[error("Failed to create token: {0}")]
    TokenCreation(String),
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenCreation(msg) => ServiceError::InternalError(msg),
            other => ServiceError::AuthError(other.to_string()),
        }
    }
}

/// Issues and verifies customer tokens.
#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Mint a token for a customer id.
    pub fn issue_token(&self, customer_id: i32) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: "customer".to_string(),
            customer_id,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.config.token_expiry).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Decode and validate a token, returning its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }
}

/// The customer a request is acting as. Using this as a handler argument is
/// what marks a route as protected.
///
/// Invalid or missing credentials are a 401; a well-formed token whose
/// customer has since been deleted is a 404, matching the API contract.
#[derive(Clone, Debug)]
pub struct CurrentCustomer {
    pub id: i32,
    pub email: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentCustomer {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.auth.verify_token(&token)?;

        let found = customer::Entity::find_by_id(claims.customer_id)
            .one(&*state.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))?;

        Ok(CurrentCustomer {
            id: found.id,
            email: found.email,
        })
    }
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingAuth)?;

    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingAuth)
}
