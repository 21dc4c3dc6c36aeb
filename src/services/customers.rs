use crate::{
    auth::AuthService,
    entities::customer,
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Customer as exposed over the API. The stored password never leaves the
/// service layer.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

/// One page of the customer listing.
#[derive(Debug, Serialize)]
pub struct CustomerPage {
    pub items: Vec<CustomerResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}

/// Service for managing customer accounts and login
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
    auth: Arc<AuthService>,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Registers a new customer. Email addresses are unique.
    #[instrument(skip(self, password))]
    pub async fn create_customer(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<CustomerResponse, ServiceError> {
        let existing = customer::Entity::find()
            .filter(customer::Column::Email.eq(&email))
            .one(&*self.db)
            .await?;

        if existing.is_some() {
            return Err(ServiceError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        let created = customer::ActiveModel {
            name: Set(name),
            email: Set(email),
            password: Set(password),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!("Customer registered: {}", created.id);
        Ok(created.into())
    }

    /// Lists customers one page at a time. `page` is 1-based.
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<CustomerPage, ServiceError> {
        if per_page == 0 {
            return Err(ServiceError::ValidationError(
                "per_page must be greater than zero".to_string(),
            ));
        }

        let paginator = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .paginate(&*self.db, per_page);

        let counts = paginator.num_items_and_pages().await?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(CustomerResponse::from)
            .collect();

        Ok(CustomerPage {
            items,
            total: counts.number_of_items,
            page,
            per_page,
            pages: counts.number_of_pages,
        })
    }

    /// Checks credentials and mints a token for the customer.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: String, password: String) -> Result<String, ServiceError> {
        let found = customer::Entity::find()
            .filter(customer::Column::Email.eq(&email))
            .one(&*self.db)
            .await?;

        // Plain equality; see the customer entity for why.
        let matched = found.filter(|c| c.password == password).ok_or_else(|| {
            ServiceError::AuthError("Invalid email or password".to_string())
        })?;

        let token = self.auth.issue_token(matched.id)?;
        info!("Customer logged in: {}", matched.id);
        Ok(token)
    }
}
