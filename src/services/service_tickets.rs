use crate::{
    entities::{inventory, mechanic, mechanic_service_ticket, service_ticket, ticket_inventory},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Service ticket as exposed over the API: the ticket row plus the id sets of
/// its assigned mechanics and attached parts.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: i32,
    pub description: String,
    pub vehicle: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
    pub mechanics: Vec<i32>,
    pub parts: Vec<i32>,
}

/// Service for managing service tickets and their mechanic/part sets
#[derive(Clone)]
pub struct TicketService {
    db: Arc<DatabaseConnection>,
}

impl TicketService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_ticket(
        &self,
        customer_id: i32,
        description: String,
        vehicle: Option<String>,
        status: Option<String>,
    ) -> Result<TicketResponse, ServiceError> {
        let created = service_ticket::ActiveModel {
            description: Set(description),
            vehicle: Set(vehicle),
            status: Set(status.unwrap_or_else(|| "open".to_string())),
            created_at: Set(Utc::now()),
            customer_id: Set(customer_id),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!("Service ticket created: {}", created.id);
        self.response_for(created).await
    }

    #[instrument(skip(self))]
    pub async fn list_tickets(&self) -> Result<Vec<TicketResponse>, ServiceError> {
        let tickets = service_ticket::Entity::find()
            .order_by_asc(service_ticket::Column::Id)
            .all(&*self.db)
            .await?;
        self.responses_for(tickets).await
    }

    #[instrument(skip(self))]
    pub async fn list_tickets_for_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<TicketResponse>, ServiceError> {
        let tickets = service_ticket::Entity::find()
            .filter(service_ticket::Column::CustomerId.eq(customer_id))
            .order_by_asc(service_ticket::Column::Id)
            .all(&*self.db)
            .await?;
        self.responses_for(tickets).await
    }

    /// Edits the mechanic set of a ticket: removals first, then additions.
    /// Unknown mechanic ids and redundant operations are skipped, keeping the
    /// assignment a plain set.
    #[instrument(skip(self))]
    pub async fn edit_ticket_mechanics(
        &self,
        customer_id: i32,
        ticket_id: i32,
        add_ids: Vec<i32>,
        remove_ids: Vec<i32>,
    ) -> Result<TicketResponse, ServiceError> {
        let ticket = self.owned_ticket(customer_id, ticket_id).await?;

        if !remove_ids.is_empty() {
            mechanic_service_ticket::Entity::delete_many()
                .filter(mechanic_service_ticket::Column::ServiceTicketId.eq(ticket.id))
                .filter(mechanic_service_ticket::Column::MechanicId.is_in(remove_ids))
                .exec(&*self.db)
                .await?;
        }

        for mechanic_id in add_ids {
            let exists = mechanic::Entity::find_by_id(mechanic_id)
                .one(&*self.db)
                .await?
                .is_some();
            if !exists {
                continue;
            }

            let already_assigned = mechanic_service_ticket::Entity::find_by_id((
                mechanic_id,
                ticket.id,
            ))
            .one(&*self.db)
            .await?
            .is_some();
            if already_assigned {
                continue;
            }

            mechanic_service_ticket::Entity::insert(mechanic_service_ticket::ActiveModel {
                mechanic_id: Set(mechanic_id),
                service_ticket_id: Set(ticket.id),
            })
            .exec_without_returning(&*self.db)
            .await?;
        }

        self.response_for(ticket).await
    }

    /// Attaches a part to a ticket. Attaching a part twice is a no-op.
    #[instrument(skip(self))]
    pub async fn add_part_to_ticket(
        &self,
        customer_id: i32,
        ticket_id: i32,
        inventory_id: i32,
    ) -> Result<TicketResponse, ServiceError> {
        let ticket = self.owned_ticket(customer_id, ticket_id).await?;

        let part = inventory::Entity::find_by_id(inventory_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Inventory item not found".to_string()))?;

        let already_attached = ticket_inventory::Entity::find_by_id((part.id, ticket.id))
            .one(&*self.db)
            .await?
            .is_some();

        if !already_attached {
            ticket_inventory::Entity::insert(ticket_inventory::ActiveModel {
                inventory_id: Set(part.id),
                service_ticket_id: Set(ticket.id),
            })
            .exec_without_returning(&*self.db)
            .await?;
        }

        self.response_for(ticket).await
    }

    /// Loads a ticket and checks the caller owns it.
    async fn owned_ticket(
        &self,
        customer_id: i32,
        ticket_id: i32,
    ) -> Result<service_ticket::Model, ServiceError> {
        let ticket = service_ticket::Entity::find_by_id(ticket_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Service ticket not found".to_string()))?;

        if ticket.customer_id != customer_id {
            return Err(ServiceError::Forbidden(
                "Not authorized to modify this ticket".to_string(),
            ));
        }

        Ok(ticket)
    }

    async fn response_for(&self, ticket: service_ticket::Model) -> Result<TicketResponse, ServiceError> {
        let mechanics = ticket
            .find_related(mechanic::Entity)
            .all(&*self.db)
            .await?;
        let parts = ticket
            .find_related(inventory::Entity)
            .all(&*self.db)
            .await?;

        Ok(TicketResponse {
            id: ticket.id,
            description: ticket.description,
            vehicle: ticket.vehicle,
            status: ticket.status,
            created_at: ticket.created_at,
            customer_id: ticket.customer_id,
            mechanics: mechanics.into_iter().map(|m| m.id).collect(),
            parts: parts.into_iter().map(|p| p.id).collect(),
        })
    }

    async fn responses_for(
        &self,
        tickets: Vec<service_ticket::Model>,
    ) -> Result<Vec<TicketResponse>, ServiceError> {
        let mechanics = tickets
            .load_many_to_many(mechanic::Entity, mechanic_service_ticket::Entity, &*self.db)
            .await?;
        let parts = tickets
            .load_many_to_many(inventory::Entity, ticket_inventory::Entity, &*self.db)
            .await?;

        Ok(tickets
            .into_iter()
            .zip(mechanics)
            .zip(parts)
            .map(|((ticket, mechanics), parts)| TicketResponse {
                id: ticket.id,
                description: ticket.description,
                vehicle: ticket.vehicle,
                status: ticket.status,
                created_at: ticket.created_at,
                customer_id: ticket.customer_id,
                mechanics: mechanics.into_iter().map(|m| m.id).collect(),
                parts: parts.into_iter().map(|p| p.id).collect(),
            })
            .collect())
    }
}
