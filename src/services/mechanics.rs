use crate::{
    cache::CacheBackend,
    entities::{mechanic, mechanic_service_ticket},
    errors::ServiceError,
};
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, ModelTrait,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

const MECHANICS_CACHE_KEY: &str = "mechanics:list";

/// Row of the by-ticket-count report.
#[derive(Debug, Serialize, FromQueryResult)]
pub struct MechanicTicketCount {
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    pub ticket_count: i64,
}

/// Fields accepted when updating a mechanic; absent fields are left untouched.
#[derive(Debug, Default)]
pub struct MechanicChanges {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub is_active: Option<bool>,
}

/// Service for managing the mechanic roster
#[derive(Clone)]
pub struct MechanicService {
    db: Arc<DatabaseConnection>,
    cache: Arc<dyn CacheBackend>,
    cache_ttl: Duration,
}

impl MechanicService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        cache: Arc<dyn CacheBackend>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            db,
            cache,
            cache_ttl,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_mechanic(
        &self,
        name: String,
        specialization: Option<String>,
        is_active: bool,
    ) -> Result<mechanic::Model, ServiceError> {
        let created = mechanic::ActiveModel {
            name: Set(name),
            specialization: Set(specialization),
            is_active: Set(is_active),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        self.invalidate_listing().await;
        info!("Mechanic created: {}", created.id);
        Ok(created)
    }

    /// Lists all mechanics, serving from the cache when fresh.
    #[instrument(skip(self))]
    pub async fn list_mechanics(&self) -> Result<Vec<mechanic::Model>, ServiceError> {
        match self.cache.get(MECHANICS_CACHE_KEY).await {
            Ok(Some(cached)) => {
                if let Ok(mechanics) = serde_json::from_str::<Vec<mechanic::Model>>(&cached) {
                    return Ok(mechanics);
                }
                // Unreadable entry; fall through and overwrite it.
                warn!("Discarding undecodable mechanics cache entry");
            }
            Ok(None) => {}
            Err(err) => warn!("Mechanics cache read failed: {}", err),
        }

        let mechanics = mechanic::Entity::find()
            .order_by_asc(mechanic::Column::Id)
            .all(&*self.db)
            .await?;

        match serde_json::to_string(&mechanics) {
            Ok(serialized) => {
                if let Err(err) = self
                    .cache
                    .set(MECHANICS_CACHE_KEY, &serialized, Some(self.cache_ttl))
                    .await
                {
                    warn!("Mechanics cache write failed: {}", err);
                }
            }
            Err(err) => warn!("Mechanics cache serialization failed: {}", err),
        }

        Ok(mechanics)
    }

    #[instrument(skip(self))]
    pub async fn update_mechanic(
        &self,
        id: i32,
        changes: MechanicChanges,
    ) -> Result<mechanic::Model, ServiceError> {
        let found = mechanic::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Mechanic not found".to_string()))?;

        let mut active: mechanic::ActiveModel = found.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(specialization) = changes.specialization {
            active.specialization = Set(Some(specialization));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active.update(&*self.db).await?;
        self.invalidate_listing().await;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_mechanic(&self, id: i32) -> Result<(), ServiceError> {
        let found = mechanic::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Mechanic not found".to_string()))?;

        found.delete(&*self.db).await?;
        self.invalidate_listing().await;
        info!("Mechanic deleted: {}", id);
        Ok(())
    }

    /// Every mechanic with the number of tickets they are assigned to,
    /// busiest first. Mechanics with no tickets still appear (LEFT JOIN).
    #[instrument(skip(self))]
    pub async fn mechanics_by_ticket_count(
        &self,
    ) -> Result<Vec<MechanicTicketCount>, ServiceError> {
        let ticket_count: SimpleExpr = Func::count(Expr::col((
            mechanic_service_ticket::Entity,
            mechanic_service_ticket::Column::ServiceTicketId,
        )))
        .into();

        let rows = mechanic::Entity::find()
            .select_only()
            .column(mechanic::Column::Id)
            .column(mechanic::Column::Name)
            .column(mechanic::Column::Specialization)
            .expr_as(ticket_count.clone(), "ticket_count")
            .join_rev(
                JoinType::LeftJoin,
                mechanic_service_ticket::Relation::Mechanic.def(),
            )
            .group_by(mechanic::Column::Id)
            .order_by_desc(ticket_count)
            .into_model::<MechanicTicketCount>()
            .all(&*self.db)
            .await?;

        Ok(rows)
    }

    async fn invalidate_listing(&self) {
        if let Err(err) = self.cache.delete(MECHANICS_CACHE_KEY).await {
            warn!("Mechanics cache invalidation failed: {}", err);
        }
    }
}
