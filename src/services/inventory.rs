use crate::{entities::inventory, errors::ServiceError};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Fields accepted when updating a part; absent fields are left untouched.
#[derive(Debug, Default)]
pub struct InventoryChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Service for managing the parts inventory
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_item(
        &self,
        name: String,
        price: f64,
    ) -> Result<inventory::Model, ServiceError> {
        let created = inventory::ActiveModel {
            name: Set(name),
            price: Set(price),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!("Inventory item created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<inventory::Model>, ServiceError> {
        let items = inventory::Entity::find()
            .order_by_asc(inventory::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i32) -> Result<inventory::Model, ServiceError> {
        inventory::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Inventory item not found".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: i32,
        changes: InventoryChanges,
    ) -> Result<inventory::Model, ServiceError> {
        let found = self.get_item(id).await?;

        let mut active: inventory::ActiveModel = found.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }

        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i32) -> Result<(), ServiceError> {
        let found = self.get_item(id).await?;
        found.delete(&*self.db).await?;
        info!("Inventory item deleted: {}", id);
        Ok(())
    }
}
