use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table: which parts were used on which tickets.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub inventory_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_ticket_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::InventoryId",
        to = "super::inventory::Column::Id",
        on_delete = "Cascade"
    )]
    Inventory,
    #[sea_orm(
        belongs_to = "super::service_ticket::Entity",
        from = "Column::ServiceTicketId",
        to = "super::service_ticket::Column::Id",
        on_delete = "Cascade"
    )]
    ServiceTicket,
}

impl ActiveModelBehavior for ActiveModel {}
