use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A part that can be attached to service tickets. Price is a plain float,
/// matching the shop's existing books.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::service_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        super::ticket_inventory::Relation::ServiceTicket.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::ticket_inventory::Relation::Inventory.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
