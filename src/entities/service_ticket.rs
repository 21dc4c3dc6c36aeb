use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub vehicle: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub customer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::mechanic::Entity> for Entity {
    fn to() -> RelationDef {
        super::mechanic_service_ticket::Relation::Mechanic.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::mechanic_service_ticket::Relation::ServiceTicket
                .def()
                .rev(),
        )
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        super::ticket_inventory::Relation::Inventory.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::ticket_inventory::Relation::ServiceTicket.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
