use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table: which mechanics are assigned to which tickets.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mechanic_service_ticket")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mechanic_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_ticket_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mechanic::Entity",
        from = "Column::MechanicId",
        to = "super::mechanic::Column::Id",
        on_delete = "Cascade"
    )]
    Mechanic,
    #[sea_orm(
        belongs_to = "super::service_ticket::Entity",
        from = "Column::ServiceTicketId",
        to = "super::service_ticket::Column::Id",
        on_delete = "Cascade"
    )]
    ServiceTicket,
}

impl ActiveModelBehavior for ActiveModel {}
