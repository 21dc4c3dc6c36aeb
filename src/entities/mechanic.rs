use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mechanics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::service_ticket::Entity> for Entity {
    fn to() -> RelationDef {
        super::mechanic_service_ticket::Relation::ServiceTicket.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::mechanic_service_ticket::Relation::Mechanic
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
