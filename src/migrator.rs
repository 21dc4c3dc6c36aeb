use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_table::Migration),
            Box::new(m20240101_000002_create_mechanics_table::Migration),
            Box::new(m20240101_000003_create_service_tickets_table::Migration),
            Box::new(m20240101_000004_create_inventory_table::Migration),
            Box::new(m20240101_000005_create_ticket_link_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_customers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(
                            ColumnDef::new(Customers::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Customers::Password).string().not_null())
                        .col(ColumnDef::new(Customers::CreatedAt).timestamp_with_time_zone().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_customers_email")
                        .table(Customers::Table)
                        .col(Customers::Email)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        Email,
        Password,
        CreatedAt,
    }
}

mod m20240101_000002_create_mechanics_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_mechanics_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Mechanics::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Mechanics::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Mechanics::Name).string().not_null())
                        .col(ColumnDef::new(Mechanics::Specialization).string().null())
                        .col(
                            ColumnDef::new(Mechanics::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Mechanics::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Mechanics {
        Table,
        Id,
        Name,
        Specialization,
        IsActive,
    }
}

mod m20240101_000003_create_service_tickets_table {

    use super::m20240101_000001_create_customers_table::Customers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_service_tickets_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ServiceTickets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServiceTickets::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ServiceTickets::Description)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ServiceTickets::Vehicle).string().null())
                        .col(
                            ColumnDef::new(ServiceTickets::Status)
                                .string()
                                .not_null()
                                .default("open"),
                        )
                        .col(
                            ColumnDef::new(ServiceTickets::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ServiceTickets::CustomerId)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_service_tickets_customer_id")
                                .from(ServiceTickets::Table, ServiceTickets::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_service_tickets_customer_id")
                        .table(ServiceTickets::Table)
                        .col(ServiceTickets::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_service_tickets_status")
                        .table(ServiceTickets::Table)
                        .col(ServiceTickets::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ServiceTickets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ServiceTickets {
        Table,
        Id,
        Description,
        Vehicle,
        Status,
        CreatedAt,
        CustomerId,
    }
}

mod m20240101_000004_create_inventory_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_inventory_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inventory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inventory::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Inventory::Name).string().not_null())
                        .col(ColumnDef::new(Inventory::Price).double().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inventory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Inventory {
        Table,
        Id,
        Name,
        Price,
    }
}

mod m20240101_000005_create_ticket_link_tables {

    use super::m20240101_000002_create_mechanics_table::Mechanics;
    use super::m20240101_000003_create_service_tickets_table::ServiceTickets;
    use super::m20240101_000004_create_inventory_table::Inventory;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_ticket_link_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MechanicServiceTicket::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MechanicServiceTicket::MechanicId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MechanicServiceTicket::ServiceTicketId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(MechanicServiceTicket::MechanicId)
                                .col(MechanicServiceTicket::ServiceTicketId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_mechanic_service_ticket_mechanic_id")
                                .from(
                                    MechanicServiceTicket::Table,
                                    MechanicServiceTicket::MechanicId,
                                )
                                .to(Mechanics::Table, Mechanics::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_mechanic_service_ticket_ticket_id")
                                .from(
                                    MechanicServiceTicket::Table,
                                    MechanicServiceTicket::ServiceTicketId,
                                )
                                .to(ServiceTickets::Table, ServiceTickets::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TicketInventory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TicketInventory::InventoryId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TicketInventory::ServiceTicketId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(TicketInventory::InventoryId)
                                .col(TicketInventory::ServiceTicketId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_inventory_inventory_id")
                                .from(TicketInventory::Table, TicketInventory::InventoryId)
                                .to(Inventory::Table, Inventory::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_inventory_ticket_id")
                                .from(TicketInventory::Table, TicketInventory::ServiceTicketId)
                                .to(ServiceTickets::Table, ServiceTickets::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TicketInventory::Table).to_owned())
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(MechanicServiceTicket::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MechanicServiceTicket {
        Table,
        MechanicId,
        ServiceTicketId,
    }

    #[derive(DeriveIden)]
    enum TicketInventory {
        Table,
        InventoryId,
        ServiceTicketId,
    }
}
