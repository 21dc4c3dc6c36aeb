pub mod customer;
pub mod inventory;
pub mod mechanic;
pub mod mechanic_service_ticket;
pub mod service_ticket;
pub mod ticket_inventory;
