pub mod common;
pub mod customers;
pub mod inventory;
pub mod mechanics;
pub mod service_tickets;

use crate::auth::AuthService;
use crate::cache::CacheBackend;
use crate::db::DbPool;
use std::sync::Arc;
use std::time::Duration;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: crate::services::customers::CustomerService,
    pub mechanics: crate::services::mechanics::MechanicService,
    pub tickets: crate::services::service_tickets::TicketService,
    pub inventory: crate::services::inventory::InventoryService,
}

impl AppServices {
    pub fn new(
        db: Arc<DbPool>,
        auth: Arc<AuthService>,
        cache: Arc<dyn CacheBackend>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            customers: crate::services::customers::CustomerService::new(db.clone(), auth),
            mechanics: crate::services::mechanics::MechanicService::new(
                db.clone(),
                cache,
                cache_ttl,
            ),
            tickets: crate::services::service_tickets::TicketService::new(db.clone()),
            inventory: crate::services::inventory::InventoryService::new(db),
        }
    }
}
