pub mod auth_service;
pub use auth_service::AuthService;
pub mod barber_service;
pub use barber_service::BarberService;
pub mod stats_service;
pub use stats_service::StatsService;
pub mod ledger_service;
pub use ledger_service::LedgerService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod wipe_service;
pub use wipe_service::WipeService;
pub mod export_service;
