pub mod user_repo;
pub use user_repo::UserRepository;
pub mod barber_repo;
pub use barber_repo::BarberRepository;
pub mod service_repo;
pub use service_repo::ServiceRepository;
pub mod deduction_repo;
pub use deduction_repo::DeductionRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
