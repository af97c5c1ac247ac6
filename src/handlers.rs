pub mod admin;
pub mod auth;
pub mod barbers;
pub mod deductions;
pub mod export;
pub mod inventory;
pub mod services;
pub mod stats;
