pub mod auth;
pub mod barber;
pub mod catalog;
pub mod deduction;
pub mod inventory;
pub mod service;
pub mod stats;
