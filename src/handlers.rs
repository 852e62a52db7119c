pub mod auth;
pub mod cash;
pub mod dashboard;
pub mod expenses;
pub mod inventory;
pub mod reports;
pub mod users;
