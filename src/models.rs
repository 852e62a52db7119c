pub mod auth;
pub mod cash;
pub mod dashboard;
pub mod expense;
pub mod finance;
pub mod inventory;
pub mod rbac;
