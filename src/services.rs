pub mod auth;
pub mod cash_service;
pub mod dashboard_service;
pub mod expense_service;
pub mod finance_service;
pub mod inventory_service;
pub mod user_management_service;
