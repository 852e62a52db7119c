pub mod user_repo;
pub use user_repo::UserRepository;
pub mod user_role_repo;
pub use user_role_repo::UserRoleRepository;
pub mod cash_repo;
pub use cash_repo::CashMovementRepository;
pub mod expense_repo;
pub use expense_repo::ExpenseRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
