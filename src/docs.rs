// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::reporting;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Caixa ---
        handlers::cash::list_movements,
        handlers::cash::create_movement,
        handlers::cash::update_movement,
        handlers::cash::delete_movement,
        handlers::cash::get_report,

        // --- Gastos ---
        handlers::expenses::list_expenses,
        handlers::expenses::list_month,
        handlers::expenses::get_report,
        handlers::expenses::list_categories,
        handlers::expenses::create_expense,
        handlers::expenses::update_expense,
        handlers::expenses::delete_expense,

        // --- INVENTORY ---
        handlers::inventory::list_items,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,
        handlers::inventory::list_low_stock,
        handlers::inventory::get_summary,
        handlers::inventory::list_movements,
        handlers::inventory::create_movement,
        handlers::inventory::seed_inventory,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_cash_chart,
        handlers::dashboard::get_weekly_expenses,
        handlers::dashboard::get_monthly_expenses,

        // --- Relatórios ---
        handlers::reports::get_profits,

        // --- Usuários ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::assign_role,
        handlers::users::get_user,
        handlers::users::update_role,
        handlers::users::activate_user,
        handlers::users::deactivate_user,
        handlers::users::delete_user,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Caixa ---
            models::cash::CashMovement,
            models::cash::CashMovementPayload,
            models::cash::CashFilterKind,
            models::cash::CashReport,

            // --- Gastos ---
            models::expense::ExpenseCategory,
            models::expense::Expense,
            models::expense::ExpensePayload,
            models::expense::CategoryTotal,
            models::expense::WeekBreakdown,
            models::expense::ExpenseReport,

            // --- Inventory ---
            models::inventory::InventoryItem,
            models::inventory::StockMovementType,
            models::inventory::StockMovement,
            models::inventory::StockMovementResult,
            models::inventory::CategorySummary,
            models::inventory::InventorySummary,
            models::inventory::SeedResult,

            // --- Payloads ---
            handlers::inventory::InventoryItemPayload,
            handlers::inventory::StockMovementPayload,

            // --- DASHBOARD ---
            models::dashboard::DashboardSummary,
            models::dashboard::CashChartPoint,
            models::dashboard::MonthlyChartPoint,
            reporting::WeeklyBucket,
            reporting::DateRange,

            // --- Relatórios ---
            models::finance::ProfitTotals,
            models::finance::MonthlyProfit,
            models::finance::QuarterlyProfit,
            models::finance::ProfitReport,

            // --- Usuários ---
            models::rbac::UserRole,
            models::rbac::UserRoleRecord,
            models::rbac::CreateUserPayload,
            models::rbac::AssignRolePayload,
            models::rbac::UpdateRolePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Caixa", description = "Movimentos diários de caixa"),
        (name = "Gastos", description = "Gastos mensais por categoria"),
        (name = "Estoque", description = "Itens, movimentações e alertas de estoque"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais"),
        (name = "Relatórios", description = "Lucros mensais, trimestrais e anuais"),
        (name = "Usuários", description = "Cargos e acesso dos funcionários")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
