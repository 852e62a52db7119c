// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    // Importamos os models para referenciar no Swagger
    models::dashboard::{CashChartPoint, DashboardSummary, MonthlyChartPoint},
    reporting::WeeklyBucket,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards do topo: vendas, gastos do mês e estoque", body = DashboardSummary),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.dashboard_service
        .get_summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/cash-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/cash-chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendas dos últimos 31 lançamentos de caixa", body = Vec<CashChartPoint>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_cash_chart(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let chart = app_state.dashboard_service
        .get_cash_chart()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/weekly-expenses
#[utoipa::path(
    get,
    path = "/api/dashboard/weekly-expenses",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Gastos das últimas 8 semanas (segunda a domingo)", body = Vec<WeeklyBucket>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_weekly_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let weeks = app_state.dashboard_service
        .get_weekly_expenses()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(weeks)))
}

// GET /api/dashboard/monthly-expenses
#[utoipa::path(
    get,
    path = "/api/dashboard/monthly-expenses",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Gastos por mês do ano corrente", body = Vec<MonthlyChartPoint>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_monthly_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let months = app_state.dashboard_service
        .get_monthly_expenses()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(months)))
}
