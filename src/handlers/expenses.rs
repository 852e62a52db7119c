// src/handlers/expenses.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::expense::{
        Expense, ExpenseCategory, ExpensePayload, ExpenseReport, ExpenseReportQuery, MonthQuery,
    },
};

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Gastos",
    responses((status = 200, description = "Todos os gastos, mais recentes primeiro", body = Vec<Expense>)),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = app_state.expense_service
        .list_expenses()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(expenses))
}

// GET /api/expenses/month?year=2024&month=3
#[utoipa::path(
    get,
    path = "/api/expenses/month",
    tag = "Gastos",
    params(MonthQuery),
    responses(
        (status = 200, description = "Gastos do mês", body = Vec<Expense>),
        (status = 400, description = "Ano ou mês inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_month(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let expenses = app_state.expense_service
        .list_month(query.year, query.month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(expenses))
}

// GET /api/expenses/report
#[utoipa::path(
    get,
    path = "/api/expenses/report",
    tag = "Gastos",
    params(ExpenseReportQuery),
    responses(
        (status = 200, description = "Gastos do mês filtrados, totais e detalhamento semanal", body = ExpenseReport),
        (status = 400, description = "Filtro inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<ExpenseReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let report = app_state.expense_service
        .report(query.year, query.month, query.category, query.week)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(report))
}

// GET /api/expenses/categories
#[utoipa::path(
    get,
    path = "/api/expenses/categories",
    tag = "Gastos",
    responses((status = 200, description = "Categorias fixas de gastos", body = Vec<ExpenseCategory>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(_user: AuthenticatedUser) -> Json<Vec<ExpenseCategory>> {
    Json(ExpenseCategory::ALL.to_vec())
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Gastos",
    request_body = ExpensePayload,
    responses(
        (status = 201, description = "Gasto registrado", body = Expense),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<ExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let input = payload
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let expense = app_state.expense_service
        .create_expense(input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

// PUT /api/expenses/{id}
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    tag = "Gastos",
    request_body = ExpensePayload,
    params(("id" = Uuid, Path, description = "ID do gasto")),
    responses(
        (status = 200, description = "Gasto atualizado", body = Expense),
        (status = 404, description = "Gasto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let input = payload
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let expense = app_state.expense_service
        .update_expense(id, input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(expense))
}

// DELETE /api/expenses/{id}
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "Gastos",
    params(("id" = Uuid, Path, description = "ID do gasto")),
    responses(
        (status = 204, description = "Gasto removido"),
        (status = 404, description = "Gasto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.expense_service
        .delete_expense(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
