// src/handlers/cash.rs

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
    models::cash::{CashMovement, CashMovementPayload, CashReport, CashReportQuery},
};

// GET /api/cash-movements
#[utoipa::path(
    get,
    path = "/api/cash-movements",
    tag = "Caixa",
    responses(
        (status = 200, description = "Movimentos de caixa, mais recentes primeiro", body = Vec<CashMovement>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state.cash_service
        .list_movements()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movements))
}

// POST /api/cash-movements
#[utoipa::path(
    post,
    path = "/api/cash-movements",
    tag = "Caixa",
    request_body = CashMovementPayload,
    responses(
        (status = 201, description = "Movimento registrado", body = CashMovement),
        (status = 400, description = "Data ou valores inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<CashMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let input = payload
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state.cash_service
        .create_movement(input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// PUT /api/cash-movements/{id}
#[utoipa::path(
    put,
    path = "/api/cash-movements/{id}",
    tag = "Caixa",
    request_body = CashMovementPayload,
    params(("id" = Uuid, Path, description = "ID do movimento")),
    responses(
        (status = 200, description = "Movimento atualizado", body = CashMovement),
        (status = 404, description = "Movimento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CashMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let input = payload
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state.cash_service
        .update_movement(id, input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movement))
}

// DELETE /api/cash-movements/{id}
#[utoipa::path(
    delete,
    path = "/api/cash-movements/{id}",
    tag = "Caixa",
    params(("id" = Uuid, Path, description = "ID do movimento")),
    responses(
        (status = 204, description = "Movimento removido"),
        (status = 404, description = "Movimento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.cash_service
        .delete_movement(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/cash-movements/report
#[utoipa::path(
    get,
    path = "/api/cash-movements/report",
    tag = "Caixa",
    params(CashReportQuery),
    responses(
        (status = 200, description = "Movimentos filtrados e total de vendas", body = CashReport),
        (status = 400, description = "Semana ou mês inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<CashReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state.cash_service
        .report(&query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(report))
}
