// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Local};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, rbac::RequireManager},
    models::finance::{ProfitReport, YearQuery},
};

// GET /api/reports/profits?year=2024
#[utoipa::path(
    get,
    path = "/api/reports/profits",
    tag = "Relatórios",
    params(YearQuery),
    responses(
        (status = 200, description = "Lucro por mês, trimestre e ano", body = ProfitReport),
        (status = 403, description = "Apenas gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profits(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    Query(query): Query<YearQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let year = query.year.unwrap_or_else(|| Local::now().year());

    let report = app_state.finance_service
        .profit_report(year)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(report))
}
