// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::{ApiError, AppError},
        validation::{validate_not_negative, validate_positive},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::inventory::{
        InventoryFilter, InventoryItem, InventoryItemInput, InventorySummary, SeedResult,
        StockMovement, StockMovementInput, StockMovementQuery, StockMovementResult,
        StockMovementType, STOCK_UNITS,
    },
    reporting::parse_local_date,
};

// ---
// Validação Customizada
// ---
fn validate_unit(unit: &str) -> Result<(), ValidationError> {
    if !STOCK_UNITS.contains(&unit) {
        let mut err = ValidationError::new("unit");
        err.message = Some("Unidade inválida. Use kg, unidade, litro, pacote ou peça.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: cadastro e edição de item
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPayload {
    // Slug predefinido ou nome de categoria personalizada
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    #[schema(example = "peixes")]
    pub category: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Tilápia de 1kg")]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(example = "50")]
    pub current_quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(example = "10")]
    pub min_stock_alert: Decimal,

    #[validate(custom(function = "validate_unit"))]
    #[schema(example = "kg")]
    pub unit: String,
}

impl From<InventoryItemPayload> for InventoryItemInput {
    fn from(payload: InventoryItemPayload) -> Self {
        Self {
            category: payload.category.trim().to_string(),
            name: payload.name.trim().to_string(),
            current_quantity: payload.current_quantity,
            min_stock_alert: payload.min_stock_alert,
            unit: payload.unit,
        }
    }
}

// ---
// Payload: movimentação de estoque
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementPayload {
    pub inventory_item_id: Uuid,

    #[serde(rename = "type")]
    pub movement_type: StockMovementType,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "5")]
    pub quantity: Decimal,

    // "AAAA-MM-DD"; sem data = hoje
    #[schema(example = "2024-03-03")]
    pub date: Option<String>,

    pub observation: Option<String>,
}

impl StockMovementPayload {
    fn into_input(self) -> Result<StockMovementInput, AppError> {
        let date = match self.date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(d) => parse_local_date(d)?,
            None => Local::now().date_naive(),
        };

        Ok(StockMovementInput {
            inventory_item_id: self.inventory_item_id,
            movement_type: self.movement_type,
            quantity: self.quantity,
            date,
            observation: self.observation.filter(|o| !o.trim().is_empty()),
        })
    }
}

// GET /api/inventory/items?category=peixes&search=til
#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Estoque",
    params(InventoryFilter),
    responses((status = 200, description = "Itens por categoria e nome", body = Vec<InventoryItem>)),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(filter): Query<InventoryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.inventory_service
        .list_items(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(items))
}

// POST /api/inventory/items
#[utoipa::path(
    post,
    path = "/api/inventory/items",
    tag = "Estoque",
    request_body = InventoryItemPayload,
    responses(
        (status = 201, description = "Item cadastrado", body = InventoryItem),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state.inventory_service
        .create_item(payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/inventory/items/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/items/{id}",
    tag = "Estoque",
    request_body = InventoryItemPayload,
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item atualizado (entradas e saídas preservadas)", body = InventoryItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state.inventory_service
        .update_item(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(item))
}

// DELETE /api/inventory/items/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/items/{id}",
    tag = "Estoque",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.inventory_service
        .delete_item(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/inventory/low-stock
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = "Estoque",
    responses((status = 200, description = "Itens no mínimo ou abaixo dele", body = Vec<InventoryItem>)),
    security(("api_jwt" = []))
)]
pub async fn list_low_stock(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state.inventory_service
        .low_stock_items()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(items))
}

// GET /api/inventory/summary
#[utoipa::path(
    get,
    path = "/api/inventory/summary",
    tag = "Estoque",
    responses((status = 200, description = "Totais por categoria", body = InventorySummary)),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state.inventory_service
        .summary()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

// GET /api/inventory/movements?item_id=...
#[utoipa::path(
    get,
    path = "/api/inventory/movements",
    tag = "Estoque",
    params(StockMovementQuery),
    responses((status = 200, description = "Histórico de movimentações", body = Vec<StockMovement>)),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<StockMovementQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state.inventory_service
        .list_movements(query.item_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movements))
}

// POST /api/inventory/movements
#[utoipa::path(
    post,
    path = "/api/inventory/movements",
    tag = "Estoque",
    request_body = StockMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada e item atualizado", body = StockMovementResult),
        (status = 400, description = "Quantidade ou data inválida"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<StockMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let input = payload
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let result = app_state.inventory_service
        .record_movement(input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(result)))
}

// POST /api/inventory/seed
#[utoipa::path(
    post,
    path = "/api/inventory/seed",
    tag = "Estoque",
    responses((status = 200, description = "Carga inicial (só com estoque vazio)", body = SeedResult)),
    security(("api_jwt" = []))
)]
pub async fn seed_inventory(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let result = app_state.inventory_service
        .seed_sample_inventory()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_payload_rejects_unknown_unit_and_negative_stock() {
        let payload: InventoryItemPayload = serde_json::from_str(
            r#"{"category":"peixes","name":"Salmão","currentQuantity":-1,"unit":"caixa"}"#,
        )
        .unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("unit"));
        assert!(fields.contains_key("current_quantity"));
    }

    #[test]
    fn item_payload_trims_names() {
        let payload: InventoryItemPayload = serde_json::from_str(
            r#"{"category":" Temperos ","name":" Sal grosso ","currentQuantity":3,"minStockAlert":1,"unit":"kg"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());

        let input: InventoryItemInput = payload.into();
        assert_eq!(input.category, "Temperos");
        assert_eq!(input.name, "Sal grosso");
    }

    #[test]
    fn movement_quantity_must_be_positive() {
        let payload: StockMovementPayload = serde_json::from_str(&format!(
            r#"{{"inventoryItemId":"{}","type":"exit","quantity":0}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn movement_without_date_uses_today() {
        let payload: StockMovementPayload = serde_json::from_str(&format!(
            r#"{{"inventoryItemId":"{}","type":"entry","quantity":2.5}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        let input = payload.into_input().unwrap();
        assert_eq!(input.date, Local::now().date_naive());
        assert_eq!(input.movement_type, StockMovementType::Entry);
    }

    #[test]
    fn movement_with_invalid_date_is_rejected() {
        let payload: StockMovementPayload = serde_json::from_str(&format!(
            r#"{{"inventoryItemId":"{}","type":"entry","quantity":1,"date":"03/03/2024"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(matches!(payload.into_input(), Err(AppError::InvalidDate(_))));
    }
}
