// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::reporting::Dated;

// --- 1. Categorias de produto ---
// Slugs predefinidos; qualquer outro texto é uma categoria personalizada.
pub const PRODUCT_CATEGORIES: &[(&str, &str)] = &[
    ("hortifrut", "Hortifrut"),
    ("mercearia", "Mercearia"),
    ("bebidas-bar", "Bebidas/Bar"),
    ("peixes", "Peixes"),
    ("carnes", "Carnes"),
    ("frios-congelados", "Frios/Congelados"),
    ("descartaveis", "Descartáveis"),
    ("limpeza", "Limpeza"),
    ("material-administrativo", "Material Administrativo"),
];

pub const STOCK_UNITS: &[&str] = &["kg", "unidade", "litro", "pacote", "peça"];

pub fn is_predefined_category(category: &str) -> bool {
    PRODUCT_CATEGORIES.iter().any(|(slug, _)| *slug == category)
}

// Rótulo de exibição; categorias personalizadas aparecem como foram digitadas
pub fn category_label(category: &str) -> &str {
    PRODUCT_CATEGORIES
        .iter()
        .find(|(slug, _)| *slug == category)
        .map(|(_, label)| *label)
        .unwrap_or(category)
}

// --- 2. Itens de estoque ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,

    #[schema(example = "peixes")]
    pub category: String,

    #[schema(example = "Tilápia de 1kg")]
    pub name: String,

    #[schema(example = "50")]
    pub initial_quantity: Decimal,
    #[schema(example = "12")]
    pub entries: Decimal,
    #[schema(example = "20")]
    pub exits: Decimal,
    #[schema(example = "42")]
    pub current_quantity: Decimal,

    #[schema(example = "10")]
    pub min_stock_alert: Decimal,

    #[schema(example = "kg")]
    pub unit: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.current_quantity <= self.min_stock_alert
    }
}

// Dados editáveis de um item (cadastro e edição)
#[derive(Debug, Clone)]
pub struct InventoryItemInput {
    pub category: String,
    pub name: String,
    pub current_quantity: Decimal,
    pub min_stock_alert: Decimal,
    pub unit: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryFilter {
    /// Slug predefinido filtra a categoria; qualquer outro valor lista as categorias personalizadas
    pub category: Option<String>,
    /// Busca sem diferenciar maiúsculas no nome
    pub search: Option<String>,
}

// --- 3. Movimentações de Estoque ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StockMovementType {
    Entry, // Vira "entry"
    Exit,  // Vira "exit"
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub inventory_item_id: Uuid,

    #[sqlx(rename = "movement_type")]
    #[serde(rename = "type")]
    pub movement_type: StockMovementType,

    #[schema(example = "5")]
    pub quantity: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-03")]
    pub date: NaiveDate,

    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Dated for StockMovement {
    fn local_date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone)]
pub struct StockMovementInput {
    pub inventory_item_id: Uuid,
    pub movement_type: StockMovementType,
    pub quantity: Decimal,
    pub date: NaiveDate,
    pub observation: Option<String>,
}

// Resultado de uma movimentação: o histórico gravado e o item já atualizado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementResult {
    pub movement: StockMovement,
    pub item: InventoryItem,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockMovementQuery {
    pub item_id: Option<Uuid>,
}

// --- 4. Resumo por categoria ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[schema(example = "peixes")]
    pub category: String,
    #[schema(example = "Peixes")]
    pub label: String,
    pub total_stock: Decimal,
    pub low_stock_count: usize,
    pub item_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub categories: Vec<CategorySummary>,
    pub low_stock_items: Vec<InventoryItem>,
    pub total_items: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub seeded: bool,
    pub items_created: usize,
}
