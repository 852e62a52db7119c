// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Cards do topo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_cash: Decimal,          // Soma de todas as vendas registradas
    pub monthly_expenses: Decimal,    // Gastos do mês corrente
    pub low_stock_items: usize,       // Itens no ou abaixo do mínimo
    pub total_inventory_items: usize, // Itens cadastrados
}

// 2. Gráfico de caixa (últimos 31 lançamentos)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashChartPoint {
    #[schema(example = "03/03/2024")]
    pub date: String,
    #[schema(example = "1830.90")]
    pub value: Decimal,
}

// 3. Gastos por mês do ano corrente
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyChartPoint {
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = "mar.")]
    pub label: String,
    pub total: Decimal,
}
