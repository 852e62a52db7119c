// src/models/finance.rs
// Relatório de lucros: vendas (caixa) menos gastos, por mês, trimestre e ano.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Padrão: ano corrente
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitTotals {
    #[schema(example = "15000.00")]
    pub sales: Decimal,
    #[schema(example = "9000.00")]
    pub expenses: Decimal,
    #[schema(example = "6000.00")]
    pub profit: Decimal,
}

impl ProfitTotals {
    pub fn new(sales: Decimal, expenses: Decimal) -> Self {
        Self { sales, expenses, profit: sales - expenses }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProfit {
    #[schema(example = 1)]
    pub month: u32,
    #[schema(example = "jan.")]
    pub label: String,
    #[serde(flatten)]
    pub totals: ProfitTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyProfit {
    #[schema(example = "Q1")]
    pub quarter: String,
    #[serde(flatten)]
    pub totals: ProfitTotals,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub year: i32,
    pub months: Vec<MonthlyProfit>,
    pub quarters: Vec<QuarterlyProfit>,
    pub totals: ProfitTotals,
}
