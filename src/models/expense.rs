// src/models/expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, validation::validate_not_negative};
use crate::reporting::{parse_local_date, Dated};

// Categorias fixas de gastos (os nomes saem exatamente assim no JSON e no banco)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "expense_category")]
pub enum ExpenseCategory {
    Mercearia,
    Hortifruti,
    Bar,
    Peixes,
    Carnes,
    #[serde(rename = "Frios/Congelados")]
    #[sqlx(rename = "Frios/Congelados")]
    FriosCongelados,
    Limpeza,
    #[serde(rename = "Descartáveis")]
    #[sqlx(rename = "Descartáveis")]
    Descartaveis,
    #[serde(rename = "Material administrativo")]
    #[sqlx(rename = "Material administrativo")]
    MaterialAdministrativo,
    Boletos,
    #[serde(rename = "Serviços")]
    #[sqlx(rename = "Serviços")]
    Servicos,
    Impostos,
    #[serde(rename = "Funcionários")]
    #[sqlx(rename = "Funcionários")]
    Funcionarios,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 13] = [
        ExpenseCategory::Mercearia,
        ExpenseCategory::Hortifruti,
        ExpenseCategory::Bar,
        ExpenseCategory::Peixes,
        ExpenseCategory::Carnes,
        ExpenseCategory::FriosCongelados,
        ExpenseCategory::Limpeza,
        ExpenseCategory::Descartaveis,
        ExpenseCategory::MaterialAdministrativo,
        ExpenseCategory::Boletos,
        ExpenseCategory::Servicos,
        ExpenseCategory::Impostos,
        ExpenseCategory::Funcionarios,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-03")]
    pub date: NaiveDate,

    pub category: ExpenseCategory,

    #[schema(example = "Compra semanal de legumes")]
    pub description: String,

    #[schema(example = "100.00")]
    pub value: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dated for Expense {
    fn local_date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    #[schema(example = "2024-03-03")]
    pub date: String,

    pub category: ExpenseCategory,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub value: Decimal,
}

impl ExpensePayload {
    pub fn into_input(self) -> Result<ExpenseInput, AppError> {
        Ok(ExpenseInput {
            date: parse_local_date(&self.date)?,
            category: self.category,
            description: self.description.trim().to_string(),
            value: self.value,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    pub value: Decimal,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    #[validate(range(min = 1, max = 9999, message = "Ano inválido."))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "Mês inválido."))]
    pub month: u32,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpenseReportQuery {
    #[validate(range(min = 1, max = 9999, message = "Ano inválido."))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "Mês inválido."))]
    pub month: u32,
    /// Sem categoria ou "all" = todas
    #[serde(default, deserialize_with = "deserialize_category_filter")]
    #[param(value_type = Option<String>, example = "Hortifruti")]
    pub category: Option<ExpenseCategory>,
    /// Semana do mês (1 a 5); sem semana = todas
    #[validate(range(min = 1, max = 5, message = "A semana do mês vai de 1 a 5."))]
    pub week: Option<u32>,
}

// "all" e vazio viram "sem filtro"; o resto precisa ser uma categoria fixa
fn deserialize_category_filter<'de, D>(deserializer: D) -> Result<Option<ExpenseCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(name) => serde_json::from_value(serde_json::Value::String(name.to_owned()))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    #[schema(example = "100.00")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekBreakdown {
    #[schema(example = 1)]
    pub week: u32,
    pub total: Decimal,
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub expenses: Vec<Expense>,
    // Soma do que passou pelos filtros de categoria/semana
    pub filtered_total: Decimal,
    // Soma do mês inteiro, sem filtros
    pub monthly_total: Decimal,
    pub weekly_breakdown: Vec<WeekBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_query(json: &str) -> Result<ExpenseReportQuery, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn report_category_all_means_no_filter() {
        let query = report_query(r#"{"year":2024,"month":3,"category":"all"}"#).unwrap();
        assert_eq!(query.category, None);

        let query = report_query(r#"{"year":2024,"month":3}"#).unwrap();
        assert_eq!(query.category, None);
    }

    #[test]
    fn report_category_accepts_display_names_only() {
        let query = report_query(r#"{"year":2024,"month":3,"category":"Frios/Congelados"}"#).unwrap();
        assert_eq!(query.category, Some(ExpenseCategory::FriosCongelados));

        assert!(report_query(r#"{"year":2024,"month":3,"category":"Padaria"}"#).is_err());
    }

    #[test]
    fn categories_keep_their_display_spelling() {
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::FriosCongelados).unwrap(),
            "\"Frios/Congelados\""
        );
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::MaterialAdministrativo).unwrap(),
            "\"Material administrativo\""
        );
        let parsed: ExpenseCategory = serde_json::from_str("\"Funcionários\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::Funcionarios);
        assert!(serde_json::from_str::<ExpenseCategory>("\"Outros\"").is_err());
    }
}
