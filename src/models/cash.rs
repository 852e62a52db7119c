// src/models/cash.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, validation::validate_not_negative};
use crate::reporting::{parse_local_date, Dated};

// Movimento de caixa do dia
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashMovement {
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-03")]
    pub date: NaiveDate,

    #[schema(example = "200.00")]
    pub change_value: Decimal, // Troco
    #[schema(example = "50.00")]
    pub exit_value: Decimal, // Saídas
    #[schema(example = "1830.90")]
    pub sales_value: Decimal, // Vendas

    pub observation: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dated for CashMovement {
    fn local_date(&self) -> NaiveDate {
        self.date
    }
}

// Usado tanto no cadastro quanto na edição
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashMovementPayload {
    #[schema(example = "2024-03-03")]
    pub date: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub change_value: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub exit_value: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub sales_value: Decimal,

    pub observation: Option<String>,
}

impl CashMovementPayload {
    pub fn into_input(self) -> Result<CashMovementInput, AppError> {
        Ok(CashMovementInput {
            date: parse_local_date(&self.date)?,
            change_value: self.change_value,
            exit_value: self.exit_value,
            sales_value: self.sales_value,
            observation: self.observation.filter(|o| !o.trim().is_empty()),
        })
    }
}

// Payload já com a data convertida
#[derive(Debug, Clone)]
pub struct CashMovementInput {
    pub date: NaiveDate,
    pub change_value: Decimal,
    pub exit_value: Decimal,
    pub sales_value: Decimal,
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CashFilterKind {
    #[default]
    All,
    Week,
    Month,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CashReportQuery {
    #[serde(default)]
    pub filter: CashFilterKind,
    /// Semana no formato "AAAA-Www"
    pub week: Option<String>,
    /// Mês no formato "AAAA-MM"
    pub month: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashReport {
    pub movements: Vec<CashMovement>,
    #[schema(example = "5230.40")]
    pub total_sales: Decimal,
    pub count: usize,
}
