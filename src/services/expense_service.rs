// src/services/expense_service.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ExpenseRepository,
    models::expense::{
        CategoryTotal, Expense, ExpenseCategory, ExpenseInput, ExpenseReport, WeekBreakdown,
    },
    reporting::{
        aggregate::{is_in_week_of_month, sum_by},
        calendar::{month_bounds, week_of_month},
    },
};

#[derive(Clone)]
pub struct ExpenseService {
    repo: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(repo: ExpenseRepository) -> Self {
        Self { repo }
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        self.repo.list_all().await
    }

    /// Gastos do mês, do dia 1 ao último dia.
    pub async fn list_month(&self, year: i32, month: u32) -> Result<Vec<Expense>, AppError> {
        let range = month_bounds(year, month)
            .ok_or_else(|| AppError::InvalidMonthSelector(format!("{year:04}-{month:02}")))?;
        self.repo.list_between(range.start, range.end).await
    }

    pub async fn create_expense(&self, input: ExpenseInput) -> Result<Expense, AppError> {
        let expense = self.repo.create(&input).await?;
        tracing::info!("🧾 Gasto registrado: {:?} em {}", expense.category, expense.date);
        Ok(expense)
    }

    pub async fn update_expense(&self, id: Uuid, input: ExpenseInput) -> Result<Expense, AppError> {
        self.repo
            .update(id, &input)
            .await?
            .ok_or(AppError::ResourceNotFound)
    }

    pub async fn delete_expense(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::ResourceNotFound);
        }
        Ok(())
    }

    pub async fn report(
        &self,
        year: i32,
        month: u32,
        category: Option<ExpenseCategory>,
        week: Option<u32>,
    ) -> Result<ExpenseReport, AppError> {
        let expenses = self.list_month(year, month).await?;
        Ok(build_report(expenses, category, week))
    }
}

/// Monta o relatório de um mês já carregado.
///
/// `monthly_total` ignora os filtros; a listagem, o total filtrado e o
/// detalhamento semanal usam só o que passou por categoria e semana.
pub fn build_report(
    month_expenses: Vec<Expense>,
    category: Option<ExpenseCategory>,
    week: Option<u32>,
) -> ExpenseReport {
    let monthly_total = sum_by(&month_expenses, |e| e.value);

    let expenses: Vec<Expense> = month_expenses
        .into_iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .filter(|e| week.is_none_or(|w| is_in_week_of_month(e, w)))
        .collect();

    ExpenseReport {
        filtered_total: sum_by(&expenses, |e| e.value),
        weekly_breakdown: weekly_breakdown(&expenses),
        monthly_total,
        expenses,
    }
}

// semana do mês -> categoria -> total; semanas sem gasto não aparecem
pub fn weekly_breakdown(expenses: &[Expense]) -> Vec<WeekBreakdown> {
    let mut weeks: BTreeMap<u32, BTreeMap<ExpenseCategory, Decimal>> = BTreeMap::new();
    for expense in expenses {
        *weeks
            .entry(week_of_month(expense.date))
            .or_default()
            .entry(expense.category)
            .or_default() += expense.value;
    }

    weeks
        .into_iter()
        .map(|(week, categories)| WeekBreakdown {
            week,
            total: categories.values().sum(),
            categories: categories
                .into_iter()
                .map(|(category, total)| CategoryTotal { category, total })
                .collect(),
        })
        .collect()
}
