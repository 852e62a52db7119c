// src/services/finance_service.rs
// Lucro = vendas do caixa - gastos do mês

use crate::{
    common::error::AppError,
    db::{CashMovementRepository, ExpenseRepository},
    models::{
        cash::CashMovement,
        expense::Expense,
        finance::{MonthlyProfit, ProfitReport, ProfitTotals, QuarterlyProfit},
    },
    reporting::{
        aggregate::{monthly_totals, quarterly_totals, yearly_total},
        calendar::{month_bounds, month_short_label},
    },
};

#[derive(Clone)]
pub struct FinanceService {
    cash_repo: CashMovementRepository,
    expense_repo: ExpenseRepository,
}

impl FinanceService {
    pub fn new(cash_repo: CashMovementRepository, expense_repo: ExpenseRepository) -> Self {
        Self { cash_repo, expense_repo }
    }

    pub async fn profit_report(&self, year: i32) -> Result<ProfitReport, AppError> {
        let invalid = || AppError::InvalidMonthSelector(format!("{year:04}"));
        let start = month_bounds(year, 1).ok_or_else(invalid)?.start;
        let end = month_bounds(year, 12).ok_or_else(invalid)?.end;

        let movements = self.cash_repo.list_all().await?;
        let expenses = self.expense_repo.list_between(start, end).await?;

        Ok(build_profit_report(&movements, &expenses, year))
    }
}

pub fn build_profit_report(movements: &[CashMovement], expenses: &[Expense], year: i32) -> ProfitReport {
    let sales = monthly_totals(movements, year, |m| m.sales_value);
    let costs = monthly_totals(expenses, year, |e| e.value);

    let months = sales
        .iter()
        .zip(costs.iter())
        .zip(1u32..)
        .map(|((s, c), month)| MonthlyProfit {
            month,
            label: month_short_label(month).to_string(),
            totals: ProfitTotals::new(*s, *c),
        })
        .collect();

    let quarters = quarterly_totals(&sales)
        .into_iter()
        .zip(quarterly_totals(&costs))
        .enumerate()
        .map(|(i, (s, c))| QuarterlyProfit {
            quarter: format!("Q{}", i + 1),
            totals: ProfitTotals::new(s, c),
        })
        .collect();

    ProfitReport {
        year,
        months,
        quarters,
        totals: ProfitTotals::new(yearly_total(&sales), yearly_total(&costs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::models::expense::ExpenseCategory;

    fn movement(y: i32, m: u32, d: u32, sales: Decimal) -> CashMovement {
        CashMovement {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            change_value: Decimal::ZERO,
            exit_value: Decimal::ZERO,
            sales_value: sales,
            observation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expense(y: i32, m: u32, d: u32, value: Decimal) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category: ExpenseCategory::Impostos,
            description: "DAS".into(),
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn profit_is_sales_minus_expenses_per_period() {
        let movements = vec![
            movement(2024, 1, 15, dec!(1000)),
            movement(2024, 2, 10, dec!(500)),
            movement(2024, 4, 1, dec!(300)),
            movement(2023, 12, 31, dec!(9999)),
        ];
        let expenses = vec![
            expense(2024, 1, 20, dec!(400)),
            expense(2024, 5, 5, dec!(800)),
        ];

        let report = build_profit_report(&movements, &expenses, 2024);

        assert_eq!(report.year, 2024);
        assert_eq!(report.months.len(), 12);
        assert_eq!(report.months[0].label, "jan.");
        assert_eq!(report.months[0].totals, ProfitTotals::new(dec!(1000), dec!(400)));
        assert_eq!(report.months[0].totals.profit, dec!(600));
        assert_eq!(report.months[4].totals.profit, dec!(-800));

        assert_eq!(report.quarters.len(), 4);
        assert_eq!(report.quarters[0].quarter, "Q1");
        assert_eq!(report.quarters[0].totals.profit, dec!(1100));
        assert_eq!(report.quarters[1].totals, ProfitTotals::new(dec!(300), dec!(800)));
        assert_eq!(report.quarters[3].totals.sales, Decimal::ZERO);

        assert_eq!(report.totals, ProfitTotals::new(dec!(1800), dec!(1200)));
    }

    #[test]
    fn empty_year_is_all_zero() {
        let report = build_profit_report(&[], &[], 2025);
        assert!(report.months.iter().all(|m| m.totals == ProfitTotals::default()));
        assert_eq!(report.totals.profit, Decimal::ZERO);
    }
}
