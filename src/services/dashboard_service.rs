// src/services/dashboard_service.rs

use chrono::{Datelike, Local, NaiveDate};

use crate::{
    common::error::AppError,
    db::{CashMovementRepository, ExpenseRepository, InventoryRepository},
    models::{
        cash::CashMovement,
        dashboard::{CashChartPoint, DashboardSummary, MonthlyChartPoint},
        expense::Expense,
        inventory::InventoryItem,
    },
    reporting::{
        aggregate::{monthly_totals, rolling_weeks, sum_by, sum_in_month},
        calendar::{format_br, month_short_label},
        WeeklyBucket,
    },
};

// Quantos lançamentos de caixa entram no gráfico
pub const CASH_CHART_LIMIT: usize = 31;

#[derive(Clone)]
pub struct DashboardService {
    cash_repo: CashMovementRepository,
    expense_repo: ExpenseRepository,
    inventory_repo: InventoryRepository,
}

impl DashboardService {
    pub fn new(
        cash_repo: CashMovementRepository,
        expense_repo: ExpenseRepository,
        inventory_repo: InventoryRepository,
    ) -> Self {
        Self { cash_repo, expense_repo, inventory_repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let movements = self.cash_repo.list_all().await?;
        let expenses = self.expense_repo.list_all().await?;
        let items = self.inventory_repo.list_items().await?;

        Ok(build_summary(&movements, &expenses, &items, today()))
    }

    pub async fn get_cash_chart(&self) -> Result<Vec<CashChartPoint>, AppError> {
        let movements = self.cash_repo.list_all().await?;
        Ok(cash_chart(&movements))
    }

    pub async fn get_weekly_expenses(&self) -> Result<Vec<WeeklyBucket>, AppError> {
        let expenses = self.expense_repo.list_all().await?;
        Ok(rolling_weeks(&expenses, today(), |e| e.value))
    }

    pub async fn get_monthly_expenses(&self) -> Result<Vec<MonthlyChartPoint>, AppError> {
        let expenses = self.expense_repo.list_all().await?;
        Ok(monthly_chart(&expenses, today().year()))
    }
}

// "Hoje" no calendário do servidor
fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn build_summary(
    movements: &[CashMovement],
    expenses: &[Expense],
    items: &[InventoryItem],
    today: NaiveDate,
) -> DashboardSummary {
    DashboardSummary {
        total_cash: sum_by(movements, |m| m.sales_value),
        monthly_expenses: sum_in_month(expenses, today.year(), today.month(), |e| e.value),
        low_stock_items: items.iter().filter(|i| i.is_low_stock()).count(),
        total_inventory_items: items.len(),
    }
}

/// Recebe os lançamentos do mais recente para o mais antigo e devolve os
/// últimos 31 em ordem cronológica.
pub fn cash_chart(movements_newest_first: &[CashMovement]) -> Vec<CashChartPoint> {
    movements_newest_first
        .iter()
        .take(CASH_CHART_LIMIT)
        .rev()
        .map(|m| CashChartPoint {
            date: format_br(m.date),
            value: m.sales_value,
        })
        .collect()
}

pub fn monthly_chart(expenses: &[Expense], year: i32) -> Vec<MonthlyChartPoint> {
    monthly_totals(expenses, year, |e| e.value)
        .into_iter()
        .zip(1u32..)
        .map(|(total, month)| MonthlyChartPoint {
            month,
            label: month_short_label(month).to_string(),
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::models::expense::ExpenseCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn movement(date: NaiveDate, sales: Decimal) -> CashMovement {
        CashMovement {
            id: Uuid::new_v4(),
            date,
            change_value: dec!(100),
            exit_value: dec!(10),
            sales_value: sales,
            observation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expense(date: NaiveDate, value: Decimal) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            date,
            category: ExpenseCategory::Mercearia,
            description: "compra".into(),
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(current: Decimal, min: Decimal) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            category: "carnes".into(),
            name: "Picanha".into(),
            initial_quantity: current,
            entries: Decimal::ZERO,
            exits: Decimal::ZERO,
            current_quantity: current,
            min_stock_alert: min,
            unit: "kg".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn summary_sums_all_sales_and_only_current_month_expenses() {
        let movements = vec![
            movement(date(2023, 12, 31), dec!(500)),
            movement(date(2024, 3, 1), dec!(250.50)),
        ];
        let expenses = vec![
            expense(date(2024, 2, 29), dec!(80)),
            expense(date(2024, 3, 1), dec!(40)),
            expense(date(2024, 3, 31), dec!(60)),
        ];
        let items = vec![item(dec!(2), dec!(5)), item(dec!(5), dec!(5)), item(dec!(9), dec!(5))];

        let summary = build_summary(&movements, &expenses, &items, date(2024, 3, 15));

        assert_eq!(summary.total_cash, dec!(750.50));
        assert_eq!(summary.monthly_expenses, dec!(100));
        assert_eq!(summary.low_stock_items, 2);
        assert_eq!(summary.total_inventory_items, 3);
    }

    #[test]
    fn cash_chart_keeps_latest_31_oldest_first() {
        let newest = date(2024, 3, 31);
        let movements: Vec<CashMovement> = (0..40u64)
            .map(|i| movement(newest.checked_sub_days(Days::new(i)).unwrap(), Decimal::from(i)))
            .collect();

        let chart = cash_chart(&movements);

        assert_eq!(chart.len(), 31);
        assert_eq!(chart[0].date, "01/03/2024");
        assert_eq!(chart[0].value, dec!(30));
        assert_eq!(chart[30].date, "31/03/2024");
        assert_eq!(chart[30].value, dec!(0));
    }

    #[test]
    fn cash_chart_with_few_movements() {
        let chart = cash_chart(&[movement(date(2024, 1, 5), dec!(12))]);
        assert_eq!(chart, vec![CashChartPoint { date: "05/01/2024".into(), value: dec!(12) }]);
        assert!(cash_chart(&[]).is_empty());
    }

    #[test]
    fn monthly_chart_has_twelve_labeled_months() {
        let expenses = vec![
            expense(date(2024, 1, 10), dec!(10)),
            expense(date(2024, 1, 20), dec!(5)),
            expense(date(2024, 12, 31), dec!(7)),
            expense(date(2023, 1, 10), dec!(999)),
        ];

        let chart = monthly_chart(&expenses, 2024);

        assert_eq!(chart.len(), 12);
        assert_eq!(chart[0].label, "jan.");
        assert_eq!(chart[0].total, dec!(15));
        assert_eq!(chart[1].total, Decimal::ZERO);
        assert_eq!(chart[11].month, 12);
        assert_eq!(chart[11].label, "dez.");
        assert_eq!(chart[11].total, dec!(7));
    }
}
