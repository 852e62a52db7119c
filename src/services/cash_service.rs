// src/services/cash_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CashMovementRepository,
    models::cash::{CashFilterKind, CashMovement, CashMovementInput, CashReport, CashReportQuery},
    reporting::{
        aggregate::sum_by,
        calendar::{month_range, week_range},
        DateRange,
    },
};

#[derive(Clone)]
pub struct CashService {
    repo: CashMovementRepository,
}

impl CashService {
    pub fn new(repo: CashMovementRepository) -> Self {
        Self { repo }
    }

    pub async fn list_movements(&self) -> Result<Vec<CashMovement>, AppError> {
        self.repo.list_all().await
    }

    pub async fn create_movement(&self, input: CashMovementInput) -> Result<CashMovement, AppError> {
        let movement = self.repo.create(&input).await?;
        tracing::info!("💵 Movimento de caixa registrado para {}", movement.date);
        Ok(movement)
    }

    pub async fn update_movement(&self, id: Uuid, input: CashMovementInput) -> Result<CashMovement, AppError> {
        self.repo
            .update(id, &input)
            .await?
            .ok_or(AppError::ResourceNotFound)
    }

    pub async fn delete_movement(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::ResourceNotFound);
        }
        Ok(())
    }

    pub async fn report(&self, query: &CashReportQuery) -> Result<CashReport, AppError> {
        // Seletor inválido falha antes de ir ao banco
        let range = resolve_filter(query)?;
        let movements = self.repo.list_all().await?;
        Ok(build_report(movements, range.as_ref()))
    }
}

/// Converte o filtro em intervalo. Semana ou mês sem seletor equivale a "todos".
pub fn resolve_filter(query: &CashReportQuery) -> Result<Option<DateRange>, AppError> {
    match (query.filter, query.week.as_deref(), query.month.as_deref()) {
        (CashFilterKind::Week, Some(week), _) if !week.is_empty() => week_range(week).map(Some),
        (CashFilterKind::Month, _, Some(month)) if !month.is_empty() => month_range(month).map(Some),
        _ => Ok(None),
    }
}

pub fn build_report(movements: Vec<CashMovement>, range: Option<&DateRange>) -> CashReport {
    let movements: Vec<CashMovement> = match range {
        Some(range) => movements
            .into_iter()
            .filter(|m| range.contains(m.date))
            .collect(),
        None => movements,
    };

    CashReport {
        total_sales: sum_by(&movements, |m| m.sales_value),
        count: movements.len(),
        movements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn movement(date: &str, sales: Decimal) -> CashMovement {
        CashMovement {
            id: Uuid::new_v4(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            change_value: dec!(0),
            exit_value: dec!(0),
            sales_value: sales,
            observation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn query(filter: CashFilterKind, week: Option<&str>, month: Option<&str>) -> CashReportQuery {
        CashReportQuery {
            filter,
            week: week.map(String::from),
            month: month.map(String::from),
        }
    }

    #[test]
    fn week_filter_keeps_only_that_iso_week() {
        let movements = vec![
            movement("2024-03-03", dec!(100)), // domingo, semana 9
            movement("2024-03-04", dec!(200)), // segunda, semana 10
            movement("2024-03-10", dec!(50)),  // domingo, semana 10
            movement("2024-03-11", dec!(70)),  // semana 11
        ];
        let range = resolve_filter(&query(CashFilterKind::Week, Some("2024-W10"), None)).unwrap();
        let report = build_report(movements, range.as_ref());

        assert_eq!(report.count, 2);
        assert_eq!(report.total_sales, dec!(250));
    }

    #[test]
    fn month_filter_uses_calendar_month() {
        let movements = vec![
            movement("2024-02-29", dec!(10)),
            movement("2024-03-01", dec!(20)),
            movement("2024-03-31", dec!(30)),
            movement("2024-04-01", dec!(40)),
        ];
        let range = resolve_filter(&query(CashFilterKind::Month, None, Some("2024-03"))).unwrap();
        let report = build_report(movements, range.as_ref());

        assert_eq!(report.count, 2);
        assert_eq!(report.total_sales, dec!(50));
    }

    #[test]
    fn filter_without_selector_lists_everything() {
        let range = resolve_filter(&query(CashFilterKind::Week, None, Some("2024-03"))).unwrap();
        assert!(range.is_none());

        let report = build_report(
            vec![movement("2024-01-01", dec!(1.5)), movement("2025-06-01", dec!(2.5))],
            range.as_ref(),
        );
        assert_eq!(report.count, 2);
        assert_eq!(report.total_sales, dec!(4.0));
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let err = resolve_filter(&query(CashFilterKind::Month, None, Some("2024-13"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidMonthSelector(_)));

        let err = resolve_filter(&query(CashFilterKind::Week, Some("2024-10"), None)).unwrap_err();
        assert!(matches!(err, AppError::InvalidWeekSelector(_)));
    }

    #[test]
    fn empty_report_totals_zero() {
        let report = build_report(Vec::new(), None);
        assert_eq!(report.count, 0);
        assert_eq!(report.total_sales, Decimal::ZERO);
    }
}
