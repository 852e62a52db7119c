// src/reporting/calendar.rs

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::AppError;

// Intervalo fechado de datas de calendário [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-01-07")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Converte "AAAA-MM-DD" em data de calendário montando ano/mês/dia direto,
/// sem passar por nenhum parser com fuso horário.
pub fn parse_local_date(value: &str) -> Result<NaiveDate, AppError> {
    let invalid = || AppError::InvalidDate(value.to_string());

    let mut parts = value.trim().split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let year: i32 = parse_segment(y).ok_or_else(invalid)?;
    let month: u32 = parse_segment(m).ok_or_else(invalid)?;
    let day: u32 = parse_segment(d).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

// Só dígitos; "+3" e " 3" não passam
fn parse_segment<T: std::str::FromStr>(segment: &str) -> Option<T> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Semana no formato "AAAA-Www".
///
/// A semana 1 começa na primeira segunda-feira em ou após 1º de janeiro.
/// Não é a numeração ISO-8601: dias de janeiro antes dessa segunda não
/// pertencem a nenhuma semana do ano.
pub fn week_range(selector: &str) -> Result<DateRange, AppError> {
    let invalid = || AppError::InvalidWeekSelector(selector.to_string());

    let (y, w) = selector.trim().split_once("-W").ok_or_else(invalid)?;
    let year: i32 = parse_segment(y).ok_or_else(invalid)?;
    let week: u64 = parse_segment(w).ok_or_else(invalid)?;
    if !(1..=53).contains(&week) {
        return Err(invalid());
    }

    let first_day = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    // getDay(): domingo = 0
    let first_weekday = u64::from(first_day.weekday().num_days_from_sunday());
    let days_to_first_monday = (8 - first_weekday) % 7;

    let start = first_day
        .checked_add_days(Days::new(days_to_first_monday + (week - 1) * 7))
        .ok_or_else(invalid)?;
    let end = start.checked_add_days(Days::new(6)).ok_or_else(invalid)?;

    Ok(DateRange { start, end })
}

/// Mês no formato "AAAA-MM": do dia 1 até o último dia do mês.
pub fn month_range(selector: &str) -> Result<DateRange, AppError> {
    let invalid = || AppError::InvalidMonthSelector(selector.to_string());

    let (y, m) = selector.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = parse_segment(y).ok_or_else(invalid)?;
    let month: u32 = parse_segment(m).ok_or_else(invalid)?;

    month_bounds(year, month).ok_or_else(invalid)
}

pub fn month_bounds(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    // "dia 0" do mês seguinte
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(DateRange { start, end })
}

/// Fatias fixas de 7 dias a partir do dia 1: 1-7 → 1, 8-14 → 2, ..., 29-31 → 5.
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}

// "dd/mm/aaaa"
pub fn format_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

// "d/m", sem zeros à esquerda (rótulo dos gráficos semanais)
pub fn day_month_label(date: NaiveDate) -> String {
    format!("{}/{}", date.day(), date.month())
}

const MONTH_SHORT_PT: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

pub fn month_short_label(month: u32) -> &'static str {
    MONTH_SHORT_PT
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_components_exactly() {
        for (raw, expected) in [
            ("2024-03-03", date(2024, 3, 3)),
            ("1999-12-31", date(1999, 12, 31)),
            ("2024-02-29", date(2024, 2, 29)),
            ("2025-01-01", date(2025, 1, 1)),
        ] {
            let parsed = parse_local_date(raw).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.format("%Y-%m-%d").to_string(), raw);
        }
    }

    #[test]
    fn rejects_malformed_or_impossible_dates() {
        for raw in ["", "2024-03", "2024-03-03-01", "2024/03/03", "2024-13-01", "2023-02-29", "2024-0a-01", "2024-+3-01"] {
            assert!(
                matches!(parse_local_date(raw), Err(AppError::InvalidDate(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn first_week_of_2024_starts_on_monday_jan_first() {
        let range = week_range("2024-W01").unwrap();
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.start.weekday(), chrono::Weekday::Mon);
        assert_eq!(range.end, date(2024, 1, 7));
        assert_eq!((range.end - range.start).num_days(), 6);
    }

    #[test]
    fn week_one_skips_days_before_first_monday() {
        // 2023-01-01 foi domingo: a semana 1 começa no dia 2
        assert_eq!(week_range("2023-W01").unwrap().start, date(2023, 1, 2));
        // 2025-01-01 foi quarta: a semana 1 começa no dia 6 (ISO diria 30/12/2024)
        assert_eq!(week_range("2025-W01").unwrap().start, date(2025, 1, 6));
        assert_eq!(week_range("2025-W10").unwrap().start, date(2025, 3, 10));
    }

    #[test]
    fn late_weeks_may_spill_into_next_year() {
        let range = week_range("2024-W53").unwrap();
        assert_eq!(range.start, date(2024, 12, 30));
        assert_eq!(range.end, date(2025, 1, 5));
    }

    #[test]
    fn rejects_bad_week_selectors() {
        for raw in ["2024-01", "2024-W00", "2024-W54", "W01", "2024-Wxx"] {
            assert!(matches!(week_range(raw), Err(AppError::InvalidWeekSelector(_))));
        }
    }

    #[test]
    fn month_range_handles_leap_years() {
        let feb_2024 = month_range("2024-02").unwrap();
        assert_eq!(feb_2024.start, date(2024, 2, 1));
        assert_eq!(feb_2024.end, date(2024, 2, 29));

        assert_eq!(month_range("2023-02").unwrap().end, date(2023, 2, 28));
        assert_eq!(month_range("2024-12").unwrap().end, date(2024, 12, 31));
        assert_eq!(month_range("2024-04").unwrap().end, date(2024, 4, 30));
    }

    #[test]
    fn rejects_bad_month_selectors() {
        for raw in ["2024", "2024-13", "2024-00", "abcd-01"] {
            assert!(matches!(month_range(raw), Err(AppError::InvalidMonthSelector(_))));
        }
    }

    #[test]
    fn week_of_month_uses_fixed_seven_day_slices() {
        assert_eq!(week_of_month(date(2024, 3, 1)), 1);
        assert_eq!(week_of_month(date(2024, 3, 7)), 1);
        assert_eq!(week_of_month(date(2024, 3, 8)), 2);
        assert_eq!(week_of_month(date(2024, 3, 28)), 4);
        assert_eq!(week_of_month(date(2024, 3, 29)), 5);
        assert_eq!(week_of_month(date(2024, 3, 31)), 5);
    }

    #[test]
    fn labels() {
        assert_eq!(format_br(date(2024, 3, 5)), "05/03/2024");
        assert_eq!(day_month_label(date(2024, 3, 5)), "5/3");
        assert_eq!(month_short_label(1), "jan.");
        assert_eq!(month_short_label(12), "dez.");
        assert_eq!(month_short_label(0), "");
    }
}
