// src/reporting/aggregate.rs

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::reporting::calendar::{day_month_label, week_of_month, DateRange};

pub const ROLLING_WEEKS: u64 = 8;

// Qualquer registro com data de calendário pode ser agrupado
pub trait Dated {
    fn local_date(&self) -> NaiveDate;
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    #[schema(example = "4/3")]
    pub label: String,
    pub range: DateRange,
    #[schema(example = "350.00")]
    pub total: Decimal,
}

pub fn sum_by<T, F>(records: &[T], value: F) -> Decimal
where
    F: Fn(&T) -> Decimal,
{
    records.iter().map(value).sum()
}

pub fn sum_in_range<T, F>(records: &[T], range: &DateRange, value: F) -> Decimal
where
    T: Dated,
    F: Fn(&T) -> Decimal,
{
    records
        .iter()
        .filter(|r| range.contains(r.local_date()))
        .map(value)
        .sum()
}

pub fn is_in_month<T: Dated>(record: &T, year: i32, month: u32) -> bool {
    let date = record.local_date();
    date.year() == year && date.month() == month
}

pub fn sum_in_month<T, F>(records: &[T], year: i32, month: u32, value: F) -> Decimal
where
    T: Dated,
    F: Fn(&T) -> Decimal,
{
    records
        .iter()
        .filter(|r| is_in_month(*r, year, month))
        .map(value)
        .sum()
}

// Semana 1 = dias 1-7, semana 2 = dias 8-14, ...
pub fn is_in_week_of_month<T: Dated>(record: &T, week: u32) -> bool {
    week_of_month(record.local_date()) == week
}

/// As últimas 8 semanas (segunda a domingo), da mais antiga para a atual.
///
/// A semana corrente é a que contém `today`. Cada registro cai em no máximo
/// um balde porque as semanas não se sobrepõem.
pub fn rolling_weeks<T, F>(records: &[T], today: NaiveDate, value: F) -> Vec<WeeklyBucket>
where
    T: Dated,
    F: Fn(&T) -> Decimal,
{
    // segunda = 0, ..., domingo = 6
    let day_of_week = u64::from(today.weekday().num_days_from_monday());

    (0..ROLLING_WEEKS)
        .rev()
        .filter_map(|i| {
            let start = today.checked_sub_days(Days::new(i * 7 + day_of_week))?;
            let end = start.checked_add_days(Days::new(6))?;
            let range = DateRange { start, end };

            Some(WeeklyBucket {
                label: day_month_label(start),
                total: sum_in_range(records, &range, &value),
                range,
            })
        })
        .collect()
}

/// Totais de janeiro a dezembro do ano informado.
pub fn monthly_totals<T, F>(records: &[T], year: i32, value: F) -> [Decimal; 12]
where
    T: Dated,
    F: Fn(&T) -> Decimal,
{
    let mut totals = [Decimal::ZERO; 12];
    for record in records {
        let date = record.local_date();
        if date.year() == year {
            totals[date.month0() as usize] += value(record);
        }
    }
    totals
}

// Q1 = jan-mar, Q2 = abr-jun, ...
pub fn quarterly_totals(monthly: &[Decimal; 12]) -> [Decimal; 4] {
    let mut quarters = [Decimal::ZERO; 4];
    for (quarter, months) in quarters.iter_mut().zip(monthly.chunks(3)) {
        *quarter = months.iter().sum();
    }
    quarters
}

pub fn yearly_total(monthly: &[Decimal; 12]) -> Decimal {
    monthly.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Debug)]
    struct Entry {
        date: NaiveDate,
        value: Decimal,
    }

    impl Dated for Entry {
        fn local_date(&self) -> NaiveDate {
            self.date
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(y: i32, m: u32, d: u32, value: Decimal) -> Entry {
        Entry { date: date(y, m, d), value }
    }

    #[test]
    fn rolling_weeks_returns_eight_ordered_adjacent_buckets() {
        // quarta-feira
        let today = date(2024, 3, 13);
        let buckets = rolling_weeks::<Entry, _>(&[], today, |e| e.value);

        assert_eq!(buckets.len(), 8);
        assert_eq!(buckets[7].range.start, date(2024, 3, 11));
        assert_eq!(buckets[7].range.end, date(2024, 3, 17));
        assert_eq!(buckets[0].range.start, date(2024, 1, 22));
        assert_eq!(buckets[0].label, "22/1");

        for pair in buckets.windows(2) {
            assert_eq!(pair[0].range.end.succ_opt().unwrap(), pair[1].range.start);
        }
        for bucket in &buckets {
            assert_eq!(bucket.range.start.weekday(), chrono::Weekday::Mon);
            assert_eq!((bucket.range.end - bucket.range.start).num_days(), 6);
        }
    }

    #[test]
    fn rolling_weeks_on_sunday_belongs_to_week_started_previous_monday() {
        let buckets = rolling_weeks::<Entry, _>(&[], date(2024, 3, 17), |e| e.value);
        assert_eq!(buckets[7].range.start, date(2024, 3, 11));
    }

    #[test]
    fn rolling_weeks_sums_each_record_once() {
        let today = date(2024, 3, 13);
        let records = vec![
            entry(2024, 3, 11, dec!(10)),  // segunda da semana atual
            entry(2024, 3, 17, dec!(5)),   // domingo da semana atual
            entry(2024, 3, 10, dec!(7)),   // domingo da semana anterior
            entry(2024, 1, 22, dec!(1)),   // primeiro dia do balde mais antigo
            entry(2024, 1, 21, dec!(100)), // fora da janela
            entry(2024, 3, 18, dec!(100)), // depois da janela
        ];

        let buckets = rolling_weeks(&records, today, |e| e.value);
        let totals: Vec<Decimal> = buckets.iter().map(|b| b.total).collect();

        assert_eq!(totals[7], dec!(15));
        assert_eq!(totals[6], dec!(7));
        assert_eq!(totals[0], dec!(1));
        assert_eq!(totals.iter().copied().sum::<Decimal>(), dec!(23));
    }

    #[test]
    fn month_and_week_of_month_filters_combine() {
        let expenses = vec![entry(2024, 3, 3, dec!(100)), entry(2024, 3, 10, dec!(50))];

        let month = sum_in_month(&expenses, 2024, 3, |e| e.value);
        assert_eq!(month, dec!(150));

        assert!(is_in_week_of_month(&expenses[0], 1));
        assert!(is_in_week_of_month(&expenses[1], 2));
        assert!(!is_in_week_of_month(&expenses[1], 1));
    }

    #[test]
    fn monthly_quarterly_and_yearly_totals() {
        let records = vec![
            entry(2024, 1, 15, dec!(10)),
            entry(2024, 3, 31, dec!(20)),
            entry(2024, 4, 1, dec!(5)),
            entry(2024, 12, 31, dec!(1.5)),
            entry(2023, 12, 31, dec!(999)),
        ];

        let monthly = monthly_totals(&records, 2024, |e| e.value);
        assert_eq!(monthly[0], dec!(10));
        assert_eq!(monthly[2], dec!(20));
        assert_eq!(monthly[3], dec!(5));
        assert_eq!(monthly[11], dec!(1.5));

        assert_eq!(quarterly_totals(&monthly), [dec!(30), dec!(5), dec!(0), dec!(1.5)]);
        assert_eq!(yearly_total(&monthly), dec!(36.5));
    }

    #[test]
    fn range_helpers_are_inclusive() {
        let records = vec![
            entry(2024, 2, 1, dec!(1)),
            entry(2024, 2, 29, dec!(2)),
            entry(2024, 3, 1, dec!(4)),
        ];
        let feb = DateRange { start: date(2024, 2, 1), end: date(2024, 2, 29) };

        assert_eq!(sum_in_range(&records, &feb, |e| e.value), dec!(3));
        assert_eq!(sum_by(&records, |e| e.value), dec!(7));
    }
}
