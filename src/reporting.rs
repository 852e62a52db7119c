// src/reporting.rs
// Recortes de calendário e somatórios usados pelos relatórios e pelo dashboard.
// Tudo aqui é puro: recebe os registros já carregados e devolve totais.

pub mod aggregate;
pub mod calendar;

pub use aggregate::{Dated, WeeklyBucket};
pub use calendar::{parse_local_date, DateRange};
