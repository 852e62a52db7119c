// src/db/expense_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::expense::{Expense, ExpenseInput},
};

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses ORDER BY date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    // Intervalo fechado [start, end]
    pub async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
             WHERE date >= $1 AND date <= $2
             ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn create(&self, input: &ExpenseInput) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (date, category, description, value)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.date)
        .bind(input.category)
        .bind(&input.description)
        .bind(input.value)
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn update(&self, id: Uuid, input: &ExpenseInput) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
               SET date = $2,
                   category = $3,
                   description = $4,
                   value = $5,
                   updated_at = NOW()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.date)
        .bind(input.category)
        .bind(&input.description)
        .bind(input.value)
        .fetch_optional(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
