// src/db/cash_repo.rs

use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::cash::{CashMovement, CashMovementInput},
};

#[derive(Clone)]
pub struct CashMovementRepository {
    pool: PgPool,
}

impl CashMovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Mais recentes primeiro
    pub async fn list_all(&self) -> Result<Vec<CashMovement>, AppError> {
        let movements = sqlx::query_as::<_, CashMovement>(
            "SELECT * FROM cash_movements ORDER BY date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    pub async fn create(&self, input: &CashMovementInput) -> Result<CashMovement, AppError> {
        let movement = sqlx::query_as::<_, CashMovement>(
            r#"
            INSERT INTO cash_movements (date, change_value, exit_value, sales_value, observation)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.date)
        .bind(input.change_value)
        .bind(input.exit_value)
        .bind(input.sales_value)
        .bind(input.observation.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(movement)
    }

    pub async fn update(&self, id: Uuid, input: &CashMovementInput) -> Result<Option<CashMovement>, AppError> {
        let movement = sqlx::query_as::<_, CashMovement>(
            r#"
            UPDATE cash_movements
               SET date = $2,
                   change_value = $3,
                   exit_value = $4,
                   sales_value = $5,
                   observation = $6,
                   updated_at = NOW()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.date)
        .bind(input.change_value)
        .bind(input.exit_value)
        .bind(input.sales_value)
        .bind(input.observation.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(movement)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cash_movements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
