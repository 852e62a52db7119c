// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::inventory::{
        InventoryItem, InventoryItemInput, StockMovement, StockMovementInput, StockMovementType,
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items ORDER BY category ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn count_items<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    // Bloqueia escritas na tabela de itens até o fim da transação
    pub async fn lock_items<'e, E>(&self, executor: E) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("LOCK TABLE inventory_items IN EXCLUSIVE MODE")
            .execute(executor)
            .await?;
        Ok(())
    }

    // Sem item_id = todas as movimentações
    pub async fn list_movements(&self, item_id: Option<Uuid>) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT * FROM stock_movements
             WHERE ($1::uuid IS NULL OR inventory_item_id = $1)
             ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    // ---
    // Funções de "Escrita"
    // ---
    // As que recebem 'executor' rodam dentro de uma transação do service.

    /// Cria um item; a quantidade inicial é a quantidade atual informada.
    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        input: &InventoryItemInput,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items
                (category, name, initial_quantity, entries, exits, current_quantity, min_stock_alert, unit)
            VALUES ($1, $2, $3, 0, 0, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.category)
        .bind(&input.name)
        .bind(input.current_quantity)
        .bind(input.min_stock_alert)
        .bind(&input.unit)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    // Edição manual: entradas e saídas acumuladas não são tocadas
    pub async fn update_item(&self, id: Uuid, input: &InventoryItemInput) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
               SET category = $2,
                   name = $3,
                   current_quantity = $4,
                   min_stock_alert = $5,
                   unit = $6,
                   updated_at = NOW()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.category)
        .bind(&input.name)
        .bind(input.current_quantity)
        .bind(input.min_stock_alert)
        .bind(&input.unit)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Aplica a movimentação direto na linha do item, sem ler antes.
    /// O incremento acontece no banco, então duas movimentações simultâneas
    /// no mesmo item não se sobrescrevem.
    pub async fn apply_movement<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        movement_type: StockMovementType,
        quantity: Decimal,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (entry_delta, exit_delta) = match movement_type {
            StockMovementType::Entry => (quantity, Decimal::ZERO),
            StockMovementType::Exit => (Decimal::ZERO, quantity),
        };

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
               SET entries = entries + $2,
                   exits = exits + $3,
                   current_quantity = current_quantity + $2 - $3,
                   updated_at = NOW()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(entry_delta)
        .bind(exit_delta)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    /// Grava o histórico da movimentação.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        input: &StockMovementInput,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (inventory_item_id, movement_type, quantity, date, observation)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.inventory_item_id)
        .bind(input.movement_type)
        .bind(input.quantity)
        .bind(input.date)
        .bind(input.observation.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }
}
