// src/db/user_role_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::common::error::AppError;
use crate::models::rbac::{UserRole, UserRoleRecord};

#[derive(Clone)]
pub struct UserRoleRepository {
    pool: PgPool,
}

impl UserRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Grava o cargo com o uid como chave (sobrescreve se já existir)
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        uid: Uuid,
        email: &str,
        display_name: &str,
        role: UserRole,
        created_by: Uuid,
    ) -> Result<UserRoleRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, UserRoleRecord>(
            r#"
            INSERT INTO user_roles (uid, email, display_name, role, is_active, created_by)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            ON CONFLICT (uid) DO UPDATE
               SET email = EXCLUDED.email,
                   display_name = EXCLUDED.display_name,
                   role = EXCLUDED.role,
                   is_active = TRUE,
                   created_by = EXCLUDED.created_by,
                   created_at = NOW()
            RETURNING uid, email, display_name, role, is_active, created_by, created_at
            "#,
        )
        .bind(uid)
        .bind(email)
        .bind(display_name)
        .bind(role)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // uid sem conta correspondente em 'users'
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::UserNotFound;
                }
            }
            e.into()
        })?;

        Ok(record)
    }

    // 2. Lista todos, mais recentes primeiro
    pub async fn list_all(&self) -> Result<Vec<UserRoleRecord>, AppError> {
        let records = sqlx::query_as::<_, UserRoleRecord>(
            "SELECT uid, email, display_name, role, is_active, created_by, created_at FROM user_roles ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn find_by_uid(&self, uid: Uuid) -> Result<Option<UserRoleRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRoleRecord>(
            "SELECT uid, email, display_name, role, is_active, created_by, created_at FROM user_roles WHERE uid = $1"
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    // 3. Alterações feitas pelo gerente
    pub async fn update_role(&self, uid: Uuid, role: UserRole) -> Result<Option<UserRoleRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRoleRecord>(
            "UPDATE user_roles SET role = $2 WHERE uid = $1 RETURNING uid, email, display_name, role, is_active, created_by, created_at"
        )
        .bind(uid)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn set_active(&self, uid: Uuid, is_active: bool) -> Result<Option<UserRoleRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRoleRecord>(
            "UPDATE user_roles SET is_active = $2 WHERE uid = $1 RETURNING uid, email, display_name, role, is_active, created_by, created_at"
        )
        .bind(uid)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    // Remove só o cargo; a conta de acesso continua existindo
    pub async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE uid = $1")
            .bind(uid)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
