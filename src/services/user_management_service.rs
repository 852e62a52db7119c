// src/services/user_management_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{UserRepository, UserRoleRepository},
    models::rbac::{UserRole, UserRoleRecord},
    services::auth::{hash_password, normalize_email},
};

#[derive(Clone)]
pub struct UserManagementService {
    user_repo: UserRepository,
    role_repo: UserRoleRepository,
    pool: PgPool,
}

impl UserManagementService {
    pub fn new(user_repo: UserRepository, role_repo: UserRoleRepository, pool: PgPool) -> Self {
        Self { user_repo, role_repo, pool }
    }

    /// Cria a conta de acesso e o cargo juntos; se um falhar, nenhum fica gravado.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
        created_by: Uuid,
    ) -> Result<UserRoleRecord, AppError> {
        let email = normalize_email(email);
        let hashed_password = hash_password(password).await?;

        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Conta de acesso
        let user = self.user_repo
            .create_user(&mut *tx, &email, &hashed_password, Some(display_name))
            .await?;

        // 3. Cargo
        let record = self.role_repo
            .upsert(&mut *tx, user.id, &user.email, display_name, role, created_by)
            .await?;

        // 4. Commit
        tx.commit().await?;

        tracing::info!("👤 Usuário {} criado como {}", record.email, role.label());
        Ok(record)
    }

    // Conta que já existe mas ainda não tem cargo (ou troca o que tinha)
    pub async fn assign_role(
        &self,
        uid: Uuid,
        email: &str,
        display_name: &str,
        role: UserRole,
        assigned_by: Uuid,
    ) -> Result<UserRoleRecord, AppError> {
        self.user_repo
            .find_by_id(uid)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let record = self.role_repo
            .upsert(&self.pool, uid, &normalize_email(email), display_name, role, assigned_by)
            .await?;

        tracing::info!("👤 Cargo {} atribuído a {}", role.label(), record.email);
        Ok(record)
    }

    pub async fn list_users(&self) -> Result<Vec<UserRoleRecord>, AppError> {
        self.role_repo.list_all().await
    }

    pub async fn get_user(&self, uid: Uuid) -> Result<UserRoleRecord, AppError> {
        self.role_repo
            .find_by_uid(uid)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn update_role(&self, uid: Uuid, role: UserRole) -> Result<UserRoleRecord, AppError> {
        self.role_repo
            .update_role(uid, role)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn activate_user(&self, uid: Uuid) -> Result<UserRoleRecord, AppError> {
        self.set_active(uid, true).await
    }

    pub async fn deactivate_user(&self, uid: Uuid) -> Result<UserRoleRecord, AppError> {
        self.set_active(uid, false).await
    }

    async fn set_active(&self, uid: Uuid, is_active: bool) -> Result<UserRoleRecord, AppError> {
        let record = self.role_repo
            .set_active(uid, is_active)
            .await?
            .ok_or(AppError::UserNotFound)?;
        tracing::info!("👤 {} agora está {}", record.email, if is_active { "ativo" } else { "inativo" });
        Ok(record)
    }

    // Só o cargo sai; a conta de acesso continua existindo
    pub async fn delete_user(&self, uid: Uuid) -> Result<(), AppError> {
        if !self.role_repo.delete(uid).await? {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
