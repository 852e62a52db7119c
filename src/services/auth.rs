// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{UserRepository, UserRoleRepository},
    models::{
        auth::{Claims, User},
        rbac::{UserRole, UserRoleRecord},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    user_role_repo: UserRoleRepository,
    jwt_secret: String,
    jwt_expiration_days: i64,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        user_role_repo: UserRoleRepository,
        jwt_secret: String,
        jwt_expiration_days: i64,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, user_role_repo, jwt_secret, jwt_expiration_days, pool }
    }

    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<String, AppError> {
        let email = normalize_email(email);
        let hashed_password = hash_password(password).await?;

        let mut tx = self.pool.begin().await?;

        // Dois cadastros simultâneos não podem ver o sistema vazio ao mesmo tempo
        self.user_repo.lock_registrations(&mut *tx).await?;
        let existing_users = self.user_repo.count_all(&mut *tx).await?;

        let new_user = self.user_repo
            .create_user(&mut *tx, &email, &hashed_password, display_name)
            .await?;

        if let Some(role) = bootstrap_role(existing_users) {
            self.user_role_repo
                .upsert(
                    &mut *tx,
                    new_user.id,
                    &new_user.email,
                    display_name.unwrap_or(&new_user.email),
                    role,
                    new_user.id,
                )
                .await?;
            tracing::info!("👑 Primeira conta cadastrada como gerente: {}", new_user.email);
        }

        tx.commit().await?;

        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Conta desativada pelo gerente não entra
        if let Some(record) = self.user_role_repo.find_by_uid(user.id).await? {
            if !record.is_active {
                return Err(AppError::AccountDisabled);
            }
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(token, &self.jwt_secret)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn find_role(&self, uid: Uuid) -> Result<Option<UserRoleRecord>, AppError> {
        self.user_role_repo.find_by_uid(uid).await
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        encode_token(user_id, &self.jwt_secret, self.jwt_expiration_days, Utc::now())
    }
}

/// Cargo dado automaticamente no cadastro.
///
/// Só a primeira conta do sistema vira gerente, senão ninguém conseguiria
/// cadastrar os demais. Contas que perderam o cargo continuam contando, então
/// apagar todos os cargos não reabre o cadastro de gerente.
pub fn bootstrap_role(existing_users: i64) -> Option<UserRole> {
    (existing_users == 0).then_some(UserRole::Gerente)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// bcrypt é lento de propósito; roda fora do runtime
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || {
        hash(&password_clone, bcrypt::DEFAULT_COST)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
    ?;
    Ok(hashed)
}

pub fn encode_token(
    user_id: Uuid,
    secret: &str,
    expiration_days: i64,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let expires_at = now + Duration::days(expiration_days);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn token_round_trip_keeps_subject() {
        let id = Uuid::new_v4();
        let token = encode_token(id, SECRET, 7, Utc::now()).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let token = encode_token(Uuid::new_v4(), SECRET, 7, Utc::now()).unwrap();
        assert!(matches!(decode_token(&token, "outro"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejects_expired_token() {
        let issued = Utc::now() - Duration::days(10);
        let token = encode_token(Uuid::new_v4(), SECRET, 7, issued).unwrap();
        assert!(matches!(decode_token(&token, SECRET), Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode_token("abc.def.ghi", SECRET), Err(AppError::InvalidToken)));
    }

    #[test]
    fn only_the_very_first_account_becomes_manager() {
        assert_eq!(bootstrap_role(0), Some(UserRole::Gerente));
        assert_eq!(bootstrap_role(1), None);
    }

    #[test]
    fn emptied_roles_table_does_not_reopen_manager_signup() {
        // o gerente apagou o último cargo, mas a conta dele continua em 'users'
        let existing_users = 1;
        assert_eq!(bootstrap_role(existing_users), None);
    }

    #[test]
    fn normalizes_email_before_lookup() {
        assert_eq!(normalize_email("  Gerente@Rancho.COM "), "gerente@rancho.com");
    }
}
