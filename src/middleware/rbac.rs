// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::rbac::UserRole,
};

/// 1. O Trait que define qual cargo a rota exige
pub trait RoleDef: Send + Sync + 'static {
    fn required() -> UserRole;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<R>(pub PhantomData<R>);

/// Gerente passa em qualquer exigência; funcionário só no que é de funcionário.
/// Conta sem cargo não passa.
pub fn has_role(actual: Option<UserRole>, required: UserRole) -> bool {
    match (actual, required) {
        (Some(UserRole::Gerente), _) => true,
        (Some(UserRole::Funcionario), UserRole::Funcionario) => true,
        _ => false,
    }
}

// 3. Implementação do FromRequestParts
impl<R, S> FromRequestParts<S> for RequireRole<R>
where
    R: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        // A. Extrai Usuário (colocado pelo auth_guard)
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Compara o cargo
        if !has_role(user.role, R::required()) {
            tracing::warn!(
                "🚫 {} tentou acessar área de {}",
                user.user.email,
                R::required().label()
            );
            return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CARGOS (TIPOS)
// ---

pub struct Manager;
impl RoleDef for Manager {
    fn required() -> UserRole { UserRole::Gerente }
}

pub type RequireManager = RequireRole<Manager>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_area_admits_only_gerente() {
        assert!(has_role(Some(UserRole::Gerente), Manager::required()));
        assert!(!has_role(Some(UserRole::Funcionario), Manager::required()));
        assert!(!has_role(None, Manager::required()));
    }

    #[test]
    fn employee_area_admits_both_roles() {
        assert!(has_role(Some(UserRole::Funcionario), UserRole::Funcionario));
        assert!(has_role(Some(UserRole::Gerente), UserRole::Funcionario));
        assert!(!has_role(None, UserRole::Funcionario));
    }
}
