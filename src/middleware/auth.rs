// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        auth::User,
        rbac::{UserRole, UserRoleRecord},
    },
};

// Usuário logado + cargo (None = conta sem cargo atribuído)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub role: Option<UserRole>,
}

// Valida o Bearer, carrega a conta e o cargo e guarda nos "extensions"
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let TypedHeader(authorization) = bearer.ok_or_else(|| to_api(AppError::InvalidToken))?;

    let user = app_state.auth_service
        .validate_token(authorization.token())
        .await
        .map_err(to_api)?;

    let record = app_state.auth_service
        .find_role(user.id)
        .await
        .map_err(to_api)?;
    let role = active_role(record.as_ref()).map_err(to_api)?;

    request.extensions_mut().insert(AuthenticatedUser { user, role });
    Ok(next.run(request).await)
}

/// Cargo efetivo da conta. Registro desativado bloqueia o acesso.
pub fn active_role(record: Option<&UserRoleRecord>) -> Result<Option<UserRole>, AppError> {
    match record {
        Some(r) if !r.is_active => Err(AppError::AccountDisabled),
        Some(r) => Ok(Some(r.role)),
        None => Ok(None),
    }
}

// Extrator para obter o usuário autenticado diretamente nos handlers
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(role: UserRole, is_active: bool) -> UserRoleRecord {
        let uid = Uuid::new_v4();
        UserRoleRecord {
            uid,
            email: "joao@rancho.com".into(),
            display_name: "João".into(),
            role,
            is_active,
            created_by: uid,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn active_record_yields_its_role() {
        let r = record(UserRole::Funcionario, true);
        assert_eq!(active_role(Some(&r)).unwrap(), Some(UserRole::Funcionario));
    }

    #[test]
    fn deactivated_record_is_refused() {
        let r = record(UserRole::Gerente, false);
        assert!(matches!(active_role(Some(&r)), Err(AppError::AccountDisabled)));
    }

    #[test]
    fn account_without_record_has_no_role() {
        assert_eq!(active_role(None).unwrap(), None);
    }
}
