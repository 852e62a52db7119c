// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erros internos da aplicação. Os handlers convertem para ApiError com o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Semana inválida: {0}")]
    InvalidWeekSelector(String),

    #[error("Mês inválido: {0}")]
    InvalidMonthSelector(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Usuário desativado")]
    AccountDisabled,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Registro não encontrado")]
    ResourceNotFound,

    #[error("Item de estoque não encontrado")]
    InventoryItemNotFound,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que sai para o cliente (já traduzido)
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidWeekSelector(_)
            | AppError::InvalidMonthSelector(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccountDisabled | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::ResourceNotFound
            | AppError::InventoryItemNotFound => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Chave usada no I18nStore
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "errors.validation",
            AppError::InvalidDate(_) => "errors.invalid_date",
            AppError::InvalidWeekSelector(_) => "errors.invalid_week",
            AppError::InvalidMonthSelector(_) => "errors.invalid_month",
            AppError::EmailAlreadyExists => "errors.email_already_exists",
            AppError::InvalidCredentials => "errors.invalid_credentials",
            AppError::InvalidToken => "errors.invalid_token",
            AppError::UserNotFound => "errors.user_not_found",
            AppError::AccountDisabled => "errors.account_disabled",
            AppError::Forbidden => "errors.forbidden",
            AppError::ResourceNotFound => "errors.resource_not_found",
            AppError::InventoryItemNotFound => "errors.inventory_item_not_found",
            _ => "errors.internal",
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status_code();
        let error = store.translate(&locale.0, self.message_key());

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            AppError::InvalidDate(value)
            | AppError::InvalidWeekSelector(value)
            | AppError::InvalidMonthSelector(value) => Some(json!({ "value": value })),
            _ => None,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        ApiError { status, error, details }
    }
}

// Agrupa as mensagens do validator por campo
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), json!(messages));
    }
    Value::Object(details)
}

// Usado pelos middlewares, que não têm acesso ao idioma do cliente.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn maps_domain_errors_to_http_status() {
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountDisabled.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InventoryItemNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::EmailAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidDate("2024-13-01".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        errors.add("value", err);

        let api = AppError::ValidationError(errors)
            .to_api_error(&Locale("pt".into()), &I18nStore::default());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["value"][0], "O valor não pode ser negativo.");
    }

    #[test]
    fn translates_message_to_requested_language() {
        let store = I18nStore::default();
        let pt = AppError::InvalidToken.to_api_error(&Locale("pt".into()), &store);
        let en = AppError::InvalidToken.to_api_error(&Locale("en".into()), &store);
        assert_ne!(pt.error, en.error);
        assert_eq!(en.error, "Invalid or missing authentication token.");
    }
}
