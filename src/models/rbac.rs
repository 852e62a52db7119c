// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Os dois cargos do sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Gerente,     // Vira "gerente"
    Funcionario, // Vira "funcionario"
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Gerente => "Gerente",
            UserRole::Funcionario => "Funcionário",
        }
    }
}

// Tabela 'user_roles': um registro por conta, chaveado pelo uid
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleRecord {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub uid: Uuid,

    #[schema(example = "joao@rancho.com")]
    pub email: String,

    #[schema(example = "João")]
    pub display_name: String,

    pub role: UserRole,

    #[schema(example = true)]
    pub is_active: bool,

    // Quem criou ou atribuiu o cargo
    pub created_by: Uuid,

    pub created_at: DateTime<Utc>,
}

// Cria a conta de acesso e já atribui o cargo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub display_name: String,

    pub role: UserRole,
}

// Atribui cargo a uma conta que já existe (sem registro em 'user_roles')
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolePayload {
    pub uid: Uuid,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub display_name: String,

    pub role: UserRole,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRolePayload {
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_lowercase_portuguese_names() {
        assert_eq!(serde_json::to_string(&UserRole::Gerente).unwrap(), "\"gerente\"");
        let role: UserRole = serde_json::from_str("\"funcionario\"").unwrap();
        assert_eq!(role, UserRole::Funcionario);
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }
}
