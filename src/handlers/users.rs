// src/handlers/users.rs
// Gestão de usuários: só gerentes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, rbac::RequireManager},
    models::rbac::{AssignRolePayload, CreateUserPayload, UpdateRolePayload, UserRoleRecord},
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Usuários",
    responses(
        (status = 200, description = "Usuários com cargo, mais recentes primeiro", body = Vec<UserRoleRecord>),
        (status = 403, description = "Apenas gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state.user_management_service
        .list_users()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(users))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Usuários",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Conta criada com o cargo", body = UserRoleRecord),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    manager: AuthenticatedUser,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let record = app_state.user_management_service
        .create_user(
            &payload.email,
            &payload.password,
            &payload.display_name,
            payload.role,
            manager.user.id,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(record)))
}

// POST /api/users/assign
#[utoipa::path(
    post,
    path = "/api/users/assign",
    tag = "Usuários",
    request_body = AssignRolePayload,
    responses(
        (status = 200, description = "Cargo atribuído a uma conta existente", body = UserRoleRecord),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    manager: AuthenticatedUser,
    Json(payload): Json<AssignRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let record = app_state.user_management_service
        .assign_role(
            payload.uid,
            &payload.email,
            &payload.display_name,
            payload.role,
            manager.user.id,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(record))
}

// GET /api/users/{uid}
#[utoipa::path(
    get,
    path = "/api/users/{uid}",
    tag = "Usuários",
    params(("uid" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Usuário", body = UserRoleRecord),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    Path(uid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.user_management_service
        .get_user(uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(record))
}

// PATCH /api/users/{uid}/role
#[utoipa::path(
    patch,
    path = "/api/users/{uid}/role",
    tag = "Usuários",
    request_body = UpdateRolePayload,
    params(("uid" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Cargo alterado", body = UserRoleRecord),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    Path(uid): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.user_management_service
        .update_role(uid, payload.role)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(record))
}

// POST /api/users/{uid}/activate
#[utoipa::path(
    post,
    path = "/api/users/{uid}/activate",
    tag = "Usuários",
    params(("uid" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Usuário ativado", body = UserRoleRecord),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn activate_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    Path(uid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.user_management_service
        .activate_user(uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(record))
}

// POST /api/users/{uid}/deactivate
#[utoipa::path(
    post,
    path = "/api/users/{uid}/deactivate",
    tag = "Usuários",
    params(("uid" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Usuário desativado", body = UserRoleRecord),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    Path(uid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state.user_management_service
        .deactivate_user(uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(record))
}

// DELETE /api/users/{uid}
#[utoipa::path(
    delete,
    path = "/api/users/{uid}",
    tag = "Usuários",
    params(("uid" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 204, description = "Cargo removido (a conta continua existindo)"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireManager,
    Path(uid): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.user_management_service
        .delete_user(uid)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
