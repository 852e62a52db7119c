//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod reporting;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if config.seed_sample_inventory {
        let result = app_state.inventory_service.seed_sample_inventory().await?;
        tracing::info!("📦 Carga inicial do estoque: {} itens criados", result.items_created);
    }

    // Sessão do usuário logado (com token) + cadastro e login (públicas).
    // O route_layer só vale para as rotas declaradas antes dele.
    let auth_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::get_me))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let cash_routes = Router::new()
        .route("/"
               ,get(handlers::cash::list_movements)
               .post(handlers::cash::create_movement)
        )
        .route("/report", get(handlers::cash::get_report))
        .route("/{id}"
               ,put(handlers::cash::update_movement)
               .delete(handlers::cash::delete_movement)
        );

    let expense_routes = Router::new()
        .route("/"
               ,get(handlers::expenses::list_expenses)
               .post(handlers::expenses::create_expense)
        )
        .route("/month", get(handlers::expenses::list_month))
        .route("/report", get(handlers::expenses::get_report))
        .route("/categories", get(handlers::expenses::list_categories))
        .route("/{id}"
               ,put(handlers::expenses::update_expense)
               .delete(handlers::expenses::delete_expense)
        );

    let inventory_routes = Router::new()
        .route("/items"
               ,get(handlers::inventory::list_items)
               .post(handlers::inventory::create_item)
        )
        .route("/items/{id}"
               ,put(handlers::inventory::update_item)
               .delete(handlers::inventory::delete_item)
        )
        .route("/low-stock", get(handlers::inventory::list_low_stock))
        .route("/summary", get(handlers::inventory::get_summary))
        .route("/movements"
               ,get(handlers::inventory::list_movements)
               .post(handlers::inventory::create_movement)
        )
        .route("/seed", post(handlers::inventory::seed_inventory));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/cash-chart", get(handlers::dashboard::get_cash_chart))
        .route("/weekly-expenses", get(handlers::dashboard::get_weekly_expenses))
        .route("/monthly-expenses", get(handlers::dashboard::get_monthly_expenses));

    // Áreas de gerente (o RequireManager fica em cada handler)
    let report_routes = Router::new()
        .route("/profits", get(handlers::reports::get_profits));

    let user_routes = Router::new()
        .route("/"
               ,get(handlers::users::list_users)
               .post(handlers::users::create_user)
        )
        .route("/assign", post(handlers::users::assign_role))
        .route("/{uid}"
               ,get(handlers::users::get_user)
               .delete(handlers::users::delete_user)
        )
        .route("/{uid}/role", patch(handlers::users::update_role))
        .route("/{uid}/activate", post(handlers::users::activate_user))
        .route("/{uid}/deactivate", post(handlers::users::deactivate_user));

    // Tudo aqui exige token válido
    let protected_routes = Router::new()
        .nest("/api/cash-movements", cash_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/users", user_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
