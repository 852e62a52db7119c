// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        CashMovementRepository, ExpenseRepository, InventoryRepository, UserRepository,
        UserRoleRepository,
    },
    services::{
        auth::AuthService, cash_service::CashService, dashboard_service::DashboardService,
        expense_service::ExpenseService, finance_service::FinanceService,
        inventory_service::InventoryService, user_management_service::UserManagementService,
    },
};

// Variáveis de ambiente lidas na inicialização
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub jwt_expiration_days: i64,
    pub seed_sample_inventory: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do env real para poder testar
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let db_max_connections: u32 = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().with_context(|| format!("DB_MAX_CONNECTIONS inválido: {v}"))?,
            None => 5,
        };

        let jwt_expiration_days: i64 = match lookup("JWT_EXPIRATION_DAYS") {
            Some(v) => v.parse().with_context(|| format!("JWT_EXPIRATION_DAYS inválido: {v}"))?,
            None => 7,
        };

        let seed_sample_inventory = match lookup("SEED_SAMPLE_INVENTORY") {
            Some(v) => parse_flag(&v).with_context(|| format!("SEED_SAMPLE_INVENTORY inválido: {v}"))?,
            None => false,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr,
            db_max_connections,
            jwt_expiration_days,
            seed_sample_inventory,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "sim" => Some(true),
        "0" | "false" | "no" | "nao" | "não" => Some(false),
        _ => None,
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub cash_service: CashService,
    pub expense_service: ExpenseService,
    pub inventory_service: InventoryService,
    pub user_management_service: UserManagementService,
    pub dashboard_service: DashboardService,
    pub finance_service: FinanceService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let user_role_repo = UserRoleRepository::new(db_pool.clone());
        let cash_repo = CashMovementRepository::new(db_pool.clone());
        let expense_repo = ExpenseRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            user_role_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_days,
            db_pool.clone(),
        );
        let cash_service = CashService::new(cash_repo.clone());
        let expense_service = ExpenseService::new(expense_repo.clone());
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());
        let user_management_service =
            UserManagementService::new(user_repo, user_role_repo, db_pool.clone());
        let dashboard_service =
            DashboardService::new(cash_repo.clone(), expense_repo.clone(), inventory_repo);
        let finance_service = FinanceService::new(cash_repo, expense_repo);

        Ok(Self {
            db_pool,
            i18n_store: I18nStore::default(),
            auth_service,
            cash_service,
            expense_service,
            inventory_service,
            user_management_service,
            dashboard_service,
            finance_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/rancho"),
            ("JWT_SECRET", "segredo"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.jwt_expiration_days, 7);
        assert!(!config.seed_sample_inventory);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/rancho"),
            ("JWT_SECRET", "segredo"),
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("JWT_EXPIRATION_DAYS", "1"),
            ("SEED_SAMPLE_INVENTORY", "true"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.jwt_expiration_days, 1);
        assert!(config.seed_sample_inventory);
    }

    #[test]
    fn missing_required_values_fail() {
        assert!(Config::from_lookup(lookup(&[("JWT_SECRET", "segredo")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).is_err());
    }

    #[test]
    fn malformed_values_fail() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "segredo"),
            ("DB_MAX_CONNECTIONS", "muitas"),
        ]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "segredo"),
            ("SEED_SAMPLE_INVENTORY", "talvez"),
        ]));
        assert!(result.is_err());
    }
}
