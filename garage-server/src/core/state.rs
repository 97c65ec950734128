use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// Shared server state
///
/// Cloned into every handler; everything inside is cheap to clone (the
/// pool is an `Arc` internally).
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
}

impl ServerState {
    /// Open the database and assemble the state.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            pool: db.pool,
        })
    }

    /// State backed by an in-memory database, for tests.
    pub async fn in_memory() -> AppResult<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self {
            config: Config {
                work_dir: ".".into(),
                database_path: ":memory:".into(),
                http_port: 0,
                environment: "test".into(),
            },
            pool: db.pool,
        })
    }
}
