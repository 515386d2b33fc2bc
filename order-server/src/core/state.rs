use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::printing::PrintDispatcher;
use crate::utils::AppError;

/// Server state - shared by every handler
///
/// Cloning is cheap: the pool is internally reference-counted and the
/// dispatcher sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Print channel dispatcher, selected once at startup
    pub print: Arc<PrintDispatcher>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, print: Arc<PrintDispatcher>) -> Self {
        Self {
            config,
            pool,
            print,
        }
    }

    /// Initialize server state
    ///
    /// 1. Open the database (runs migrations)
    /// 2. Select the print channel from configuration
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let print = Arc::new(PrintDispatcher::from_config(config));

        Ok(Self::new(config.clone(), db.pool, print))
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("pool", &"<SqlitePool>")
            .finish()
    }
}
