//! Database schema and connection management

use crate::{QueryError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Database connection wrapper
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    target: String,
}

impl Database {
    /// Connect to an existing database or create a new one
    pub async fn connect(path: &Path) -> Result<Self> {
        let target = path.display().to_string();
        let url = format!("sqlite:{}?mode=rwc", target);

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(QueryError::Internal)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| classify(e, &target))?;

        let db = Self { pool, target };
        db.run_migrations().await?;

        info!("Database connected: {}", db.target);
        Ok(db)
    }

    /// Connect to an in-memory database (for testing)
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(QueryError::Internal)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| classify(e, ":memory:"))?;

        let db = Self {
            pool,
            target: ":memory:".to_string(),
        };
        db.run_migrations().await?;

        info!("In-memory database initialized");
        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The configured connection target, reported in refused-connection errors
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Classify a storage fault into the failure taxonomy
    pub(crate) fn classify(&self, err: sqlx::Error) -> QueryError {
        classify(err, &self.target)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| self.classify(e))?;

        Ok(())
    }
}

fn classify(err: sqlx::Error, target: &str) -> QueryError {
    match &err {
        sqlx::Error::Io(io) if io.kind() == ErrorKind::ConnectionRefused => QueryError::Refused {
            target: target.to_string(),
        },
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            QueryError::Unavailable
        }
        _ => QueryError::Internal(err),
    }
}

const SCHEMA: &str = r#"
-- Components table
CREATE TABLE IF NOT EXISTS components (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    description TEXT,
    image TEXT,
    part_number TEXT,
    category TEXT,
    maker TEXT,
    stock INTEGER NOT NULL DEFAULT 0,
    price REAL NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_components_code ON components(code);
CREATE INDEX IF NOT EXISTS idx_components_category_maker
    ON components(category, maker);

-- Auxiliary spec-sheet records
CREATE TABLE IF NOT EXISTS component_details (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    component_id INTEGER NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    datasheet TEXT,
    material TEXT,
    length REAL,
    width REAL,
    weight REAL
);

CREATE INDEX IF NOT EXISTS idx_component_details_component
    ON component_details(component_id);

-- Bipolar-transistor extension records
CREATE TABLE IF NOT EXISTS bipolar_transistors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    component_id INTEGER NOT NULL REFERENCES components(id) ON DELETE CASCADE,
    transistor_type TEXT,
    collector_emitter_voltage REAL,
    collector_base_voltage REAL,
    emitter_base_voltage REAL,
    collector_current REAL,
    power_dissipation REAL
);

CREATE INDEX IF NOT EXISTS idx_bipolar_transistors_component
    ON bipolar_transistors(component_id);
"#;
