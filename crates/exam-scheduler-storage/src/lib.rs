pub mod error;
pub mod repository;

pub use error::{Result, StorageError};
pub use repository::SqliteExamRepository;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;

/// Initializes the SQLite database at `db_path`, creating it and running
/// migrations if it does not already exist.
pub async fn init_db(db_path: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_path)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(db_path, "exam scheduler database initialized");

    Ok(pool)
}

/// Opens the database read-only, without running migrations. Useful for
/// tools that only ever read the store.
pub async fn open_db_readonly(db_path: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_path)?
        .create_if_missing(false)
        .read_only(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    tracing::info!(db_path, "exam scheduler database opened read-only");

    Ok(pool)
}
