// SQLite pool for the list, the history and the catalog
//
// The schema ships inside the binary and is applied on every open.

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

const MAX_CONNECTIONS: u32 = 5;

/// Shared handle to the list database. Cloning shares the pool.
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the list database at `db_path`
    ///
    /// Missing parent directories are created, so `~/.listwise/list.db`
    /// works on first run.
    ///
    /// ```no_run
    /// use listwise_lib::db::Database;
    ///
    /// # async fn open() -> listwise_lib::Result<()> {
    /// let db = Database::new("/tmp/listwise/list.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        db.initialize_schema().await?;
        debug!(path = %db.db_path.display(), "database ready");

        Ok(db)
    }

    /// Empty in-memory database for tests. Every connection to `:memory:`
    /// is a separate database, so the pool holds exactly one.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            db_path: PathBuf::from(":memory:"),
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    async fn initialize_schema(&self) -> Result<()> {
        let schema = include_str!("schema.sql");

        // one statement per execute
        for statement in schema.split(';') {
            let trimmed = strip_sql_comments(statement);
            if !trimmed.is_empty() {
                sqlx::query(&trimmed).execute(self.pool.as_ref()).await?;
            }
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Where the list lives, `:memory:` for test databases
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn strip_sql_comments(statement: &str) -> String {
    statement
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let db = Database::new_test().await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn test_database_pool() {
        let db = Database::new_test().await.unwrap();
        let pool = db.pool();

        assert_eq!(pool.size(), 1);
    }

    #[tokio::test]
    async fn test_schema_initialization() {
        let db = Database::new_test().await.unwrap();

        for table in ["list_items", "history", "products"] {
            let result: std::result::Result<(i64,), sqlx::Error> =
                sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
                    .fetch_one(db.pool())
                    .await;
            assert!(result.is_ok(), "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("list.db");

        let db = Database::new(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());

        db.close().await;
    }

    #[test]
    fn test_strip_sql_comments() {
        let stripped = strip_sql_comments("-- header\nCREATE TABLE t (id INTEGER)\n");
        assert_eq!(stripped, "CREATE TABLE t (id INTEGER)");
        assert!(strip_sql_comments("\n-- only a comment\n").is_empty());
    }
}
