/// Runtime configuration
///
/// Everything comes from environment variables with sensible defaults,
/// so the binary works with zero setup.

use crate::core::DEFAULT_SEARCH_LIMIT;
use crate::error::{ListError, Result};
use crate::intelligence::suggestion_engine::DEFAULT_HISTORY_TOP_N;
use serde::Serialize;
use std::path::PathBuf;

pub const ENV_DB: &str = "LISTWISE_DB";
pub const ENV_SEARCH_LIMIT: &str = "LISTWISE_SEARCH_LIMIT";
pub const ENV_HISTORY_TOP_N: &str = "LISTWISE_HISTORY_TOP_N";
pub const ENV_LOG: &str = "LISTWISE_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub db_path: PathBuf,
    pub search_limit: usize,
    pub history_top_n: usize,
    pub log_filter: String,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (tests use a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        Ok(Self {
            db_path,
            search_limit: parse_count(&lookup, ENV_SEARCH_LIMIT, DEFAULT_SEARCH_LIMIT)?,
            history_top_n: parse_count(&lookup, ENV_HISTORY_TOP_N, DEFAULT_HISTORY_TOP_N)?,
            log_filter: lookup(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ListError::Config(format!("no home directory; set {}", ENV_DB)))?;

    Ok(home.join(".listwise").join("list.db"))
}

fn parse_count<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ListError::Config(format!("{} must be a whole number, got '{}'", key, raw))),
    }
}
