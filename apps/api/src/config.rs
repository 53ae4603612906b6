use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where the snapshot mirror lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotBackend {
    File,
    Redis,
}

impl FromStr for SnapshotBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(SnapshotBackend::File),
            "redis" => Ok(SnapshotBackend::Redis),
            other => bail!("SNAPSHOT_BACKEND must be 'file' or 'redis', got '{other}'"),
        }
    }
}

impl SnapshotBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotBackend::File => "file",
            SnapshotBackend::Redis => "redis",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Everything has a default except `REDIS_URL`, which the redis backend needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub snapshot_backend: SnapshotBackend,
    pub snapshot_path: PathBuf,
    pub snapshot_key: String,
    pub redis_url: Option<String>,
    /// Absent key disables enhancement; calls then return their fallbacks.
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let snapshot_backend = optional_env("SNAPSHOT_BACKEND")
            .map(|v| v.parse::<SnapshotBackend>())
            .transpose()?
            .unwrap_or(SnapshotBackend::File);
        let redis_url = optional_env("REDIS_URL");
        if snapshot_backend == SnapshotBackend::Redis && redis_url.is_none() {
            bail!("REDIS_URL is required when SNAPSHOT_BACKEND=redis");
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            snapshot_backend,
            snapshot_path: optional_env("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/resume-data.json")),
            snapshot_key: optional_env("SNAPSHOT_KEY").unwrap_or_else(|| "resume-data".to_string()),
            redis_url,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("file".parse::<SnapshotBackend>().unwrap(), SnapshotBackend::File);
        assert_eq!(" Redis ".parse::<SnapshotBackend>().unwrap(), SnapshotBackend::Redis);
        assert!("sqlite".parse::<SnapshotBackend>().is_err());
    }
}
