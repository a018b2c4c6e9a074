//! Service configuration loader for Chatlog.
//!
//! Reads `config.toml` from the data directory (`~/.chatlog/` in production)
//! or from an explicit path, and deserializes it into [`ServiceConfig`]. Falls
//! back to defaults when the file is missing or malformed, then applies
//! environment overrides. Problems are returned to the caller for logging.

use std::path::{Path, PathBuf};

use chatlog_types::config::{ServiceConfig, StoreBackend};

/// Overrides `store.database_url`.
pub const ENV_DATABASE_URL: &str = "CHATLOG_DATABASE_URL";
/// Overrides `store.backend` (`sqlite` or `memory`).
pub const ENV_STORE_BACKEND: &str = "CHATLOG_STORE_BACKEND";
/// Overrides the data directory.
pub const ENV_DATA_DIR: &str = "CHATLOG_DATA_DIR";

/// Resolve the data directory: `CHATLOG_DATA_DIR`, else `~/.chatlog`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatlog");
    }

    // Last resort: current directory
    PathBuf::from(".chatlog")
}

/// Configuration plus the problems found while loading it.
///
/// Loading runs before the tracing subscriber exists (the subscriber's own
/// settings come from this config), so problems are collected here and the
/// caller logs them once tracing is up.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: ServiceConfig,
    pub warnings: Vec<String>,
}

/// Load configuration from `path`, or from `{data_dir}/config.toml` when no
/// path is given.
///
/// - If the file does not exist, uses [`ServiceConfig::default()`].
/// - If the file exists but cannot be read or parsed, records a warning and
///   uses the default.
/// - Environment overrides are applied last in every case; an invalid value
///   is ignored with a warning.
pub async fn load_service_config(path: Option<&Path>, data_dir: &Path) -> LoadedConfig {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("config.toml"));

    let mut warnings = Vec::new();
    let mut config = read_config_file(&config_path, &mut warnings).await;
    apply_env_overrides(&mut config, &mut warnings, |name| std::env::var(name).ok());
    LoadedConfig { config, warnings }
}

async fn read_config_file(config_path: &Path, warnings: &mut Vec<String>) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ServiceConfig::default();
        }
        Err(err) => {
            warnings.push(format!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            ));
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            warnings.push(format!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            ));
            ServiceConfig::default()
        }
    }
}

fn apply_env_overrides(
    config: &mut ServiceConfig,
    warnings: &mut Vec<String>,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(url) = lookup(ENV_DATABASE_URL) {
        config.store.database_url = Some(url);
    }

    if let Some(raw) = lookup(ENV_STORE_BACKEND) {
        match raw.parse::<StoreBackend>() {
            Ok(backend) => config.store.backend = backend,
            Err(err) => warnings.push(format!("Ignoring {ENV_STORE_BACKEND}: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[tokio::test]
    async fn read_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let mut warnings = Vec::new();
        let config = read_config_file(&tmp.path().join("config.toml"), &mut warnings).await;
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.server.port, 8888);
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn read_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[store]
backend = "memory"

[server]
host = "0.0.0.0"
port = 7000

[pull]
default_limit = 25
"#,
        )
        .await
        .unwrap();

        let mut warnings = Vec::new();
        let config = read_config_file(&config_path, &mut warnings).await;
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.pull.default_limit, 25);
        assert_eq!(config.pull.max_limit, 1000);
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn read_config_invalid_toml_returns_default_with_warning() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let mut warnings = Vec::new();
        let config = read_config_file(&config_path, &mut warnings).await;
        assert_eq!(config.server.port, 8888);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse"));
    }

    #[tokio::test]
    async fn read_config_unreadable_path_returns_default_with_warning() {
        let tmp = TempDir::new().unwrap();

        // A directory exists but cannot be read as a file.
        let mut warnings = Vec::new();
        let config = read_config_file(tmp.path(), &mut warnings).await;
        assert_eq!(config.server.port, 8888);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to read"));
    }

    #[tokio::test]
    async fn load_uses_explicit_path_over_data_dir() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        tokio::fs::write(&explicit, "[server]\nport = 9999\n")
            .await
            .unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[server]\nport = 1111\n")
            .await
            .unwrap();

        let loaded = load_service_config(Some(&explicit), tmp.path()).await;
        assert_eq!(loaded.config.server.port, 9999);
    }

    #[tokio::test]
    async fn load_reports_broken_file_instead_of_dropping_it() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.toml");
        tokio::fs::write(&bad, "this is { not toml").await.unwrap();

        let loaded = load_service_config(Some(&bad), tmp.path()).await;
        assert_eq!(loaded.config.store.backend, StoreBackend::Sqlite);
        assert!(
            loaded
                .warnings
                .iter()
                .any(|w| w.starts_with("Failed to parse") && w.contains("bad.toml"))
        );
    }

    #[test]
    fn env_overrides_backend_and_url() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_STORE_BACKEND, "memory"),
            (ENV_DATABASE_URL, "sqlite://elsewhere.db"),
        ]);
        let mut config = ServiceConfig::default();
        let mut warnings = Vec::new();
        apply_env_overrides(&mut config, &mut warnings, |name| {
            env.get(name).map(|v| v.to_string())
        });

        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(
            config.store.database_url.as_deref(),
            Some("sqlite://elsewhere.db")
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn env_invalid_backend_is_ignored_with_warning() {
        let mut config = ServiceConfig::default();
        let mut warnings = Vec::new();
        apply_env_overrides(&mut config, &mut warnings, |name| {
            (name == ENV_STORE_BACKEND).then(|| "cassandra".to_string())
        });
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(ENV_STORE_BACKEND));
        assert!(warnings[0].contains("cassandra"));

        let mut untouched = ServiceConfig::default();
        let mut none = Vec::new();
        apply_env_overrides(&mut untouched, &mut none, no_env);
        assert!(untouched.store.database_url.is_none());
        assert!(none.is_empty());
    }
}
