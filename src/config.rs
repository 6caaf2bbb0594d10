use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct VaultConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Which blob layout the local store uses.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One markdown file per note.
    #[default]
    Files,
    /// All notes in one JSON key-value document.
    Kv,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "files" => Ok(Self::Files),
            "kv" => Ok(Self::Kv),
            _ => Err(format!("unknown storage backend: {s}")),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub vault_dir: String,
    pub backend: StorageBackend,
    /// Write starter notes the first time the vault is created.
    pub seed_on_init: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    pub enabled: bool,
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct IdentityConfig {
    /// Identity signed in at startup. Only used when the remote store is enabled.
    pub user: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let vault_dir = default_aether_dir()
            .join("vault")
            .to_string_lossy()
            .into_owned();
        Self {
            vault_dir,
            backend: StorageBackend::Files,
            seed_on_init: true,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let db_path = default_aether_dir()
            .join("remote.db")
            .to_string_lossy()
            .into_owned();
        Self {
            enabled: false,
            db_path,
        }
    }
}

/// Returns `~/.aether/`, or `./.aether/` when no home directory is known.
pub fn default_aether_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aether")
}

/// Returns the default config file path: `~/.aether/config.toml`
pub fn default_config_path() -> PathBuf {
    default_aether_dir().join("config.toml")
}

impl VaultConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            VaultConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides (AETHER_VAULT_DIR, AETHER_STORAGE_BACKEND,
    /// AETHER_REMOTE_DB, AETHER_IDENTITY, AETHER_LOG_LEVEL).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("AETHER_VAULT_DIR") {
            self.storage.vault_dir = val;
        }
        if let Ok(val) = std::env::var("AETHER_STORAGE_BACKEND") {
            self.storage.backend = val.parse().map_err(anyhow::Error::msg)?;
        }
        if let Ok(val) = std::env::var("AETHER_REMOTE_DB") {
            self.remote.db_path = val;
        }
        if let Ok(val) = std::env::var("AETHER_IDENTITY") {
            self.identity.user = Some(val);
        }
        if let Ok(val) = std::env::var("AETHER_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }

    /// Resolve the vault directory, expanding `~` if needed.
    pub fn resolved_vault_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.vault_dir)
    }

    pub fn resolved_remote_db_path(&self) -> PathBuf {
        expand_tilde(&self.remote.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = VaultConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.backend, StorageBackend::Files);
        assert!(config.storage.seed_on_init);
        assert!(!config.remote.enabled);
        assert!(config.identity.user.is_none());
        assert!(config.storage.vault_dir.ends_with("vault"));
        assert!(config.remote.db_path.ends_with("remote.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[logging]
level = "debug"

[storage]
vault_dir = "/tmp/vault"
backend = "kv"

[remote]
enabled = true

[identity]
user = "uid-42"
"#;
        let config: VaultConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.vault_dir, "/tmp/vault");
        assert_eq!(config.storage.backend, StorageBackend::Kv);
        assert!(config.remote.enabled);
        assert_eq!(config.identity.user.as_deref(), Some("uid-42"));
        // defaults still apply for unset fields
        assert!(config.storage.seed_on_init);
        assert!(config.remote.db_path.ends_with("remote.db"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = toml::from_str::<VaultConfig>("[storage]\nbackend = \"cloud\"\n");
        assert!(err.is_err());
        assert!("cloud".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = VaultConfig::default();
        std::env::set_var("AETHER_VAULT_DIR", "/tmp/override-vault");
        std::env::set_var("AETHER_STORAGE_BACKEND", "kv");
        std::env::set_var("AETHER_IDENTITY", "env-user");
        std::env::set_var("AETHER_LOG_LEVEL", "trace");

        config.apply_env_overrides().unwrap();

        assert_eq!(config.storage.vault_dir, "/tmp/override-vault");
        assert_eq!(config.storage.backend, StorageBackend::Kv);
        assert_eq!(config.identity.user.as_deref(), Some("env-user"));
        assert_eq!(config.logging.level, "trace");

        // Clean up
        std::env::remove_var("AETHER_VAULT_DIR");
        std::env::remove_var("AETHER_STORAGE_BACKEND");
        std::env::remove_var("AETHER_IDENTITY");
        std::env::remove_var("AETHER_LOG_LEVEL");
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/notes"), home.join("notes"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
