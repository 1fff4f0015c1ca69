mod network;
mod store;
mod translation;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::info;
use naming::LowercaseMode;
use serde::Deserialize;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use validator::Validate;

pub use network::Network;
pub use store::{CONFIG_KEY, ConfigStore, FileStorage, MemoryStorage, Storage};
pub use translation::{
    Credentials, DEFAULT_LIBRE_ENDPOINTS, ProviderConfig, ProviderName, TranslationConfig,
};

const DEFAULT_CONFIG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/config.default.toml"
));

#[derive(Debug, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub network: Network,
    #[validate(nested)]
    pub storage: Store,
    #[serde(default)]
    pub naming: Naming,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Store {
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct Naming {
    #[serde(default)]
    pub lowercase: LowercaseMode,
}

impl Config {
    /// Reads the settings file, writing the default one first when missing.
    pub async fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            Config::generate_default_config(path)
                .await
                .with_context(|| format!("generate default config at {}", path.display()))?;
            info!("config file not found, generated {}", path.display());
        }
        let config = fs::read_to_string(path)
            .await
            .with_context(|| format!("read config from {}", path.display()))?;

        Config::parse(&config)
    }

    pub fn parse(config: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(config).map_err(|err| anyhow!("config ->\n\n{err}"))?;
        config
            .validate()
            .map_err(|err| anyhow!("config -> {err}"))?;

        Ok(config)
    }

    async fn generate_default_config(path: &Path) -> Result<()> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await?
            .write_all(DEFAULT_CONFIG.as_bytes())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() -> Result<()> {
        let config = Config::parse(DEFAULT_CONFIG)?;
        assert_eq!(config.network.timeout, 10);
        assert_eq!(config.network.proxy, None);
        assert_eq!(config.network.interval, None);
        assert_eq!(config.storage.path, PathBuf::from("fieldname.json"));
        assert_eq!(config.naming.lowercase, LowercaseMode::Keep);

        Ok(())
    }

    #[test]
    fn test_naming_is_optional() -> Result<()> {
        let config = Config::parse(
            r#"
            [network]
            timeout = 3
            proxy = "http://127.0.0.1:7890"

            [storage]
            path = "/tmp/fieldname.json"
            "#,
        )?;
        assert_eq!(config.network.proxy.as_deref(), Some("http://127.0.0.1:7890"));
        assert_eq!(config.naming.lowercase, LowercaseMode::Keep);

        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        let zero_timeout = r#"
            [network]
            timeout = 0

            [storage]
            path = "fieldname.json"
            "#;
        assert!(Config::parse(zero_timeout).is_err());

        let bad_proxy = r#"
            [network]
            timeout = 5
            proxy = "not a url"

            [storage]
            path = "fieldname.json"
            "#;
        assert!(Config::parse(bad_proxy).is_err());

        let bad_mode = r#"
            [network]
            timeout = 5

            [storage]
            path = "fieldname.json"

            [naming]
            lowercase = "guess"
            "#;
        assert!(Config::parse(bad_mode).is_err());
    }

    #[tokio::test]
    async fn test_load_generates_default() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("fieldname.toml");

        let config = Config::load(&path).await?;
        assert!(path.exists());
        assert_eq!(config.network.timeout, 10);
        assert_eq!(fs::read_to_string(&path).await?, DEFAULT_CONFIG);

        Ok(())
    }
}
