use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use log::warn;
use serde_json::Value;
use tokio::fs;

use super::translation::TranslationConfig;

/// Storage entry holding the serialized [`TranslationConfig`].
pub const CONFIG_KEY: &str = "translationConfig";

/// String keyed persistent storage.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage poisoned"))?;

        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage poisoned"))?;
        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// All entries live in one json object on disk, rewritten on every `set`.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> FileStorage {
        FileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).with_context(|| format!("parse {}", self.path.display()))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_all().await?;

        Ok(entries.remove(key))
    }

    /// A file that no longer parses is started over. The new content goes to
    /// a sibling temp file first and is renamed over the old one.
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_all().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!("discard unreadable storage, {err:#}");
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&entries)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replace {}", self.path.display()))?;

        Ok(())
    }
}

/// Loads and saves the provider configuration through a [`Storage`].
#[derive(Clone)]
pub struct ConfigStore {
    storage: Arc<dyn Storage>,
}

impl ConfigStore {
    pub fn new(storage: Arc<dyn Storage>) -> ConfigStore {
        ConfigStore { storage }
    }

    /// Persisted provider entries replace the defaults key by key. An entry
    /// is taken as a whole, its fields are never merged with the default.
    /// Anything unreadable, the storage itself included, gives the defaults.
    pub async fn load(&self) -> Result<TranslationConfig> {
        let defaults = TranslationConfig::default();
        let saved = match self.storage.get(CONFIG_KEY).await {
            Ok(Some(saved)) => saved,
            Ok(None) => return Ok(defaults),
            Err(err) => {
                warn!("ignore unreadable translation config storage, {err:#}");
                return Ok(defaults);
            }
        };

        match Self::merge(&defaults, &saved) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!("ignore saved translation config, {err:#}");
                Ok(defaults)
            }
        }
    }

    pub async fn save(&self, config: &TranslationConfig) -> Result<()> {
        let serialized = serde_json::to_string(config).with_context(|| "serialize config")?;
        self.storage
            .set(CONFIG_KEY, &serialized)
            .await
            .with_context(|| "save translation config")
    }

    fn merge(defaults: &TranslationConfig, saved: &str) -> Result<TranslationConfig> {
        let mut merged = serde_json::to_value(defaults)?;
        let saved: Value = serde_json::from_str(saved).with_context(|| "parse saved config")?;
        let (Value::Object(merged_entries), Value::Object(saved_entries)) = (&mut merged, saved)
        else {
            bail!("saved config is not an object");
        };
        for (key, value) in saved_entries {
            if merged_entries.contains_key(&key) {
                merged_entries.insert(key, value);
            }
        }

        serde_json::from_value(merged).with_context(|| "decode merged config")
    }
}
