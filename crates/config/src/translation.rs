use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIBRE_ENDPOINTS: [&str; 3] = [
    "https://translate.argosopentech.com/translate",
    "https://libretranslate.com/translate",
    "https://libretranslate.de/translate",
];

/// Translation backends, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderName {
    #[serde(rename = "myMemory")]
    MyMemoryProxy,
    #[serde(rename = "libre")]
    LibreInstanceSet,
    #[serde(rename = "baidu")]
    BaiduSigned,
}

impl ProviderName {
    pub const PRIORITY: [ProviderName; 3] = [
        ProviderName::MyMemoryProxy,
        ProviderName::LibreInstanceSet,
        ProviderName::BaiduSigned,
    ];
}

impl Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderName::MyMemoryProxy => "mymemory",
            ProviderName::LibreInstanceSet => "libre",
            ProviderName::BaiduSigned => "baidu",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mymemory" | "google" => Ok(ProviderName::MyMemoryProxy),
            "libre" | "libretranslate" => Ok(ProviderName::LibreInstanceSet),
            "baidu" => Ok(ProviderName::BaiduSigned),
            other => Err(format!("unknown provider {other}, expect mymemory|libre|baidu")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "appId")]
    pub app_id: String,
    #[serde(rename = "secretKey")]
    pub secret_key: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.app_id.is_empty() && !self.secret_key.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    /// Candidate instances, tried in order. Only multi-instance backends use it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
}

impl ProviderConfig {
    pub fn enabled() -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            ..Default::default()
        }
    }

    /// Credentials with both parts filled in.
    pub fn complete_credentials(&self) -> Option<&Credentials> {
        self.credentials
            .as_ref()
            .filter(|credentials| credentials.is_complete())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(rename = "myMemory")]
    pub my_memory: ProviderConfig,
    pub libre: ProviderConfig,
    pub baidu: ProviderConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        TranslationConfig {
            my_memory: ProviderConfig::enabled(),
            libre: ProviderConfig {
                enabled: false,
                credentials: None,
                endpoints: DEFAULT_LIBRE_ENDPOINTS
                    .iter()
                    .map(|endpoint| endpoint.to_string())
                    .collect(),
            },
            baidu: ProviderConfig::default(),
        }
    }
}

impl TranslationConfig {
    pub fn get(&self, name: ProviderName) -> &ProviderConfig {
        match name {
            ProviderName::MyMemoryProxy => &self.my_memory,
            ProviderName::LibreInstanceSet => &self.libre,
            ProviderName::BaiduSigned => &self.baidu,
        }
    }

    pub fn get_mut(&mut self, name: ProviderName) -> &mut ProviderConfig {
        match name {
            ProviderName::MyMemoryProxy => &mut self.my_memory,
            ProviderName::LibreInstanceSet => &mut self.libre,
            ProviderName::BaiduSigned => &mut self.baidu,
        }
    }

    /// Providers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (ProviderName, &ProviderConfig)> {
        ProviderName::PRIORITY
            .into_iter()
            .map(|name| (name, self.get(name)))
    }
}
