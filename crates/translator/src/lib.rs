mod baidu;
mod dictionary;
mod error;
mod libre;
mod my_memory;
mod request;
#[cfg(test)]
mod testing;

use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use config::{Network, ProviderConfig, ProviderName, TranslationConfig};
use getset::{CopyGetters, Getters};
use log::{info, warn};

pub use baidu::Baidu;
pub use dictionary::Dictionary;
pub use error::Error;
pub use libre::Libre;
pub use my_memory::MyMemory;
pub use request::{Lang, Request};

/// One network translation backend.
#[async_trait]
pub trait Handler: Send + Sync {
    fn provider(&self) -> ProviderName;

    /// Checked before every attempt, a failure skips the backend.
    fn check(&self, _config: &ProviderConfig) -> Result<(), Error> {
        Ok(())
    }

    async fn translate(&self, request: &Request, config: &ProviderConfig) -> Result<String, Error>;
}

/// Offline answer used once every backend has failed. Never fails itself.
pub trait Fallback: Send + Sync {
    fn translate(&self, request: &Request) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Backend(ProviderName),
    Dictionary,
}

impl Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Backend(name) => write!(f, "{name}"),
            Provenance::Dictionary => write!(f, "dictionary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Translation {
    #[getset(get = "pub")]
    text: String,
    #[getset(get_copy = "pub")]
    provenance: Provenance,
}

impl Translation {
    pub fn new(text: impl Into<String>, provenance: Provenance) -> Translation {
        Translation {
            text: text.into(),
            provenance,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Ordered backend chain with a dictionary fallback.
pub struct Translator {
    handlers: Vec<Arc<dyn Handler>>,
    fallback: Arc<dyn Fallback>,
}

impl Translator {
    pub fn new(network: &Network) -> Result<Translator> {
        let timeout = Duration::from_secs(network.timeout);
        let proxy = &network.proxy;
        let interval = network.interval;
        let handlers: Vec<Arc<dyn Handler>> = vec![
            Arc::new(
                MyMemory::builder()
                    .timeout(timeout)
                    .maybe_proxy(proxy.clone())
                    .maybe_interval(interval)
                    .build()?,
            ),
            Arc::new(
                Libre::builder()
                    .timeout(timeout)
                    .maybe_proxy(proxy.clone())
                    .maybe_interval(interval)
                    .build()?,
            ),
            Arc::new(
                Baidu::builder()
                    .timeout(timeout)
                    .maybe_proxy(proxy.clone())
                    .maybe_interval(interval)
                    .build()?,
            ),
        ];

        Ok(Translator::with_handlers(handlers, Arc::new(Dictionary)))
    }

    /// Handlers are kept in provider priority order whatever order they come in.
    pub fn with_handlers(
        mut handlers: Vec<Arc<dyn Handler>>,
        fallback: Arc<dyn Fallback>,
    ) -> Translator {
        handlers.sort_by_key(|handler| handler.provider());

        Translator { handlers, fallback }
    }

    /// Tries every enabled backend once, in priority order, and stops at the
    /// first answer. Failures are logged and never escape; when nothing
    /// answers the fallback result is returned.
    pub async fn translate(&self, config: &TranslationConfig, request: &Request) -> Translation {
        for handler in self.handlers.iter() {
            let provider = handler.provider();
            let settings = config.get(provider);
            if !settings.enabled {
                continue;
            }
            if let Err(err) = handler.check(settings) {
                warn!("skip {provider}, {err}");
                continue;
            }

            match handler.translate(request, settings).await {
                Ok(text) => {
                    info!("{provider} translated {} -> {text}", request.text());
                    return Translation::new(text, Provenance::Backend(provider));
                }
                Err(err) => warn!("{provider} failed, {err}"),
            }
        }

        let text = self.fallback.translate(request);
        info!("no backend answered, dictionary gives {text}");

        Translation::new(text, Provenance::Dictionary)
    }

    pub async fn resolve(&self, config: &TranslationConfig, request: &Request) -> String {
        self.translate(config, request).await.into_text()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{CountingFallback, Outcome, StubHandler};
    use config::Credentials;
    use pretty_assertions::assert_eq;

    fn all_enabled() -> TranslationConfig {
        let mut config = TranslationConfig::default();
        config.libre.enabled = true;
        config.baidu.enabled = true;
        config.baidu.credentials = Some(Credentials {
            app_id: "app".to_string(),
            secret_key: "secret".to_string(),
        });

        config
    }

    fn chain(
        outcomes: [Outcome; 3],
    ) -> (Translator, [Arc<StubHandler>; 3], Arc<CountingFallback>) {
        let [first, second, third] = outcomes;
        let handlers = [
            Arc::new(StubHandler::new(ProviderName::MyMemoryProxy, first)),
            Arc::new(StubHandler::new(ProviderName::LibreInstanceSet, second)),
            Arc::new(StubHandler::new(ProviderName::BaiduSigned, third)),
        ];
        let fallback = Arc::new(CountingFallback::default());
        let translator = Translator::with_handlers(
            handlers
                .iter()
                .map(|handler| handler.clone() as Arc<dyn Handler>)
                .collect(),
            fallback.clone(),
        );

        (translator, handlers, fallback)
    }

    fn calls(handlers: &[Arc<StubHandler>; 3]) -> [usize; 3] {
        handlers
            .each_ref()
            .map(|handler| handler.calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_first_success_stops_chain() {
        let (translator, handlers, fallback) = chain([
            Outcome::Answer("user name"),
            Outcome::Answer("second"),
            Outcome::Answer("third"),
        ]);
        let request = Request::new("用户名", Lang::Zh, Lang::En);
        let translation = translator.translate(&all_enabled(), &request).await;

        assert_eq!(translation.text(), "user name");
        assert_eq!(
            translation.provenance(),
            Provenance::Backend(ProviderName::MyMemoryProxy)
        );
        assert_eq!(calls(&handlers), [1, 0, 0]);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failover_keeps_request() {
        let (translator, handlers, fallback) = chain([
            Outcome::Unreachable,
            Outcome::Answer("user name"),
            Outcome::Answer("third"),
        ]);
        let request = Request::new("用户名", Lang::Zh, Lang::En);
        let translation = translator.translate(&all_enabled(), &request).await;

        assert_eq!(translation.text(), "user name");
        assert_eq!(calls(&handlers), [1, 1, 0]);
        assert_eq!(handlers[1].seen(), vec![request.clone()]);
        assert_eq!(handlers[0].seen(), handlers[1].seen());
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_fail_uses_fallback_once() {
        let (translator, handlers, fallback) = chain([
            Outcome::Unreachable,
            Outcome::NoResult,
            Outcome::Rejected("52003 UNAUTHORIZED USER"),
        ]);
        let request = Request::new("用户名", Lang::Zh, Lang::En);
        let translation = translator.translate(&all_enabled(), &request).await;

        assert_eq!(translation.text(), "fallback:用户名");
        assert_eq!(translation.provenance(), Provenance::Dictionary);
        assert_eq!(calls(&handlers), [1, 1, 1]);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_backends_skipped() {
        let (translator, handlers, _) = chain([
            Outcome::Answer("first"),
            Outcome::Answer("second"),
            Outcome::Answer("third"),
        ]);
        let mut config = all_enabled();
        config.my_memory.enabled = false;
        config.libre.enabled = false;
        let request = Request::new("user", Lang::En, Lang::Zh);

        assert_eq!(translator.resolve(&config, &request).await, "third");
        assert_eq!(calls(&handlers), [0, 0, 1]);
    }

    #[tokio::test]
    async fn test_failed_check_skips_backend() {
        let (translator, handlers, fallback) = chain([
            Outcome::Unreachable,
            Outcome::Unreachable,
            Outcome::Answer("third"),
        ]);
        handlers[2].fail_check();
        let request = Request::new("user", Lang::En, Lang::Zh);
        let translation = translator.translate(&all_enabled(), &request).await;

        assert_eq!(translation.provenance(), Provenance::Dictionary);
        assert_eq!(calls(&handlers), [1, 1, 0]);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_nothing_enabled() {
        let (translator, handlers, fallback) = chain([
            Outcome::Answer("first"),
            Outcome::Answer("second"),
            Outcome::Answer("third"),
        ]);
        let mut config = TranslationConfig::default();
        config.my_memory.enabled = false;
        let request = Request::new("user", Lang::En, Lang::Zh);
        let translation = translator.translate(&config, &request).await;

        assert_eq!(translation.text(), "fallback:user");
        assert_eq!(calls(&handlers), [0, 0, 0]);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_priority_independent_of_insertion() {
        let third = Arc::new(StubHandler::new(
            ProviderName::BaiduSigned,
            Outcome::Answer("third"),
        ));
        let first = Arc::new(StubHandler::new(
            ProviderName::MyMemoryProxy,
            Outcome::Answer("first"),
        ));
        let translator = Translator::with_handlers(
            vec![third.clone() as Arc<dyn Handler>, first.clone()],
            Arc::new(CountingFallback::default()),
        );
        let request = Request::new("user", Lang::En, Lang::Zh);

        assert_eq!(translator.resolve(&all_enabled(), &request).await, "first");
        assert_eq!(third.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dictionary_end_to_end() -> Result<()> {
        let network = Network {
            timeout: 1,
            proxy: None,
            interval: None,
        };
        let translator = Translator::new(&network)?;
        let mut config = TranslationConfig::default();
        config.my_memory.enabled = false;
        let request = Request::new("用户名", Lang::Zh, Lang::En);
        let translation = translator.translate(&config, &request).await;

        assert_eq!(translation.text(), "user名");
        assert_eq!(translation.provenance(), Provenance::Dictionary);

        Ok(())
    }

    #[tokio::test]
    async fn test_baidu_without_credentials_skipped() -> Result<()> {
        let network = Network {
            timeout: 1,
            proxy: None,
            interval: None,
        };
        let translator = Translator::new(&network)?;
        let mut config = TranslationConfig::default();
        config.my_memory.enabled = false;
        config.baidu.enabled = true;
        let request = Request::new("用户", Lang::Zh, Lang::En);
        let translation = translator.translate(&config, &request).await;

        assert_eq!(translation.text(), "user");
        assert_eq!(translation.provenance(), Provenance::Dictionary);

        Ok(())
    }
}
