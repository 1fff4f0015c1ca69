use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::Context;
use config::{ConfigStore, Credentials, ProviderName, TranslationConfig};
use log::info;
use naming::SnakeOptions;
use translator::{Lang, Request, Translation, Translator};

use super::error::Error;
use super::variant::{Variant, VariantKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// zh -> en
    ToEnglish,
    /// en -> zh
    ToChinese,
}

impl Direction {
    pub fn langs(&self) -> (Lang, Lang) {
        match self {
            Direction::ToEnglish => (Lang::Zh, Lang::En),
            Direction::ToChinese => (Lang::En, Lang::Zh),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.langs();
        write!(f, "{from} -> {to}")
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parsed from the target language.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Lang>()? {
            Lang::En => Ok(Direction::ToEnglish),
            Lang::Zh => Ok(Direction::ToChinese),
        }
    }
}

/// Entry point for field name translation.
///
/// Owns the provider configuration and writes it back through the
/// [`ConfigStore`] after every change.
pub struct FieldTranslator {
    config: TranslationConfig,
    store: ConfigStore,
    translator: Translator,
    snake: SnakeOptions,
}

impl FieldTranslator {
    pub async fn open(
        store: ConfigStore,
        translator: Translator,
        snake: SnakeOptions,
    ) -> anyhow::Result<FieldTranslator> {
        let config = store.load().await.with_context(|| "load translation config")?;
        let field = FieldTranslator {
            config,
            store,
            translator,
            snake,
        };

        Ok(field)
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    fn non_empty(text: &str) -> Result<&str, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(text)
    }

    /// Like [`FieldTranslator::translate_to_target`], also telling which
    /// backend answered.
    pub async fn translate_with_provenance(
        &self,
        text: &str,
        direction: Direction,
    ) -> Result<Translation, Error> {
        let text = Self::non_empty(text)?;
        let (from, to) = direction.langs();
        let request = Request::new(text, from, to);

        Ok(self.translator.translate(&self.config, &request).await)
    }

    pub async fn translate_to_target(&self, text: &str, direction: Direction) -> Result<String, Error> {
        let translation = self.translate_with_provenance(text, direction).await?;

        Ok(translation.into_text())
    }

    /// Chinese input is translated to English and the naming variants are
    /// built from the translation. Anything else is translated to Chinese and
    /// the variants are built from the input itself.
    pub async fn suggest_naming_variants(&self, text: &str) -> Result<Vec<Variant>, Error> {
        let text = Self::non_empty(text)?;
        let chinese = naming::contains_cjk(text);
        let direction = if chinese {
            Direction::ToEnglish
        } else {
            Direction::ToChinese
        };
        let translated = self.translate_to_target(text, direction).await?;
        let basis = if chinese { translated.as_str() } else { text };

        let variants = vec![
            Variant::new(VariantKind::CamelCase, naming::to_camel_case(basis)),
            Variant::new(
                VariantKind::SnakeCase,
                naming::to_snake_case(basis, &self.snake),
            ),
            Variant::new(VariantKind::Lowercase, naming::to_lower_compact(basis)),
            Variant::new(VariantKind::Uppercase, naming::to_upper_compact(basis)),
        ];

        Ok(std::iter::once(Variant::new(VariantKind::Translation, translated))
            .chain(variants)
            .collect())
    }

    /// Saves `config` and only then takes it as the current configuration.
    async fn commit(&mut self, config: TranslationConfig) -> Result<(), Error> {
        self.store.save(&config).await?;
        self.config = config;

        Ok(())
    }

    pub async fn toggle_provider(&mut self, name: ProviderName, enabled: bool) -> Result<(), Error> {
        let mut config = self.config.clone();
        config.get_mut(name).enabled = enabled;
        self.commit(config).await?;
        info!("{name} enabled: {enabled}");

        Ok(())
    }

    pub async fn save_baidu_credentials(
        &mut self,
        app_id: &str,
        secret_key: &str,
    ) -> Result<(), Error> {
        let credentials = Credentials {
            app_id: app_id.trim().to_string(),
            secret_key: secret_key.trim().to_string(),
        };
        if !credentials.is_complete() {
            return Err(Error::IncompleteCredentials);
        }

        let mut config = self.config.clone();
        config.baidu.credentials = Some(credentials);
        self.commit(config).await?;
        info!("baidu credentials saved");

        Ok(())
    }
}
