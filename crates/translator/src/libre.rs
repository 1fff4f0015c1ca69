use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use bon::bon;
use config::{DEFAULT_LIBRE_ENDPOINTS, ProviderConfig, ProviderName};
use http_client::Client;
use log::info;
use serde::{Deserialize, Serialize};

use super::{Error, Handler, Request};

/// LibreTranslate, spread over several public instances tried in order.
pub struct Libre {
    client: Client,
}

#[bon]
impl Libre {
    #[builder]
    pub fn new(timeout: Duration, proxy: Option<String>, interval: Option<u64>) -> Result<Libre> {
        let client = Client::builder()
            .timeout(timeout)
            .maybe_proxy(proxy)
            .maybe_interval(interval)
            .build()?;

        Ok(Libre { client })
    }

    /// An instance echoing the input back has not translated anything.
    fn accept(request: &Request, response: Response) -> Result<String, Error> {
        match response.translated {
            Some(translated) if !translated.is_empty() && translated != *request.text() => {
                Ok(translated)
            }
            _ => Err(Error::NoResult),
        }
    }

    async fn try_endpoint(&self, endpoint: &str, request: &Request) -> Result<String, Error> {
        let body = Body {
            q: request.text(),
            source: request.source().code(),
            target: request.target().code(),
            format: "text",
        };
        let response = self
            .client
            .wait()
            .await
            .post(endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Rejected(format!("http {status}")));
        }

        Self::accept(request, response.json::<Response>().await?)
    }
}

#[derive(Serialize)]
struct Body<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(rename = "translatedText")]
    translated: Option<String>,
}

#[async_trait]
impl Handler for Libre {
    fn provider(&self) -> ProviderName {
        ProviderName::LibreInstanceSet
    }

    async fn translate(&self, request: &Request, config: &ProviderConfig) -> Result<String, Error> {
        let endpoints = if config.endpoints.is_empty() {
            DEFAULT_LIBRE_ENDPOINTS.to_vec()
        } else {
            config.endpoints.iter().map(String::as_str).collect()
        };

        for endpoint in endpoints {
            match self.try_endpoint(endpoint, request).await {
                Ok(translated) => return Ok(translated),
                Err(err) => info!("libre instance {endpoint} failed, {err}"),
            }
        }

        Err(Error::NoResult)
    }
}
