use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use bon::bon;
use config::{ProviderConfig, ProviderName};
use http_client::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{Error, Handler, Request};

const BASE_URL: &str = "https://api.mymemory.translated.net/get";

/// Free translation proxy, no credentials needed.
pub struct MyMemory {
    client: Client,
    base_url: String,
}

#[bon]
impl MyMemory {
    #[builder]
    pub fn new(
        base_url: Option<String>,
        timeout: Duration,
        proxy: Option<String>,
        interval: Option<u64>,
    ) -> Result<MyMemory> {
        let client = Client::builder()
            .timeout(timeout)
            .maybe_proxy(proxy)
            .maybe_interval(interval)
            .build()?;
        let my_memory = MyMemory {
            client,
            base_url: base_url.unwrap_or_else(|| BASE_URL.to_string()),
        };

        Ok(my_memory)
    }

    /// Status 200 with an empty translation is no result, any other status
    /// is a rejection.
    fn extract(response: Response) -> Result<String, Error> {
        if response.status.as_i64() != Some(200) {
            let details = match response.details {
                Value::String(details) if !details.is_empty() => details,
                _ => format!("translation failed, status {}", response.status),
            };
            return Err(Error::Rejected(details));
        }

        response
            .data
            .and_then(|data| data.translated)
            .filter(|translated| !translated.is_empty())
            .ok_or(Error::NoResult)
    }
}

#[derive(Deserialize)]
struct Response {
    #[serde(rename = "responseData")]
    data: Option<ResponseData>,
    #[serde(rename = "responseStatus", default)]
    status: Value,
    #[serde(rename = "responseDetails", default)]
    details: Value,
}

#[derive(Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated: Option<String>,
}

#[async_trait]
impl Handler for MyMemory {
    fn provider(&self) -> ProviderName {
        ProviderName::MyMemoryProxy
    }

    async fn translate(&self, request: &Request, _config: &ProviderConfig) -> Result<String, Error> {
        let langpair = format!("{}|{}", request.source(), request.target());
        let response = self
            .client
            .wait()
            .await
            .get(&self.base_url)
            .query(&[("q", request.text().as_str()), ("langpair", langpair.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Rejected(format!("http {status}")));
        }

        Self::extract(response.json::<Response>().await?)
    }
}
