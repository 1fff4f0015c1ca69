use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use async_trait::async_trait;
use bon::bon;
use config::{ProviderConfig, ProviderName};
use http_client::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{Error, Handler, Request};

const BASE_URL: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// Baidu general translation api, every request signed with the app secret.
pub struct Baidu {
    client: Client,
    base_url: String,
}

#[bon]
impl Baidu {
    #[builder]
    pub fn new(
        base_url: Option<String>,
        timeout: Duration,
        proxy: Option<String>,
        interval: Option<u64>,
    ) -> Result<Baidu> {
        let client = Client::builder()
            .timeout(timeout)
            .maybe_proxy(proxy)
            .maybe_interval(interval)
            .build()?;
        let baidu = Baidu {
            client,
            base_url: base_url.unwrap_or_else(|| BASE_URL.to_string()),
        };

        Ok(baidu)
    }

    fn salt() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            .to_string()
    }

    fn extract(response: Response) -> Result<String, Error> {
        if let Some(code) = response.error_code {
            let msg = response.error_msg.unwrap_or_default();
            return Err(Error::Rejected(format!("百度翻译错误: {msg} ({code})")));
        }

        let Some(result) = response.trans_result else {
            return Err(Error::Rejected("trans_result missing".to_string()));
        };
        match result.into_iter().next() {
            Some(first) if !first.dst.is_empty() => Ok(first.dst),
            _ => Err(Error::NoResult),
        }
    }
}

#[derive(Deserialize)]
struct Response {
    error_code: Option<Value>,
    error_msg: Option<String>,
    trans_result: Option<Vec<TransResult>>,
}

#[derive(Deserialize)]
struct TransResult {
    dst: String,
}

#[async_trait]
impl Handler for Baidu {
    fn provider(&self) -> ProviderName {
        ProviderName::BaiduSigned
    }

    fn check(&self, config: &ProviderConfig) -> Result<(), Error> {
        match config.complete_credentials() {
            Some(_) => Ok(()),
            None => Err(Error::InvalidCredentials),
        }
    }

    async fn translate(&self, request: &Request, config: &ProviderConfig) -> Result<String, Error> {
        let credentials = config
            .complete_credentials()
            .ok_or(Error::InvalidCredentials)?;
        let salt = Self::salt();
        let sign = signature::sign(
            &credentials.app_id,
            request.text(),
            &salt,
            &credentials.secret_key,
        );

        let response = self
            .client
            .wait()
            .await
            .get(&self.base_url)
            .query(&[
                ("q", request.text().as_str()),
                ("from", request.source().code()),
                ("to", request.target().code()),
                ("appid", credentials.app_id.as_str()),
                ("salt", salt.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Rejected(format!("http {status}")));
        }

        Self::extract(response.json::<Response>().await?)
    }
}
