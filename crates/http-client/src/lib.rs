use std::time::Duration;

use anyhow::{Context, Result};
use bon::bon;
use ratelimit::Ratelimiter;
use reqwest::Client as HttpClient;
use reqwest::Proxy;
use tokio::time;

/// A reqwest client carrying the shared user agent, timeout and proxy, with
/// optional request pacing. Pacing is off unless an interval is configured.
pub struct Client {
    client: HttpClient,
    limiter: Option<Ratelimiter>,
}

#[bon]
impl Client {
    #[builder]
    pub fn new(timeout: Duration, proxy: Option<String>, interval: Option<u64>) -> Result<Client> {
        let limiter = match interval {
            Some(secs) if secs > 0 => Some(
                Ratelimiter::builder(1, Duration::from_secs(secs))
                    .initial_available(1)
                    .build()
                    .with_context(|| "build rate limiter")?,
            ),
            _ => None,
        };
        let mut client_builder = HttpClient::builder()
            .timeout(timeout)
            .user_agent(app::USER_AGENT);
        if let Some(url) = proxy {
            let proxy = Proxy::all(&url).with_context(|| format!("set proxy to {url}"))?;
            client_builder = client_builder.proxy(proxy);
        }
        let client = client_builder
            .build()
            .with_context(|| "build reqwest client")?;
        let client = Client { client, limiter };

        Ok(client)
    }

    pub async fn wait(&self) -> &HttpClient {
        self.wait_limiter().await;

        &self.client
    }

    async fn wait_limiter(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        loop {
            match limiter.try_wait() {
                Ok(_) => break,
                Err(sleep) => time::sleep(sleep).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wait_without_interval() -> Result<()> {
        let client = Client::builder()
            .timeout(Duration::from_secs(1))
            .build()?;
        assert!(client.limiter.is_none());
        client.wait().await;
        client.wait().await;

        Ok(())
    }

    #[test]
    fn test_zero_interval_disables_pacing() -> Result<()> {
        let client = Client::builder()
            .timeout(Duration::from_secs(1))
            .interval(0)
            .build()?;
        assert!(client.limiter.is_none());

        Ok(())
    }
}
