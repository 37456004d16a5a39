use super::client::HttpClient;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Plain reqwest client with connect and request timeouts.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        let builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));
        Self(build_or_default(builder))
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the configured client, or a default one (no timeouts) when the
/// configuration is rejected.
fn build_or_default(builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "HTTP client setup failed, using defaults without timeouts");
        reqwest::Client::new()
    })
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_builder_falls_back_to_default_client() {
        let builder = reqwest::Client::builder().user_agent("bad\nagent");
        let client = build_or_default(builder);

        let req = client.get("http://localhost/games.csv").build().unwrap();
        assert_eq!(req.url().path(), "/games.csv");
    }
}
