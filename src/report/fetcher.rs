use crate::model::FetchError;
use crate::report::traits::ReportFetcher;
use reqwest::Client;
use std::time::Duration;

/// Phrases the challenge interstitial shows instead of the report.
/// We do not try to get past it; the transport layer tells the user
/// to re-run the report or attach an export instead.
const CHALLENGE_MARKERS: [&str; 3] = ["Just a moment", "Un instant", "cf-challenge"];

pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) DiagAdvisorBot/0.1")
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }
}

#[async_trait::async_trait]
impl ReportFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if CHALLENGE_MARKERS.iter().any(|m| body.contains(m)) {
            return Err(FetchError::Blocked);
        }

        Ok(body)
    }
}
