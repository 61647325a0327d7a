use crate::model::FetchError;

#[async_trait::async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
