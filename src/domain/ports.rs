use crate::domain::model::{Report, SourceOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path` inside this storage.
    fn locate(&self, path: &str) -> String;
}

/// One HTTP response as seen by a source adapter.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub encoding: Option<String>,
}

impl FetchedPage {
    /// 2xx with a body long enough to plausibly hold content.
    pub fn is_usable(&self, min_body_length: usize) -> bool {
        (200..300).contains(&self.status) && self.body.len() >= min_body_length
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Transport failures (timeouts, refused connections) are errors;
    /// non-2xx responses are returned as pages for the caller to judge.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceOutcome>>;
    async fn transform(&self, data: Vec<SourceOutcome>) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<String>;
}
