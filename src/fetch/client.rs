use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam over the HTTP layer so dataset loading can be stubbed in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
