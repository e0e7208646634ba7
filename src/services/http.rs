use async_trait::async_trait;
use url::Url;

use crate::error::AppResult;

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpService: Send + Sync {
    /// Any status counts as a response; only transport failures are errors.
    async fn get(&self, url: &Url) -> AppResult<HttpResponse>;
}
