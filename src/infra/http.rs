use async_trait::async_trait;
use log::debug;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use url::Url;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::infra::github::urls::redact;
use crate::services::{HttpResponse, HttpService};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

pub struct ReqwestHttp {
    http: Client,
}

impl ReqwestHttp {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(Self::default_headers(config.header_token())?)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http })
    }

    fn default_headers(bearer: Option<&str>) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        if let Some(token) = bearer {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                AppError::Configuration("access token contains invalid header characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl HttpService for ReqwestHttp {
    async fn get(&self, url: &Url) -> AppResult<HttpResponse> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| {
                AppError::Network(format!("request to {} failed: {}", redact(url), err.without_url()))
            })?;

        let status = response.status().as_u16();
        debug!("{} answered {}", redact(url), status);

        let body = response.text().await.map_err(|err| {
            AppError::Network(format!(
                "failed to read response from {}: {}",
                redact(url),
                err.without_url()
            ))
        })?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_is_only_set_when_requested() {
        let headers = ReqwestHttp::default_headers(None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(ACCEPT).unwrap(), GITHUB_MEDIA_TYPE);

        let headers = ReqwestHttp::default_headers(Some("abc")).unwrap();
        let auth = headers.get(AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        assert_eq!(auth.to_str().unwrap(), "Bearer abc");
    }

    #[test]
    fn rejects_token_with_control_characters() {
        assert!(matches!(
            ReqwestHttp::default_headers(Some("abc\ndef")),
            Err(AppError::Configuration(_))
        ));
    }
}
