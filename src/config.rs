use url::Url;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub access_token: Option<String>,
    pub token_placement: TokenPlacement,
}

/// Where the access token travels on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    /// `access_token` query parameter on every URL.
    Query,
    /// `Authorization: Bearer` header; URLs stay token-free.
    Header,
}

impl AppConfig {
    pub fn new(base_url: &str, access_token: Option<String>) -> AppResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| AppError::Configuration(format!("invalid base URL '{base_url}': {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        let access_token = access_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            base_url,
            access_token,
            token_placement: TokenPlacement::Query,
        })
    }

    pub fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = placement;
        self
    }

    /// Token to append to URLs, if any.
    pub fn query_token(&self) -> Option<&str> {
        match self.token_placement {
            TokenPlacement::Query => self.access_token.as_deref(),
            TokenPlacement::Header => None,
        }
    }

    /// Token to send as a bearer header, if any.
    pub fn header_token(&self) -> Option<&str> {
        match self.token_placement {
            TokenPlacement::Header => self.access_token.as_deref(),
            TokenPlacement::Query => None,
        }
    }
}
