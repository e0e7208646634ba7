use url::{Url, form_urlencoded};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

const TOKEN_PARAM: &str = "access_token";

/// `{base}/orgs/{organization}`
pub fn organization_url(config: &AppConfig, organization: &str) -> AppResult<Url> {
    let mut url = endpoint(config, &["orgs", organization])?;
    url.set_query(with_token(config, String::new()).as_deref());
    Ok(url)
}

/// `{base}/search/repositories?q=user:{organization}&sort={sort}&page={page}`
pub fn repository_search_url(
    config: &AppConfig,
    organization: &str,
    sort: &str,
    page: u32,
) -> AppResult<Url> {
    let mut url = endpoint(config, &["search", "repositories"])?;
    let query = format!(
        "q=user:{}&sort={}&page={page}",
        encode(organization),
        encode(sort)
    );
    url.set_query(with_token(config, query).as_deref());
    Ok(url)
}

/// `{base}/repositories/{repo_id}/contributors?page={page}`
pub fn contributors_url(config: &AppConfig, repo_id: u64, page: u32) -> AppResult<Url> {
    let mut url = endpoint(config, &["repositories", &repo_id.to_string(), "contributors"])?;
    url.set_query(with_token(config, format!("page={page}")).as_deref());
    Ok(url)
}

/// Copy of `url` safe to log: the access token value is masked.
pub fn redact(url: &Url) -> String {
    let Some(query) = url.query() else {
        return url.to_string();
    };
    let masked = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((TOKEN_PARAM, _)) => format!("{TOKEN_PARAM}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    let mut redacted = url.clone();
    redacted.set_query(Some(&masked));
    redacted.to_string()
}

fn endpoint(config: &AppConfig, segments: &[&str]) -> AppResult<Url> {
    let mut url = config.base_url.clone();
    url.path_segments_mut()
        .map_err(|_| {
            AppError::Configuration(format!("base URL '{}' cannot carry a path", config.base_url))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn with_token(config: &AppConfig, query: String) -> Option<String> {
    match config.query_token() {
        Some(token) if query.is_empty() => Some(format!("{TOKEN_PARAM}={}", encode(token))),
        Some(token) => Some(format!("{query}&{TOKEN_PARAM}={}", encode(token))),
        None if query.is_empty() => None,
        None => Some(query),
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
