pub mod pager;
pub mod urls;

use log::info;

use crate::config::AppConfig;
use crate::domain::report::SortKey;
use crate::domain::repository::{ContributorSummary, RepositorySummary};
use crate::error::AppResult;
use crate::services::HttpService;

use self::pager::{PageLayout, Pager, decode_item};

/// Looks the organization up and returns the raw HTTP status.
pub async fn is_valid_organization(
    http: &dyn HttpService,
    config: &AppConfig,
    organization: &str,
) -> AppResult<u16> {
    let url = urls::organization_url(config, organization)?;
    info!("verifying organization via {}", urls::redact(&url));
    let response = http.get(&url).await?;
    info!("organization lookup answered {}", response.status);
    Ok(response.status)
}

/// The organization's repositories in the API's `sort` order, at most `count`.
pub fn popular_repositories<'a>(
    http: &'a dyn HttpService,
    config: &'a AppConfig,
    organization: &'a str,
    sort: SortKey,
    count: usize,
) -> Pager<'a, RepositorySummary> {
    Pager::new(
        http,
        PageLayout::Field("items"),
        count,
        move |page| urls::repository_search_url(config, organization, sort.as_str(), page),
        decode_item::<RepositorySummary>,
    )
}

/// A repository's contributors by contribution count, at most `count`.
pub fn top_contributors<'a>(
    http: &'a dyn HttpService,
    config: &'a AppConfig,
    repo_id: u64,
    count: usize,
) -> Pager<'a, ContributorSummary> {
    Pager::new(
        http,
        PageLayout::Bare,
        count,
        move |page| urls::contributors_url(config, repo_id, page),
        decode_item::<ContributorSummary>,
    )
}
