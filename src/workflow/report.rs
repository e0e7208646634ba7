use log::info;

use crate::context::AppContext;
use crate::domain::report::{OrganizationReport, ReportRequest, RepositoryReport};
use crate::error::{AppError, AppResult};
use crate::infra::github;

/// Fails unless the organization lookup answers 200.
pub async fn ensure_organization(ctx: &AppContext, organization: &str) -> AppResult<()> {
    let status = github::is_valid_organization(ctx.http.as_ref(), &ctx.config, organization).await?;
    match status {
        200 => {
            info!("{organization} is a valid organization");
            Ok(())
        }
        401 => Err(AppError::Unauthorized),
        403 => Err(AppError::RateLimited),
        status => Err(AppError::OrganizationNotFound {
            organization: organization.to_string(),
            status,
        }),
    }
}

pub async fn build_report(ctx: &AppContext, request: &ReportRequest) -> AppResult<OrganizationReport> {
    ensure_organization(ctx, &request.organization).await?;

    let http = ctx.http.as_ref();
    let repositories = github::popular_repositories(
        http,
        &ctx.config,
        &request.organization,
        request.sort,
        request.repository_count,
    )
    .collect()
    .await?;
    info!(
        "found {} of {} requested repositories",
        repositories.len(),
        request.repository_count
    );

    let mut reports = Vec::with_capacity(repositories.len());
    for repository in repositories {
        let contributors =
            github::top_contributors(http, &ctx.config, repository.id, request.contributor_count)
                .collect()
                .await?;
        info!(
            "{}: {} contributors fetched",
            repository.name,
            contributors.len()
        );
        reports.push(RepositoryReport {
            repository,
            contributors,
        });
    }

    Ok(OrganizationReport {
        organization: request.organization.clone(),
        repositories: reports,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::config::{AppConfig, DEFAULT_BASE_URL};
    use crate::domain::report::SortKey;
    use crate::test_utils::{ScriptedHttp, json_response, page_of, search_page};

    fn context(http: Arc<ScriptedHttp>) -> AppContext {
        let config = AppConfig::new(DEFAULT_BASE_URL, None).unwrap();
        AppContext::new(config, http)
    }

    fn request(repositories: usize, contributors: usize) -> ReportRequest {
        ReportRequest {
            organization: "octocat".to_string(),
            repository_count: repositories,
            contributor_count: contributors,
            sort: SortKey::Forks,
        }
    }

    /// Organization exists, owns 3 repositories, each with 4 contributors.
    fn healthy_org() -> Arc<ScriptedHttp> {
        Arc::new(ScriptedHttp::new(|url| {
            let path = url.path();
            if path.starts_with("/orgs/") {
                json_response(200, json!({ "login": "octocat" }))
            } else if path == "/search/repositories" {
                match page_of(url) {
                    1 => json_response(200, search_page(0..3)),
                    _ => json_response(200, json!({ "items": [] })),
                }
            } else {
                match page_of(url) {
                    1 => json_response(
                        200,
                        json!([
                            { "login": "a", "contributions": 9 },
                            { "login": "b", "contributions": 7 },
                            { "login": "c", "contributions": 5 },
                            { "login": "d", "contributions": 1 }
                        ]),
                    ),
                    _ => json_response(200, json!([])),
                }
            }
        }))
    }

    #[tokio::test]
    async fn fetches_contributors_per_repository_in_order() {
        let http = healthy_org();
        let ctx = context(http.clone());

        let report = build_report(&ctx, &request(2, 2)).await.unwrap();

        assert_eq!(report.organization, "octocat");
        let names: Vec<&str> = report
            .repositories
            .iter()
            .map(|r| r.repository.name.as_str())
            .collect();
        assert_eq!(names, vec!["repo-1", "repo-2"]);
        for repo in &report.repositories {
            let logins: Vec<&str> = repo.contributors.iter().map(|c| c.login.as_str()).collect();
            assert_eq!(logins, vec!["a", "b"]);
        }
        assert_eq!(
            http.requested(),
            vec![
                "https://api.github.com/orgs/octocat",
                "https://api.github.com/search/repositories?q=user:octocat&sort=forks&page=1",
                "https://api.github.com/repositories/1/contributors?page=1",
                "https://api.github.com/repositories/2/contributors?page=1",
            ]
        );
    }

    #[tokio::test]
    async fn fewer_repositories_than_requested_is_not_an_error() {
        let http = healthy_org();
        let report = build_report(&context(http), &request(10, 10)).await.unwrap();

        assert_eq!(report.repositories.len(), 3);
        assert!(report.repositories.iter().all(|r| r.contributors.len() == 4));
    }

    #[tokio::test]
    async fn unknown_organization_stops_before_search() {
        let http = Arc::new(ScriptedHttp::new(|_| {
            json_response(404, json!({ "message": "Not Found" }))
        }));
        let err = build_report(&context(http.clone()), &request(5, 3))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::OrganizationNotFound { ref organization, status: 404 } if organization == "octocat"
        ));
        assert_eq!(http.request_count(), 1);
    }

    #[tokio::test]
    async fn lookup_auth_failures_are_distinct() {
        for (status, unauthorized) in [(401, true), (403, false)] {
            let http = Arc::new(ScriptedHttp::new(move |_| (status, "{}".to_string())));
            let err = ensure_organization(&context(http), "octocat").await.unwrap_err();
            match err {
                AppError::Unauthorized => assert!(unauthorized),
                AppError::RateLimited => assert!(!unauthorized),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[tokio::test]
    async fn failure_mid_run_aborts_whole_report() {
        let http = Arc::new(ScriptedHttp::new(|url| {
            if url.path().starts_with("/orgs/") {
                json_response(200, json!({}))
            } else if url.path() == "/search/repositories" {
                json_response(200, search_page(0..2))
            } else {
                (200, "<html>oops</html>".to_string())
            }
        }));
        let err = build_report(&context(http.clone()), &request(2, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Decode(_)));
        // Lookup, search, then the first contributor page fails.
        assert_eq!(http.request_count(), 3);
    }
}
