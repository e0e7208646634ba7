use clap::ValueEnum;
use serde::Serialize;

use crate::domain::repository::{ContributorSummary, RepositorySummary};
use crate::error::{AppError, AppResult};

/// Search `sort` values accepted by the repository search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Forks,
    Stars,
    Updated,
    HelpWantedIssues,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Forks => "forks",
            SortKey::Stars => "stars",
            SortKey::Updated => "updated",
            SortKey::HelpWantedIssues => "help-wanted-issues",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub organization: String,
    pub repository_count: usize,
    pub contributor_count: usize,
    pub sort: SortKey,
}

impl ReportRequest {
    /// Validates raw operator input. Counts are checked before anything else
    /// so bad input never reaches the network.
    pub fn parse(
        organization: &str,
        repository_count: &str,
        contributor_count: &str,
        sort: SortKey,
    ) -> AppResult<Self> {
        let repository_count = parse_count("number of repositories (n)", repository_count)?;
        let contributor_count =
            parse_count("number of contributors per repository (m)", contributor_count)?;
        let organization = normalize_organization(organization)?;

        Ok(Self {
            organization,
            repository_count,
            contributor_count,
            sort,
        })
    }
}

pub fn normalize_organization(raw: &str) -> AppResult<String> {
    let organization = raw.trim().to_lowercase();
    if organization.is_empty() {
        return Err(AppError::Input(
            "organization name must not be empty".to_string(),
        ));
    }
    Ok(organization)
}

/// Accepts decimal digits only; signs, spaces inside, and fractions are rejected.
pub fn parse_count(label: &str, raw: &str) -> AppResult<usize> {
    let value = raw.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Input(format!(
            "{label} must be a non-negative integer, got '{value}'"
        )));
    }
    value
        .parse::<usize>()
        .map_err(|err| AppError::Input(format!("{label} is out of range: {err}")))
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryReport {
    pub repository: RepositorySummary,
    pub contributors: Vec<ContributorSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationReport {
    pub organization: String,
    pub repositories: Vec<RepositoryReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_counts_and_lowercases_organization() {
        let request = ReportRequest::parse("  OctoCat ", "5", " 3\n", SortKey::Forks).unwrap();
        assert_eq!(request.organization, "octocat");
        assert_eq!(request.repository_count, 5);
        assert_eq!(request.contributor_count, 3);
    }

    #[test]
    fn rejects_non_decimal_counts() {
        for raw in ["5x", "-1", "+2", "1.5", "", " ", "1 2", "٣"] {
            assert!(
                matches!(parse_count("n", raw), Err(AppError::Input(_))),
                "accepted {raw:?}"
            );
        }
        assert_eq!(parse_count("n", "0").unwrap(), 0);
        assert_eq!(parse_count("n", "007").unwrap(), 7);
    }

    #[test]
    fn rejects_empty_organization() {
        assert!(matches!(
            ReportRequest::parse("   ", "1", "1", SortKey::Forks),
            Err(AppError::Input(_))
        ));
    }

    #[test]
    fn sort_key_wire_values() {
        assert_eq!(SortKey::default().as_str(), "forks");
        assert_eq!(SortKey::HelpWantedIssues.as_str(), "help-wanted-issues");
    }
}
