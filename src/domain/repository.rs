use serde::{Deserialize, Serialize};

/// One item of a repository search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    #[serde(rename = "forks")]
    pub fork_count: u64,
}

/// One item of a repository's contributor listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorSummary {
    pub login: String,
    #[serde(rename = "contributions")]
    pub commit_count: u64,
}
