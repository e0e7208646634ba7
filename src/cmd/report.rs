use std::io::{self, Write};

use clap::Args;

use crate::cmd::prompt::value_or_prompt;
use crate::context::AppContext;
use crate::domain::report::{OrganizationReport, ReportRequest, SortKey};
use crate::error::AppResult;
use crate::workflow::report::build_report;

const RULE: &str = "-----------------------------------------------------------------";

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Organization whose repositories are listed.
    #[arg(long)]
    pub org: Option<String>,
    /// Number of repositories to list (n).
    #[arg(short = 'n', long = "repositories")]
    pub repositories: Option<String>,
    /// Number of contributors to list per repository (m).
    #[arg(short = 'm', long = "contributors")]
    pub contributors: Option<String>,
    /// Field the search results are sorted on.
    #[arg(long, value_enum, default_value_t = SortKey::Forks)]
    pub sort: SortKey,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: ReportArgs) -> AppResult<()> {
    let organization = value_or_prompt(args.org, "Enter the organization name")?;
    let repositories = value_or_prompt(args.repositories, "Enter the number of repositories (n)")?;
    let contributors = value_or_prompt(
        args.contributors,
        "Enter the number of contributors per repository (m)",
    )?;
    let request = ReportRequest::parse(&organization, &repositories, &contributors, args.sort)?;

    let report = build_report(ctx, &request).await?;

    let mut stdout = io::stdout().lock();
    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(io::Error::from)?;
        writeln!(stdout, "{json}")?;
    } else {
        render_text(&request, &report, &mut stdout)?;
    }
    Ok(())
}

pub fn render_text(
    request: &ReportRequest,
    report: &OrganizationReport,
    out: &mut impl Write,
) -> AppResult<()> {
    writeln!(
        out,
        "Top {} most popular repositories of {} (sorted by {}) and their fork counts:",
        request.repository_count,
        report.organization,
        request.sort.as_str()
    )?;

    for (rank, entry) in report.repositories.iter().enumerate() {
        writeln!(out, "{}. Repository Name: {}", rank + 1, entry.repository.name)?;
        writeln!(out, "Forks Count: {}", entry.repository.fork_count)?;
        writeln!(out)?;
        writeln!(
            out,
            "Top {} contributors and their respective commit counts:",
            request.contributor_count
        )?;
        for (position, contributor) in entry.contributors.iter().enumerate() {
            writeln!(
                out,
                "{}. {} -> {}",
                position + 1,
                contributor.login,
                contributor.commit_count
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
    }
    Ok(())
}
