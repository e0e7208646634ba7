use clap::Args;

use crate::cmd::prompt::value_or_prompt;
use crate::context::AppContext;
use crate::domain::report::normalize_organization;
use crate::error::AppResult;
use crate::workflow::report::ensure_organization;

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Organization to look up.
    #[arg(long)]
    pub org: Option<String>,
}

/// Returns the normalized organization name once the lookup succeeds.
pub async fn run(ctx: &AppContext, args: CheckArgs) -> AppResult<String> {
    let raw = value_or_prompt(args.org, "Enter the organization name")?;
    let organization = normalize_organization(&raw)?;
    ensure_organization(ctx, &organization).await?;
    Ok(organization)
}
