mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod test_utils;
mod workflow;

use std::sync::Arc;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, info};

use crate::cmd::check::{self, CheckArgs};
use crate::cmd::prompt::{mask_secret, value_or_prompt};
use crate::cmd::report::{self, ReportArgs};
use crate::config::{AppConfig, DEFAULT_BASE_URL, TokenPlacement};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::http::ReqwestHttp;

#[derive(Parser)]
#[command(
    name = "popular-repos",
    author,
    version,
    about = "List an organization's most-forked repositories and their top contributors"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank repositories and their contributors (the default).
    Report(ReportArgs),
    /// Only check that an organization exists.
    Check(CheckArgs),
}

#[derive(Args)]
struct ConnectionArgs {
    /// GitHub API access token; prompted for when omitted, empty for none.
    #[arg(long, global = true)]
    token: Option<String>,
    /// Send the token as a bearer header instead of the `access_token` parameter.
    #[arg(long, global = true)]
    token_in_header: bool,
    /// REST API root, e.g. a GitHub Enterprise `/api/v3` URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = build_context(cli.connection)?;

    match cli.command.unwrap_or(Commands::Report(ReportArgs::default())) {
        Commands::Report(args) => report::run(&ctx, args).await,
        Commands::Check(args) => {
            let organization = check::run(&ctx, args).await?;
            println!("{organization} is a valid organization.");
            Ok(())
        }
    }
}

fn build_context(args: ConnectionArgs) -> AppResult<AppContext> {
    let token = value_or_prompt(
        args.token,
        "Enter the GitHub API access token (press ENTER to proceed without one)",
    )?;
    let placement = if args.token_in_header {
        TokenPlacement::Header
    } else {
        TokenPlacement::Query
    };
    let config = AppConfig::new(&args.base_url, Some(token))?.with_token_placement(placement);
    info!(
        "using {} with access token {}",
        config.base_url,
        mask_secret(config.access_token.as_deref())
    );

    let http = Arc::new(ReqwestHttp::new(&config)?);
    Ok(AppContext::new(config, http))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .try_init();
}
