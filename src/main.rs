use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use tracing::debug;

use luminara::{
    adapters::cli::{self, Cli},
    infra::{
        config::AppConfig,
        setup::{init_app_context, init_tracing},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let args = Cli::parse();

    let config = AppConfig::from_env(args.api_url.clone(), args.home.clone())?;
    init_tracing(config.log_file.as_deref())?;
    debug!(api_url = %config.api_url, home = %config.home.display(), "starting");

    let ctx = init_app_context(config, args.yes)?;
    let state = ctx.init(args.from_url.as_ref()).await;
    debug!(session = state.as_str(), "session initialized");

    let result = cli::run(args.command, &ctx, args.from_url.as_ref()).await;
    ctx.teardown();
    result
}
