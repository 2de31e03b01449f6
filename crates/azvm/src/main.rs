mod cli;
mod config;
mod error;
mod output;
mod prompt;

use std::process::ExitCode;
use std::sync::Arc;

use azure_api::ArmClient;
use azvm_infra::{ArmControlPlane, Outcome, ProvisioningOrchestrator, password};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::prompt::Terminal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they never interleave with the result display.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Password first: nothing remote happens until it is acceptable.
    let admin_password = prompt::resolve_password(cli.password.clone(), &mut Terminal)?;
    password::check(&admin_password)?;
    let request = cli.into_request(admin_password);

    let config = AppConfig::from_env()?;
    let token = config
        .credential
        .access_token(&config.authority_host, &config.resource_manager_url)
        .await?;
    let subscription_id = config.resolve_subscription(&token).await?;

    let client = ArmClient::new(token, subscription_id)
        .with_base_url(&config.resource_manager_url)
        .with_poll_interval(config.poll_interval);
    let plane = Arc::new(ArmControlPlane::new(client));
    tracing::info!(
        subscription_id = plane.subscription_id(),
        request = ?request,
        "provisioning"
    );

    let orchestrator = ProvisioningOrchestrator::new(plane);
    match orchestrator.provision(&request, output::print_result).await? {
        Outcome::Provisioned(_) => Ok(()),
        Outcome::Conflict { diagnostic } => Err(CliError::Conflict(diagnostic)),
    }
}
