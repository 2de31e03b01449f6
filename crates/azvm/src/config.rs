use std::env;
use std::time::Duration;

use azure_api::{AUTHORITY_HOST, Credential, MANAGEMENT_URL, SubscriptionClient};
use tracing::info;

use crate::error::{CliError, Result};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credential: Credential,
    pub subscription_id: Option<String>,
    pub resource_manager_url: String,
    pub authority_host: String,
    pub poll_interval: Duration,
}

impl AppConfig {
    /// Read from env vars:
    ///
    /// - `AZURE_ACCESS_TOKEN`, or `AZURE_TENANT_ID` + `AZURE_CLIENT_ID` + `AZURE_CLIENT_SECRET`
    /// - `AZURE_SUBSCRIPTION_ID` (optional, first visible subscription otherwise)
    /// - `AZURE_RESOURCE_MANAGER_URL` (default: `https://management.azure.com`)
    /// - `AZURE_AUTHORITY_HOST` (default: `https://login.microsoftonline.com`)
    /// - `AZVM_POLL_INTERVAL_SECS` (default: `5`)
    pub fn from_env() -> Result<Self> {
        let credential = match non_empty("AZURE_ACCESS_TOKEN") {
            Some(token) => Credential::AccessToken(token),
            None => match (
                non_empty("AZURE_TENANT_ID"),
                non_empty("AZURE_CLIENT_ID"),
                non_empty("AZURE_CLIENT_SECRET"),
            ) {
                (Some(tenant_id), Some(client_id), Some(client_secret)) => Credential::ClientSecret {
                    tenant_id,
                    client_id,
                    client_secret,
                },
                _ => {
                    return Err(CliError::MissingEnv(
                        "AZURE_ACCESS_TOKEN (or AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET)"
                            .into(),
                    ));
                }
            },
        };

        let poll_interval = match non_empty("AZVM_POLL_INTERVAL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| CliError::InvalidEnv {
                    name: "AZVM_POLL_INTERVAL_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        };

        Ok(Self {
            credential,
            subscription_id: non_empty("AZURE_SUBSCRIPTION_ID"),
            resource_manager_url: non_empty("AZURE_RESOURCE_MANAGER_URL")
                .unwrap_or_else(|| MANAGEMENT_URL.into()),
            authority_host: non_empty("AZURE_AUTHORITY_HOST").unwrap_or_else(|| AUTHORITY_HOST.into()),
            poll_interval,
        })
    }

    /// The configured subscription, or the first one the token can see.
    pub async fn resolve_subscription(&self, token: &str) -> Result<String> {
        if let Some(id) = &self.subscription_id {
            return Ok(id.clone());
        }

        let subscriptions = SubscriptionClient::new(token)
            .with_base_url(&self.resource_manager_url)
            .list_subscriptions()
            .await?;

        let first = subscriptions.into_iter().next().ok_or(CliError::NoSubscription)?;
        info!(
            subscription_id = %first.subscription_id,
            name = first.display_name.as_deref().unwrap_or(""),
            "discovered subscription"
        );
        Ok(first.subscription_id)
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
