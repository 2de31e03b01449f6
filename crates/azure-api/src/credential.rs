use crate::types::TokenResponse;
use crate::{Error, Result};

pub const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// How to obtain a bearer token for the resource manager.
#[derive(Clone)]
pub enum Credential {
    /// A token acquired elsewhere (e.g. `az account get-access-token`).
    AccessToken(String),
    /// Service principal, client-credentials flow.
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("AccessToken(..)"),
            Self::ClientSecret {
                tenant_id,
                client_id,
                ..
            } => f
                .debug_struct("ClientSecret")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

impl Credential {
    /// Resolve to a bearer token scoped to `resource_manager_url`.
    pub async fn access_token(
        &self,
        authority_host: &str,
        resource_manager_url: &str,
    ) -> Result<String> {
        let (tenant_id, client_id, client_secret) = match self {
            Self::AccessToken(token) => return Ok(token.clone()),
            Self::ClientSecret {
                tenant_id,
                client_id,
                client_secret,
            } => (tenant_id, client_id, client_secret),
        };

        let url = format!(
            "{}/{tenant_id}/oauth2/v2.0/token",
            authority_host.trim_end_matches('/')
        );
        let scope = token_scope(resource_manager_url);

        let resp = reqwest::Client::new()
            .post(url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("scope", scope.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Token { status, body });
        }

        let token: TokenResponse = resp.json().await?;
        tracing::debug!(client_id = %client_id, "azure: acquired service principal token");
        Ok(token.access_token)
    }
}

fn token_scope(resource_manager_url: &str) -> String {
    format!("{}/.default", resource_manager_url.trim_end_matches('/'))
}
