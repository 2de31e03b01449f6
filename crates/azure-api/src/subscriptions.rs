use crate::types::Subscription;
use crate::{MANAGEMENT_URL, Result, Transport};

const SUBSCRIPTIONS_API_VERSION: &str = "2020-01-01";

/// Tenant-level client used to discover which subscription to work in.
#[derive(Clone)]
pub struct SubscriptionClient {
    transport: Transport,
    base_url: String,
}

impl SubscriptionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(token),
            base_url: MANAGEMENT_URL.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// List every subscription visible to the token, following `nextLink`.
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let url = format!("{}/subscriptions", self.base_url);
        self.transport
            .list_all(&url, SUBSCRIPTIONS_API_VERSION, "list subscriptions")
            .await
    }
}
