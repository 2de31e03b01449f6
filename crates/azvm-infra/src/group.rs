use std::sync::Arc;

use azure_api::ResourceGroup;
use tracing::info;

use crate::types::ProvisioningResult;
use crate::{ControlPlane, Result};

/// Makes sure a resource group exists in a region.
pub struct ResourceGroupEnsurer {
    plane: Arc<dyn ControlPlane>,
}

impl ResourceGroupEnsurer {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self { plane }
    }

    /// Create-or-update, so an existing group in the same region is returned as is.
    pub async fn ensure(&self, resource_group: &str, region: &str) -> Result<ProvisioningResult> {
        let group = ResourceGroup {
            location: Some(region.to_string()),
            ..Default::default()
        };

        let result = self.plane.create_resource_group(resource_group, &group).await?;
        info!(resource_group, region, id = %result.id, "resource group ready");
        Ok(result)
    }
}
