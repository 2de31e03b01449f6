use std::sync::Arc;

use azure_api::{
    HardwareProfile, ImageReference, NetworkProfile, OsProfile, StorageProfile, SubResource,
    VirtualMachine, VirtualMachineProperties,
};
use tracing::info;

use crate::types::{ProvisioningRequest, ProvisioningResult};
use crate::{ControlPlane, Result};

pub const IMAGE_PUBLISHER: &str = "canonical";
pub const IMAGE_OFFER: &str = "0001-com-ubuntu-server-focal";
pub const IMAGE_SKU: &str = "20_04-lts-gen2";
pub const IMAGE_VERSION: &str = "latest";

/// Ubuntu 20.04 LTS, gen2.
pub fn image_reference() -> ImageReference {
    ImageReference {
        publisher: IMAGE_PUBLISHER.into(),
        offer: IMAGE_OFFER.into(),
        sku: IMAGE_SKU.into(),
        version: IMAGE_VERSION.into(),
    }
}

pub struct VmProvisioner {
    plane: Arc<dyn ControlPlane>,
}

impl VmProvisioner {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self { plane }
    }

    /// Create the VM on `nic` and wait for a terminal provisioning state.
    pub async fn create_vm(
        &self,
        request: &ProvisioningRequest,
        nic: &ProvisioningResult,
    ) -> Result<ProvisioningResult> {
        let vm = virtual_machine_payload(request, nic)?;

        let result = self
            .plane
            .create_virtual_machine(&request.resource_group, &request.name, &vm)
            .await?;

        info!(
            vm = %result.name,
            size = %request.size,
            state = result.provisioning_state.as_deref().unwrap_or("unknown"),
            "virtual machine created"
        );
        Ok(result)
    }
}

fn virtual_machine_payload(
    request: &ProvisioningRequest,
    nic: &ProvisioningResult,
) -> Result<VirtualMachine> {
    let nic_id = nic.require_id()?;

    Ok(VirtualMachine {
        location: Some(request.region.clone()),
        properties: Some(VirtualMachineProperties {
            hardware_profile: Some(HardwareProfile {
                vm_size: request.size.clone(),
            }),
            storage_profile: Some(StorageProfile {
                image_reference: Some(image_reference()),
            }),
            os_profile: Some(OsProfile {
                computer_name: request.name.clone(),
                admin_username: request.admin_username.clone(),
                admin_password: Some(request.admin_password.clone()),
            }),
            network_profile: Some(NetworkProfile {
                network_interfaces: vec![SubResource {
                    id: nic_id.to_string(),
                }],
            }),
            provisioning_state: None,
        }),
        ..Default::default()
    })
}
