use async_trait::async_trait;
use azure_api::{
    ArmClient, ArmResource, NetworkInterface, PublicIpAddress, ResourceGroup, StatusCode, Subnet,
    VirtualMachine, VirtualNetwork,
};

use crate::types::{ProvisioningResult, ResourceKind};
use crate::{ControlPlane, Error, Result};

/// ARM error codes that mean "something already there is in the way".
const CONFLICT_CODES: &[&str] = &[
    "Conflict",
    "PropertyChangeNotAllowed",
    "SubnetAlreadyInUse",
    "InUseSubnetCannotBeDeleted",
    "NicInUse",
    "NicReservedForAnotherVm",
];

/// Azure Resource Manager provider.
///
/// Delegates to `azure_api::ArmClient` for all HTTP calls.
pub struct ArmControlPlane {
    client: ArmClient,
}

impl ArmControlPlane {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub fn subscription_id(&self) -> &str {
        self.client.subscription_id()
    }
}

/// Map a raw API error onto the provisioning taxonomy.
fn classify(resource_group: &str, operation: &'static str, err: azure_api::Error) -> Error {
    if err.code() == Some("ResourceGroupNotFound") {
        return Error::ResourceGroupNotFound(resource_group.to_string());
    }

    let conflict_status = err.status() == Some(StatusCode::CONFLICT);
    let conflict_code = err.code().is_some_and(|c| CONFLICT_CODES.contains(&c));
    if conflict_status || conflict_code {
        return Error::Conflict {
            operation,
            message: err.to_string(),
        };
    }

    Error::Azure(err)
}

fn created<R: ArmResource>(
    kind: ResourceKind,
    resource_group: &str,
    operation: &'static str,
    result: azure_api::Result<R>,
) -> Result<ProvisioningResult> {
    result
        .map(|r| ProvisioningResult::from_resource(kind, &r))
        .map_err(|e| classify(resource_group, operation, e))
}

#[async_trait]
impl ControlPlane for ArmControlPlane {
    async fn create_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ProvisioningResult> {
        let result = self.client.create_or_update_resource_group(name, group).await;
        created(ResourceKind::ResourceGroup, name, "create resource group", result)
    }

    async fn create_virtual_network(
        &self,
        resource_group: &str,
        name: &str,
        vnet: &VirtualNetwork,
    ) -> Result<ProvisioningResult> {
        let result = self
            .client
            .create_or_update_virtual_network(resource_group, name, vnet)
            .await;
        created(ResourceKind::VirtualNetwork, resource_group, "create virtual network", result)
    }

    async fn create_subnet(
        &self,
        resource_group: &str,
        vnet: &str,
        name: &str,
        subnet: &Subnet,
    ) -> Result<ProvisioningResult> {
        let result = self
            .client
            .create_or_update_subnet(resource_group, vnet, name, subnet)
            .await;
        created(ResourceKind::Subnet, resource_group, "create subnet", result)
    }

    async fn create_public_ip(
        &self,
        resource_group: &str,
        name: &str,
        ip: &PublicIpAddress,
    ) -> Result<ProvisioningResult> {
        let result = self
            .client
            .create_or_update_public_ip_address(resource_group, name, ip)
            .await;
        created(ResourceKind::PublicIp, resource_group, "create public ip address", result)
    }

    async fn create_network_interface(
        &self,
        resource_group: &str,
        name: &str,
        nic: &NetworkInterface,
    ) -> Result<ProvisioningResult> {
        let result = self
            .client
            .create_or_update_network_interface(resource_group, name, nic)
            .await;
        created(ResourceKind::NetworkInterface, resource_group, "create network interface", result)
    }

    async fn create_virtual_machine(
        &self,
        resource_group: &str,
        name: &str,
        vm: &VirtualMachine,
    ) -> Result<ProvisioningResult> {
        let result = self
            .client
            .create_or_update_virtual_machine(resource_group, name, vm)
            .await;
        created(ResourceKind::VirtualMachine, resource_group, "create virtual machine", result)
    }

    async fn list_virtual_machines(&self, resource_group: &str) -> Result<Vec<String>> {
        let vms = self
            .client
            .list_virtual_machines(resource_group)
            .await
            .map_err(|e| classify(resource_group, "list virtual machines", e))?;
        Ok(vms.into_iter().filter_map(|vm| vm.name).collect())
    }

    async fn list_network_interfaces(&self, resource_group: &str) -> Result<Vec<String>> {
        let nics = self
            .client
            .list_network_interfaces(resource_group)
            .await
            .map_err(|e| classify(resource_group, "list network interfaces", e))?;
        Ok(nics.into_iter().filter_map(|nic| nic.name).collect())
    }
}
