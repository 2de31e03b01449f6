use std::sync::Arc;

use azure_api::{
    AddressSpace, IpConfiguration, IpConfigurationProperties, NetworkInterface,
    NetworkInterfaceProperties, PublicIpAddress, PublicIpAddressProperties, PublicIpAddressSku,
    SubResource, Subnet, SubnetProperties, VirtualNetwork, VirtualNetworkProperties,
};
use tracing::info;

use crate::types::{ProvisioningRequest, ProvisioningResult};
use crate::{ControlPlane, Result};

pub const VNET_ADDRESS_SPACE: &str = "10.0.0.0/16";
pub const SUBNET_ADDRESS_PREFIX: &str = "10.0.0.0/24";
pub const PUBLIC_IP_SKU: &str = "Basic";
pub const PUBLIC_IP_ALLOCATION: &str = "Static";
pub const PUBLIC_IP_VERSION: &str = "IPv4";

/// Results of every network step, in creation order.
#[derive(Debug, Clone)]
pub struct NetworkStack {
    pub virtual_network: ProvisioningResult,
    pub subnet: ProvisioningResult,
    pub public_ip: ProvisioningResult,
    pub network_interface: ProvisioningResult,
}

impl NetworkStack {
    pub fn into_results(self) -> [ProvisioningResult; 4] {
        [
            self.virtual_network,
            self.subnet,
            self.public_ip,
            self.network_interface,
        ]
    }
}

/// Creates vnet, subnet, public IP and NIC, strictly one after another.
pub struct NetworkStackBuilder {
    plane: Arc<dyn ControlPlane>,
}

impl NetworkStackBuilder {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self { plane }
    }

    /// Run all four steps, handing each result to `on_result` as soon as it exists.
    pub async fn build<F>(
        &self,
        request: &ProvisioningRequest,
        on_result: &mut F,
    ) -> Result<NetworkStack>
    where
        F: FnMut(&ProvisioningResult),
    {
        let names = request.names();
        let rg = request.resource_group.as_str();

        let vnet = virtual_network_payload(&request.region);
        let virtual_network = self
            .plane
            .create_virtual_network(rg, &names.virtual_network, &vnet)
            .await?;
        info!(vnet = %virtual_network.name, "virtual network created");
        on_result(&virtual_network);

        let subnet = self
            .plane
            .create_subnet(rg, &names.virtual_network, &names.subnet, &subnet_payload())
            .await?;
        info!(subnet = %subnet.name, "subnet created");
        on_result(&subnet);

        let public_ip = self
            .plane
            .create_public_ip(rg, &names.public_ip, &public_ip_payload(&request.region))
            .await?;
        info!(public_ip = %public_ip.name, "public ip address created");
        on_result(&public_ip);

        let nic = network_interface_payload(request, &subnet, &public_ip)?;
        let network_interface = self
            .plane
            .create_network_interface(rg, &names.network_interface, &nic)
            .await?;
        info!(nic = %network_interface.name, "network interface created");
        on_result(&network_interface);

        Ok(NetworkStack {
            virtual_network,
            subnet,
            public_ip,
            network_interface,
        })
    }
}

fn virtual_network_payload(region: &str) -> VirtualNetwork {
    VirtualNetwork {
        location: Some(region.to_string()),
        properties: Some(VirtualNetworkProperties {
            address_space: Some(AddressSpace {
                address_prefixes: vec![VNET_ADDRESS_SPACE.to_string()],
            }),
            provisioning_state: None,
        }),
        ..Default::default()
    }
}

fn subnet_payload() -> Subnet {
    Subnet {
        properties: Some(SubnetProperties {
            address_prefix: Some(SUBNET_ADDRESS_PREFIX.to_string()),
            provisioning_state: None,
        }),
        ..Default::default()
    }
}

fn public_ip_payload(region: &str) -> PublicIpAddress {
    PublicIpAddress {
        location: Some(region.to_string()),
        sku: Some(PublicIpAddressSku {
            name: PUBLIC_IP_SKU.to_string(),
        }),
        properties: Some(PublicIpAddressProperties {
            public_ip_allocation_method: Some(PUBLIC_IP_ALLOCATION.to_string()),
            public_ip_address_version: Some(PUBLIC_IP_VERSION.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// The NIC binds the subnet and public IP by id, so both must carry one.
fn network_interface_payload(
    request: &ProvisioningRequest,
    subnet: &ProvisioningResult,
    public_ip: &ProvisioningResult,
) -> Result<NetworkInterface> {
    let subnet_id = subnet.require_id()?;
    let public_ip_id = public_ip.require_id()?;

    Ok(NetworkInterface {
        location: Some(request.region.clone()),
        properties: Some(NetworkInterfaceProperties {
            ip_configurations: vec![IpConfiguration {
                name: request.names().public_ip,
                properties: Some(IpConfigurationProperties {
                    subnet: Some(SubResource {
                        id: subnet_id.to_string(),
                    }),
                    public_ip_address: Some(SubResource {
                        id: public_ip_id.to_string(),
                    }),
                    private_ip_address: None,
                }),
            }],
            provisioning_state: None,
        }),
        ..Default::default()
    })
}
