use std::fmt;

use azure_api::ArmResource;

/// Name of the single subnet carved out of every virtual network.
pub const DEFAULT_SUBNET: &str = "default";

/// Everything one invocation needs. Built once by the CLI, never mutated.
#[derive(Clone)]
pub struct ProvisioningRequest {
    pub resource_group: String,
    pub name: String,
    pub region: String,
    pub size: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl ProvisioningRequest {
    pub fn names(&self) -> ResourceNames {
        ResourceNames::derive(&self.name)
    }
}

impl fmt::Debug for ProvisioningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisioningRequest")
            .field("resource_group", &self.resource_group)
            .field("name", &self.name)
            .field("region", &self.region)
            .field("size", &self.size)
            .field("admin_username", &self.admin_username)
            .finish_non_exhaustive()
    }
}

/// Names of the supporting resources, derived from the VM name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub virtual_machine: String,
    pub virtual_network: String,
    pub subnet: String,
    pub public_ip: String,
    pub network_interface: String,
}

impl ResourceNames {
    pub fn derive(vm_name: &str) -> Self {
        Self {
            virtual_machine: vm_name.to_string(),
            virtual_network: format!("{vm_name}-vnet"),
            subnet: DEFAULT_SUBNET.to_string(),
            public_ip: format!("{vm_name}-ip"),
            network_interface: format!("{vm_name}-nic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ResourceGroup,
    VirtualNetwork,
    Subnet,
    PublicIp,
    NetworkInterface,
    VirtualMachine,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceGroup => "resource group",
            Self::VirtualNetwork => "virtual network",
            Self::Subnet => "subnet",
            Self::PublicIp => "public ip address",
            Self::NetworkInterface => "network interface",
            Self::VirtualMachine => "virtual machine",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the control plane reported back for one created resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningResult {
    pub kind: ResourceKind,
    pub name: String,
    /// Opaque ARM resource id.
    pub id: String,
    pub location: Option<String>,
    pub provisioning_state: Option<String>,
}

impl ProvisioningResult {
    pub fn from_resource(kind: ResourceKind, resource: &impl ArmResource) -> Self {
        Self {
            kind,
            name: resource.name().unwrap_or_default().to_string(),
            id: resource.id().unwrap_or_default().to_string(),
            location: resource.location().map(str::to_string),
            provisioning_state: resource.provisioning_state().map(str::to_string),
        }
    }

    /// The id, or `MissingId` if the service returned none.
    pub fn require_id(&self) -> crate::Result<&str> {
        if self.id.is_empty() {
            return Err(crate::Error::MissingId(self.kind));
        }
        Ok(&self.id)
    }
}
