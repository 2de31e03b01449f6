pub mod arm;
pub mod diagnose;
pub mod group;
pub mod network;
pub mod orchestrator;
pub mod password;
pub mod types;
pub mod vm;

#[cfg(test)]
mod testing;

use async_trait::async_trait;
use azure_api::{
    NetworkInterface, PublicIpAddress, ResourceGroup, Subnet, VirtualMachine, VirtualNetwork,
};
use types::{ProvisioningResult, ResourceKind};

pub use arm::ArmControlPlane;
pub use orchestrator::{Outcome, ProvisioningOrchestrator};
pub use types::{ProvisioningRequest, ResourceNames};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("resource group '{0}' could not be found")]
    ResourceGroupNotFound(String),

    #[error("{operation} conflicted with an existing resource: {message}")]
    Conflict {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid password: Does not meet requirements.")]
    PasswordPolicy,

    #[error("Password does not match.")]
    PasswordMismatch,

    #[error("{0} result carries no resource id")]
    MissingId(ResourceKind),

    #[error("azure error: {0}")]
    Azure(#[from] azure_api::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// How the orchestrator reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Create the group once, then rerun the pipeline.
    ResourceGroupNotFound,
    /// Diagnose by listing what already exists; never retried.
    AmbiguousConflict,
    PasswordPolicyViolation,
    PasswordMismatch,
    /// Propagated unchanged.
    Fatal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ResourceGroupNotFound(_) => ErrorKind::ResourceGroupNotFound,
            Self::Conflict { .. } => ErrorKind::AmbiguousConflict,
            Self::PasswordPolicy => ErrorKind::PasswordPolicyViolation,
            Self::PasswordMismatch => ErrorKind::PasswordMismatch,
            Self::MissingId(_) | Self::Azure(_) => ErrorKind::Fatal,
        }
    }
}

/// The remote operations provisioning needs, scoped to one subscription.
///
/// Every create call is create-or-update and returns only once the remote
/// operation is terminal. Implementations classify failures into [`Error`]
/// so that [`Error::kind`] drives recovery.
#[async_trait]
pub trait ControlPlane: Send + Sync + 'static {
    async fn create_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ProvisioningResult>;

    async fn create_virtual_network(
        &self,
        resource_group: &str,
        name: &str,
        vnet: &VirtualNetwork,
    ) -> Result<ProvisioningResult>;

    async fn create_subnet(
        &self,
        resource_group: &str,
        vnet: &str,
        name: &str,
        subnet: &Subnet,
    ) -> Result<ProvisioningResult>;

    async fn create_public_ip(
        &self,
        resource_group: &str,
        name: &str,
        ip: &PublicIpAddress,
    ) -> Result<ProvisioningResult>;

    async fn create_network_interface(
        &self,
        resource_group: &str,
        name: &str,
        nic: &NetworkInterface,
    ) -> Result<ProvisioningResult>;

    async fn create_virtual_machine(
        &self,
        resource_group: &str,
        name: &str,
        vm: &VirtualMachine,
    ) -> Result<ProvisioningResult>;

    /// Names of the VMs in a resource group.
    async fn list_virtual_machines(&self, resource_group: &str) -> Result<Vec<String>>;

    /// Names of the network interfaces in a resource group.
    async fn list_network_interfaces(&self, resource_group: &str) -> Result<Vec<String>>;
}
