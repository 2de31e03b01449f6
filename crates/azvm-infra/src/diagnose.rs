use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::{ControlPlane, Result};

/// What an ambiguous conflict turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    VmExists { vm: String, resource_group: String },
    NicExists { nic: String, resource_group: String },
    /// Neither name is taken; the caller reports the conflict error itself.
    Undetermined,
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VmExists { vm, resource_group } => {
                write!(f, "VM named '{vm}' already exists in '{resource_group}'.")
            }
            Self::NicExists {
                nic,
                resource_group,
            } => write!(f, "Nic named '{nic}' already exists in '{resource_group}'."),
            Self::Undetermined => f.write_str("no existing VM or NIC with a conflicting name"),
        }
    }
}

/// Re-reads the resource group to explain why a create was rejected.
pub struct ConflictDiagnoser {
    plane: Arc<dyn ControlPlane>,
}

impl ConflictDiagnoser {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self { plane }
    }

    pub async fn diagnose(
        &self,
        resource_group: &str,
        vm_name: &str,
        nic_name: &str,
    ) -> Result<Diagnosis> {
        let vms = self.plane.list_virtual_machines(resource_group).await?;
        debug!(resource_group, count = vms.len(), "listed virtual machines");
        if vms.iter().any(|name| name == vm_name) {
            return Ok(Diagnosis::VmExists {
                vm: vm_name.to_string(),
                resource_group: resource_group.to_string(),
            });
        }

        // Any NIC with the exact name counts, same as the VM check.
        let nics = self.plane.list_network_interfaces(resource_group).await?;
        debug!(resource_group, count = nics.len(), "listed network interfaces");
        if nics.iter().any(|name| name == nic_name) {
            return Ok(Diagnosis::NicExists {
                nic: nic_name.to_string(),
                resource_group: resource_group.to_string(),
            });
        }

        Ok(Diagnosis::Undetermined)
    }
}
