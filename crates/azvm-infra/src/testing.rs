//! In-memory `ControlPlane` that records every call.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use azure_api::{
    NetworkInterface, PublicIpAddress, ResourceGroup, Subnet, VirtualMachine, VirtualNetwork,
};
use serde::Serialize;

use crate::types::{ProvisioningRequest, ProvisioningResult, ResourceKind};
use crate::{ControlPlane, Error, Result};

const SUBSCRIPTION: &str = "/subscriptions/00000000-0000-0000-0000-000000000000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    Create(ResourceKind),
    ListVms,
    ListNics,
}

#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub op: Op,
    pub name: String,
    pub payload: serde_json::Value,
}

#[derive(Default)]
struct State {
    groups: HashMap<String, String>,
    vms: Vec<String>,
    nics: Vec<String>,
    calls: Vec<Call>,
    failures: HashMap<ResourceKind, VecDeque<Error>>,
    blank_ids: Vec<ResourceKind>,
}

#[derive(Default)]
pub(crate) struct FakeControlPlane {
    state: Mutex<State>,
}

pub(crate) fn request() -> ProvisioningRequest {
    ProvisioningRequest {
        resource_group: "rg1".into(),
        name: "vm1".into(),
        region: "eastus".into(),
        size: "Standard_D4s_v3".into(),
        admin_username: "azureadmin".into(),
        admin_password: "GoodPassw0rd!".into(),
    }
}

impl FakeControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(self, name: &str, location: &str) -> Self {
        self.lock().groups.insert(name.into(), location.into());
        self
    }

    pub fn with_vm(self, name: &str) -> Self {
        self.lock().vms.push(name.into());
        self
    }

    pub fn with_nic(self, name: &str) -> Self {
        self.lock().nics.push(name.into());
        self
    }

    /// The next create of `kind` fails with `err`.
    pub fn fail_next(self, kind: ResourceKind, err: Error) -> Self {
        self.lock().failures.entry(kind).or_default().push_back(err);
        self
    }

    /// Creates of `kind` succeed but report an empty id.
    pub fn blank_id(self, kind: ResourceKind) -> Self {
        self.lock().blank_ids.push(kind);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn created(&self) -> Vec<ResourceKind> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c.op {
                Op::Create(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    /// Payload of the most recent create of `kind`.
    pub fn payload(&self, kind: ResourceKind) -> serde_json::Value {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.op == Op::Create(kind))
            .map(|c| c.payload)
            .unwrap_or(serde_json::Value::Null)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn record(&self, op: Op, name: &str, payload: &impl Serialize) {
        self.lock().calls.push(Call {
            op,
            name: name.into(),
            payload: serde_json::to_value(payload).unwrap(),
        });
    }

    fn create(
        &self,
        kind: ResourceKind,
        resource_group: &str,
        path: String,
        name: &str,
        location: Option<&str>,
        payload: &impl Serialize,
    ) -> Result<ProvisioningResult> {
        self.record(Op::Create(kind), name, payload);

        let mut state = self.lock();
        if let Some(err) = state.failures.get_mut(&kind).and_then(VecDeque::pop_front) {
            return Err(err);
        }
        if kind != ResourceKind::ResourceGroup && !state.groups.contains_key(resource_group) {
            return Err(Error::ResourceGroupNotFound(resource_group.into()));
        }

        match kind {
            ResourceKind::VirtualMachine => {
                if state.vms.iter().any(|vm| vm == name) {
                    return Err(Error::Conflict {
                        operation: "create virtual machine",
                        message: format!("virtual machine '{name}' already exists"),
                    });
                }
                state.vms.push(name.into());
            }
            ResourceKind::NetworkInterface => {
                if !state.nics.iter().any(|nic| nic == name) {
                    state.nics.push(name.into());
                }
            }
            _ => {}
        }

        let id = if state.blank_ids.contains(&kind) {
            String::new()
        } else {
            format!("{SUBSCRIPTION}/resourceGroups/{resource_group}{path}")
        };

        Ok(ProvisioningResult {
            kind,
            name: name.into(),
            id,
            location: location.map(str::to_string),
            provisioning_state: Some("Succeeded".into()),
        })
    }
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    async fn create_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ProvisioningResult> {
        let location = group.location.clone().unwrap_or_default();
        let result = self.create(
            ResourceKind::ResourceGroup,
            name,
            String::new(),
            name,
            Some(&location),
            group,
        )?;
        self.lock().groups.entry(name.into()).or_insert(location);
        Ok(result)
    }

    async fn create_virtual_network(
        &self,
        resource_group: &str,
        name: &str,
        vnet: &VirtualNetwork,
    ) -> Result<ProvisioningResult> {
        self.create(
            ResourceKind::VirtualNetwork,
            resource_group,
            format!("/providers/Microsoft.Network/virtualNetworks/{name}"),
            name,
            vnet.location.as_deref(),
            vnet,
        )
    }

    async fn create_subnet(
        &self,
        resource_group: &str,
        vnet: &str,
        name: &str,
        subnet: &Subnet,
    ) -> Result<ProvisioningResult> {
        self.create(
            ResourceKind::Subnet,
            resource_group,
            format!("/providers/Microsoft.Network/virtualNetworks/{vnet}/subnets/{name}"),
            name,
            None,
            subnet,
        )
    }

    async fn create_public_ip(
        &self,
        resource_group: &str,
        name: &str,
        ip: &PublicIpAddress,
    ) -> Result<ProvisioningResult> {
        self.create(
            ResourceKind::PublicIp,
            resource_group,
            format!("/providers/Microsoft.Network/publicIPAddresses/{name}"),
            name,
            ip.location.as_deref(),
            ip,
        )
    }

    async fn create_network_interface(
        &self,
        resource_group: &str,
        name: &str,
        nic: &NetworkInterface,
    ) -> Result<ProvisioningResult> {
        self.create(
            ResourceKind::NetworkInterface,
            resource_group,
            format!("/providers/Microsoft.Network/networkInterfaces/{name}"),
            name,
            nic.location.as_deref(),
            nic,
        )
    }

    async fn create_virtual_machine(
        &self,
        resource_group: &str,
        name: &str,
        vm: &VirtualMachine,
    ) -> Result<ProvisioningResult> {
        self.create(
            ResourceKind::VirtualMachine,
            resource_group,
            format!("/providers/Microsoft.Compute/virtualMachines/{name}"),
            name,
            vm.location.as_deref(),
            vm,
        )
    }

    async fn list_virtual_machines(&self, resource_group: &str) -> Result<Vec<String>> {
        self.record(Op::ListVms, resource_group, &());
        Ok(self.lock().vms.clone())
    }

    async fn list_network_interfaces(&self, resource_group: &str) -> Result<Vec<String>> {
        self.record(Op::ListNics, resource_group, &());
        Ok(self.lock().nics.clone())
    }
}
