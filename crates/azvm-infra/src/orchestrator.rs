//! The provisioning pipeline and its one-shot recovery.
//!
//! vnet → subnet → public IP → NIC → VM, each step waiting for its remote
//! operation. A missing resource group is created once and the pipeline
//! rerun from the top; an ambiguous conflict is diagnosed instead of retried;
//! anything else is returned as is.

use std::sync::Arc;

use tracing::{info, warn};

use crate::diagnose::{ConflictDiagnoser, Diagnosis};
use crate::group::ResourceGroupEnsurer;
use crate::network::NetworkStackBuilder;
use crate::password;
use crate::types::{ProvisioningRequest, ProvisioningResult};
use crate::vm::VmProvisioner;
use crate::{ControlPlane, Error, ErrorKind, Result};

/// How a provisioning run ended, short of a fatal error.
#[derive(Debug)]
pub enum Outcome {
    /// vnet, subnet, public IP, NIC and VM, in that order.
    Provisioned(Vec<ProvisioningResult>),
    /// A create was rejected by an existing resource.
    Conflict { diagnostic: String },
}

enum State {
    Running,
    RecoveringGroup,
    Diagnosing(Error),
    Done(Vec<ProvisioningResult>),
    Fatal(Error),
}

pub struct ProvisioningOrchestrator {
    groups: ResourceGroupEnsurer,
    network: NetworkStackBuilder,
    vms: VmProvisioner,
    diagnoser: ConflictDiagnoser,
}

impl ProvisioningOrchestrator {
    pub fn new(plane: Arc<dyn ControlPlane>) -> Self {
        Self {
            groups: ResourceGroupEnsurer::new(plane.clone()),
            network: NetworkStackBuilder::new(plane.clone()),
            vms: VmProvisioner::new(plane.clone()),
            diagnoser: ConflictDiagnoser::new(plane),
        }
    }

    /// Provision everything `request` describes.
    ///
    /// `on_result` sees every created resource as soon as it exists,
    /// including the resource group when it had to be created.
    pub async fn provision<F>(
        &self,
        request: &ProvisioningRequest,
        mut on_result: F,
    ) -> Result<Outcome>
    where
        F: FnMut(&ProvisioningResult),
    {
        password::check(&request.admin_password)?;

        let mut recovered = false;
        let mut state = State::Running;

        loop {
            state = match state {
                State::Running => match self.run_pipeline(request, &mut on_result).await {
                    Ok(results) => State::Done(results),
                    Err(e) => match e.kind() {
                        ErrorKind::ResourceGroupNotFound if !recovered => State::RecoveringGroup,
                        ErrorKind::AmbiguousConflict => State::Diagnosing(e),
                        _ => State::Fatal(e),
                    },
                },
                State::RecoveringGroup => {
                    recovered = true;
                    warn!(
                        resource_group = %request.resource_group,
                        region = %request.region,
                        "resource group missing, creating it and retrying"
                    );
                    match self
                        .groups
                        .ensure(&request.resource_group, &request.region)
                        .await
                    {
                        Ok(group) => {
                            on_result(&group);
                            State::Running
                        }
                        Err(e) => State::Fatal(e),
                    }
                }
                State::Diagnosing(cause) => {
                    let names = request.names();
                    let diagnosis = self
                        .diagnoser
                        .diagnose(
                            &request.resource_group,
                            &names.virtual_machine,
                            &names.network_interface,
                        )
                        .await?;

                    let diagnostic = match diagnosis {
                        Diagnosis::Undetermined => cause.to_string(),
                        found => found.to_string(),
                    };
                    warn!(%cause, %diagnostic, "provisioning stopped on conflict");
                    return Ok(Outcome::Conflict { diagnostic });
                }
                State::Done(results) => {
                    info!(vm = %request.name, resources = results.len(), "provisioning complete");
                    return Ok(Outcome::Provisioned(results));
                }
                State::Fatal(e) => return Err(e),
            };
        }
    }

    async fn run_pipeline<F>(
        &self,
        request: &ProvisioningRequest,
        on_result: &mut F,
    ) -> Result<Vec<ProvisioningResult>>
    where
        F: FnMut(&ProvisioningResult),
    {
        let stack = self.network.build(request, on_result).await?;
        let vm = self.vms.create_vm(request, &stack.network_interface).await?;
        on_result(&vm);

        let mut results = Vec::from(stack.into_results());
        results.push(vm);
        Ok(results)
    }
}
