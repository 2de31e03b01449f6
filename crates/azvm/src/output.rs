use std::io::{self, Write};

use azvm_infra::types::ProvisioningResult;

/// Print one result to stdout in the tab-indented layout.
pub fn print_result(result: &ProvisioningResult) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_result(&mut out, result) {
        tracing::warn!(error = %e, "failed to print result");
    }
}

pub fn write_result(out: &mut impl Write, result: &ProvisioningResult) -> io::Result<()> {
    writeln!(out, "\tName: {}", result.name)?;
    writeln!(out, "\tId: {}", result.id)?;
    if let Some(location) = &result.location {
        writeln!(out, "\tLocation: {location}")?;
    }
    if let Some(state) = &result.provisioning_state {
        writeln!(out, "\tProperties:")?;
        writeln!(out, "\t\tProvisioning State: {state}")?;
    }
    writeln!(out, "\n\n")?;
    out.flush()
}
