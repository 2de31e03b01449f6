use std::io;

use azvm_infra::password;

use crate::error::{CliError, Result};

/// Where interactive password entries come from.
pub trait PasswordSource {
    fn read_password(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from the controlling terminal without echo.
pub struct Terminal;

impl PasswordSource for Terminal {
    fn read_password(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

/// Use `given`, or ask twice and require both entries to match.
///
/// The policy check is left to the caller.
pub fn resolve_password(given: Option<String>, source: &mut impl PasswordSource) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    let first = source.read_password(&format!(
        "\n{}\nEnter admin password: ",
        password::REQUIREMENTS
    ))?;
    let confirm = source.read_password("Confirm password: ")?;

    if first != confirm {
        return Err(CliError::Infra(azvm_infra::Error::PasswordMismatch));
    }
    Ok(first)
}
