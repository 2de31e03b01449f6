//! Admin password policy for Linux VMs.

use crate::{Error, Result};

pub const MIN_LEN: usize = 12;
pub const MAX_LEN: usize = 123;

/// Shown before prompting for a password.
pub const REQUIREMENTS: &str = "\
The supplied password must be between 12-123 characters long and must satisfy all of password complexity requirements from the following:
    1) Contains an uppercase character
    2) Contains a lowercase character
    3) Contains a numeric digit
    4) Contains a special character
    5) Control characters are not allowed";

/// Length in characters within `MIN_LEN..=MAX_LEN`, plus at least one
/// uppercase letter, lowercase letter, digit and special character.
/// A special character is anything that is not an ASCII letter, ASCII
/// digit or whitespace.
pub fn is_valid(password: &str) -> bool {
    let len = password.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return false;
    }

    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());

    upper && lower && digit && special
}

pub fn check(password: &str) -> Result<()> {
    if is_valid(password) {
        Ok(())
    } else {
        Err(Error::PasswordPolicy)
    }
}
