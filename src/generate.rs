//! Fresh identifier and secret generation.
//!
//! Provisioning needs a steady supply of names that are unique and, for
//! credentials, unguessable: deployment names, server names, administrator
//! logins and passwords, and database names. Every generator here draws
//! fresh values on each call; re-running a resolution step therefore
//! regenerates all downstream identifiers together.

use rand::Rng;
use uuid::Uuid;

/// Length of generated identifiers (logins, database names).
const IDENTIFIER_LENGTH: usize = 10;

/// Length of generated passwords.
const PASSWORD_LENGTH: usize = 16;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Generates a fresh deployment name.
#[must_use]
pub fn new_deployment_name() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a fresh server name.
#[must_use]
pub fn new_server_name() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a fresh lowercase alphanumeric identifier.
///
/// Identifiers always begin with a letter so they are valid as logins and
/// database names.
#[must_use]
pub fn new_identifier() -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(IDENTIFIER_LENGTH);
    out.push(char::from(LOWER[rng.gen_range(0..LOWER.len())]));
    for _ in 1..IDENTIFIER_LENGTH {
        let alphabet = if rng.gen_bool(0.5) { LOWER } else { DIGITS };
        out.push(char::from(alphabet[rng.gen_range(0..alphabet.len())]));
    }
    out
}

/// Generates a fresh password containing upper, lower, and digit classes.
#[must_use]
pub fn new_password() -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(PASSWORD_LENGTH);
    // One guaranteed character from each class, then a random mix.
    out.push(char::from(UPPER[rng.gen_range(0..UPPER.len())]));
    out.push(char::from(LOWER[rng.gen_range(0..LOWER.len())]));
    out.push(char::from(DIGITS[rng.gen_range(0..DIGITS.len())]));
    for _ in 3..PASSWORD_LENGTH {
        let alphabet = match rng.gen_range(0..3) {
            0 => UPPER,
            1 => LOWER,
            _ => DIGITS,
        };
        out.push(char::from(alphabet[rng.gen_range(0..alphabet.len())]));
    }
    out
}
