//! Secret redaction for export/display paths
//!
//! Produces a masked copy of a configuration; the stored value is never
//! touched. Applied only when the caller asks for a redacted export.

use crate::config::schema::Config;
use crate::config::secret::{secret_string, SecretString};
use secrecy::ExposeSecret;

/// The mask token substituted for non-empty secret fields.
pub const MASK: &str = "***";

/// Returns a deep copy of `cfg` with every known secret field masked.
///
/// Empty fields stay empty so a redacted export still shows which
/// credentials are configured at all.
pub fn redact(cfg: &Config) -> Config {
    let mut out = cfg.clone();
    let creds = &mut out.storage.s3.credentials;
    mask(&mut creds.access_key_id);
    mask(&mut creds.secret_access_key);
    mask(&mut creds.vault.secret);
    mask(&mut creds.vault.token);
    out
}

fn mask(field: &mut SecretString) {
    if !field.expose_secret().is_empty() {
        *field = secret_string(MASK.to_string());
    }
}
