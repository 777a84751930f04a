//! Session ID generation.

use chrono::Utc;
use rand::RngCore;
use rand::rngs::OsRng;

/// Prefix shared by every generated session ID.
pub const SESSION_ID_PREFIX: &str = "SAVE-";

/// Random bytes per ID; 4 bytes render as 8 hex characters.
const ID_BYTES: usize = 4;

/// Generates a fresh, non-predictable session ID such as `SAVE-3fa91c07`.
///
/// Uses the operating system's secure random source. If that source fails,
/// the current time in nanoseconds is used instead (`SAVE-<nanos>`), which is
/// still unlikely to collide but not unpredictable.
pub fn generate_id() -> String {
    generate_id_with(&mut OsRng)
}

/// Generates an ID from the given random source, with the time fallback.
pub fn generate_id_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0_u8; ID_BYTES];
    match rng.try_fill_bytes(&mut bytes) {
        Ok(()) => {
            let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
            format!("{SESSION_ID_PREFIX}{hex}")
        }
        Err(err) => {
            tracing::warn!(error = %err, "Secure random source failed, using time-based session ID");
            let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
            format!("{SESSION_ID_PREFIX}{nanos}")
        }
    }
}
