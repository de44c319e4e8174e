//! Running steps whose failure must not abort the run.

use std::fmt::Display;

/// Run `op`, returning its value, or `None` if it failed.
///
/// The failure is logged under `step` and otherwise discarded, so the caller
/// moves on to the next step with an empty result.
pub fn best_effort<T, E, F>(step: &str, op: F) -> Option<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(step, error = %e, "best-effort step failed");
            None
        }
    }
}
