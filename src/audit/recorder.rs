//! Audit recorder.
//!
//! A single emitting point replaces per-branch inline log construction.
//! Audit writes are best-effort: a bookkeeping failure must not mask the
//! outcome of the request that triggered it, so insert errors are logged
//! and swallowed here.

use log::error;

use crate::audit::models::AuditOutcome;
use crate::db::AppState;

/// Append one log entry for a terminal pipeline branch.
pub async fn record(state: &AppState, outcome: AuditOutcome) {
    let entry = outcome.into_log_entry();
    if let Err(e) = state.insert_log(&entry).await {
        error!(
            "Failed to write audit log ({} {} '{}'): {}",
            entry.method, entry.status, entry.log_description, e
        );
    }
}

/// Append the log entry plus the failed-generation record that every
/// failure branch of the generation pipeline produces.
pub async fn record_generation_failure(state: &AppState, outcome: AuditOutcome) {
    let failed = outcome.clone().into_failed_generation();
    record(state, outcome).await;

    if let Err(e) = state.insert_failed_generation(&failed).await {
        error!(
            "Failed to write failed-generation record (refNumber '{}'): {}",
            failed.ref_number, e
        );
    }
}
