//! Health sync bookkeeping.
//!
//! The health collaborator is asked for the energy burned since the last
//! watermark and answers with a non-negative delta plus a new watermark.
//! This module decides where that window starts and applies the answer.

use calpet_types::{Calendar, PetState};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::LedgerError;
use crate::wallet::deposit_pending;

/// The health collaborator's answer to one sync request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Energy (active + basal) burned inside the sync window.
    pub delta_energy: u64,
    /// End of the window that was summed.
    pub new_watermark: DateTime<Utc>,
}

impl SyncReport {
    /// A report that found nothing, used when health data is unavailable.
    pub const fn empty(at: DateTime<Utc>) -> Self {
        Self {
            delta_energy: 0,
            new_watermark: at,
        }
    }
}

/// What applying a [`SyncReport`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncApplied {
    /// Energy credited to pending by this sync.
    pub deposited: u64,
    /// Pending balance afterwards.
    pub pending_after: u64,
    /// Watermark stored afterwards.
    pub watermark: DateTime<Utc>,
}

/// Start of the next sync window.
///
/// The window starts at the stored watermark, but never before the start of
/// the calendar day containing `now`: energy burned on previous days is not
/// credited retroactively after a long absence.
pub fn sync_window_start(
    last_synced_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> DateTime<Utc> {
    let day_start = calendar.start_of_day(now);
    last_synced_at.map_or(day_start, |last| last.max(day_start))
}

/// Credit a sync report to pending and advance the watermark.
///
/// The watermark is a high-water mark: a report whose watermark is older than
/// the stored one never moves it backwards.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if pending would overflow. The state is
/// unchanged in that case.
pub fn apply_sync(state: &mut PetState, report: SyncReport) -> Result<SyncApplied, LedgerError> {
    let pending_after = deposit_pending(state, report.delta_energy)?;
    let watermark = state
        .last_synced_at
        .map_or(report.new_watermark, |last| last.max(report.new_watermark));
    state.last_synced_at = Some(watermark);
    debug!(
        deposited = report.delta_energy,
        pending_after,
        %watermark,
        "Health sync applied"
    );
    Ok(SyncApplied {
        deposited: report.delta_energy,
        pending_after,
        watermark,
    })
}
