//! Two-bucket energy currency ledger for Cal Pet.
//!
//! Energy (kcal) burned by the player is the in-game currency. It flows
//! through two buckets on [`PetState`](calpet_types::PetState):
//!
//! - **pending** -- credited by health sync, not yet spendable.
//! - **wallet** -- settled, spendable currency.
//!
//! Moving pending into the wallet is an explicit, idempotent step so that the
//! host decides when newly earned energy becomes visible and spendable.
//!
//! # Modules
//!
//! - [`wallet`] -- Deposits, drains, and spends.
//! - [`sync`] -- Sync window clamping and applying a health sync report.
//! - [`cache`] -- Zero-protected cache of today's steps and energy.
//! - [`progress`] -- Raw progress ratio toward the daily energy goal.
//!
//! # Conservation
//!
//! Energy only enters through [`wallet::deposit_pending`] and only leaves
//! through [`wallet::spend`]. Every operation uses checked arithmetic and
//! leaves the state untouched when it fails, so the wallet can never go
//! negative and no energy is created by an overflow.

pub mod cache;
pub mod progress;
pub mod sync;
pub mod wallet;

// Re-export primary types at crate root.
pub use cache::{TodayReading, reset_today_cache, update_today_cache};
pub use progress::goal_progress;
pub use sync::{SyncApplied, SyncReport, apply_sync, sync_window_start};
pub use wallet::{can_afford, deposit_pending, drain_pending_to_wallet, spend};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when moving energy through the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Spend amounts must be strictly positive.
    #[error("spend amount must be non-zero")]
    ZeroAmount,

    /// The wallet does not hold enough settled energy.
    #[error("not enough energy: need {requested} kcal but the wallet holds {available} kcal")]
    InsufficientFunds {
        /// The amount the caller tried to spend.
        requested: u64,
        /// The wallet balance at the time of the attempt.
        available: u64,
    },

    /// A balance would overflow `u64`.
    #[error("energy balance overflow: {context}")]
    Overflow {
        /// Which balance was being updated.
        context: &'static str,
    },
}
