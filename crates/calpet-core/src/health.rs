//! Health collaborator trait and in-memory implementations.
//!
//! The engine never reads a health database directly. It asks a
//! [`HealthSource`] for the energy burned since a watermark and for today's
//! totals. A platform host implements the trait over its health store; the
//! implementations here serve tests and the headless simulation.
//!
//! Energy is always active plus basal energy, in whole kcal.

use calpet_ledger::SyncReport;
use chrono::{DateTime, Utc};

/// Errors a health collaborator can report. The pet store treats every one
/// of them as "no new data".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HealthError {
    /// The player has not granted access to health data.
    #[error("health data access not authorized")]
    Unauthorized,

    /// The health store could not be queried.
    #[error("health data unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Today's totals as reported by the collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthTotals {
    /// Steps walked.
    pub steps: u64,
    /// Active plus basal energy burned.
    pub energy: u64,
}

/// A source of health data.
pub trait HealthSource {
    /// Energy burned in `(since, now]` and the watermark to store next.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError`] when data cannot be read.
    fn sync_delta(&self, since: DateTime<Utc>, now: DateTime<Utc>) -> Result<SyncReport, HealthError>;

    /// Steps and energy in `[day_start, now]`.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError`] when data cannot be read.
    fn today_totals(&self, day_start: DateTime<Utc>, now: DateTime<Utc>) -> Result<HealthTotals, HealthError>;
}

/// One recorded health sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSample {
    /// End of the sampled interval.
    pub at: DateTime<Utc>,
    /// Active energy in kcal.
    pub active_energy: u64,
    /// Basal energy in kcal.
    pub basal_energy: u64,
    /// Steps walked.
    pub steps: u64,
}

impl HealthSample {
    /// Active plus basal energy, saturating.
    pub const fn energy(&self) -> u64 {
        self.active_energy.saturating_add(self.basal_energy)
    }
}

/// A health source over an in-memory list of samples.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHealthSource {
    /// Recorded samples in any order.
    samples: Vec<HealthSample>,
    /// When `false`, every query fails with [`HealthError::Unauthorized`].
    authorized: bool,
}

impl ScriptedHealthSource {
    /// An authorized source over `samples`.
    pub const fn new(samples: Vec<HealthSample>) -> Self {
        Self {
            samples,
            authorized: true,
        }
    }

    /// A source whose queries are all refused.
    pub const fn unauthorized() -> Self {
        Self {
            samples: Vec::new(),
            authorized: false,
        }
    }

    /// Record another sample.
    pub fn push(&mut self, sample: HealthSample) {
        self.samples.push(sample);
    }

    /// Recorded samples.
    pub fn samples(&self) -> &[HealthSample] {
        &self.samples
    }

    const fn check_authorized(&self) -> Result<(), HealthError> {
        if self.authorized {
            Ok(())
        } else {
            Err(HealthError::Unauthorized)
        }
    }
}

impl HealthSource for ScriptedHealthSource {
    fn sync_delta(&self, since: DateTime<Utc>, now: DateTime<Utc>) -> Result<SyncReport, HealthError> {
        self.check_authorized()?;
        let delta_energy = self
            .samples
            .iter()
            .filter(|s| s.at > since && s.at <= now)
            .fold(0_u64, |acc, s| acc.saturating_add(s.energy()));
        Ok(SyncReport {
            delta_energy,
            new_watermark: now,
        })
    }

    fn today_totals(&self, day_start: DateTime<Utc>, now: DateTime<Utc>) -> Result<HealthTotals, HealthError> {
        self.check_authorized()?;
        Ok(self
            .samples
            .iter()
            .filter(|s| s.at >= day_start && s.at <= now)
            .fold(HealthTotals::default(), |acc, s| HealthTotals {
                steps: acc.steps.saturating_add(s.steps),
                energy: acc.energy.saturating_add(s.energy()),
            }))
    }
}

/// A health source for hosts without health data. Always reports zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableHealthSource;

impl UnavailableHealthSource {
    /// Create a new zero-reporting source.
    pub const fn new() -> Self {
        Self
    }
}

impl HealthSource for UnavailableHealthSource {
    fn sync_delta(&self, _since: DateTime<Utc>, now: DateTime<Utc>) -> Result<SyncReport, HealthError> {
        Ok(SyncReport::empty(now))
    }

    fn today_totals(&self, _day_start: DateTime<Utc>, _now: DateTime<Utc>) -> Result<HealthTotals, HealthError> {
        Ok(HealthTotals::default())
    }
}
