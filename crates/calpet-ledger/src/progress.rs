//! Progress toward the daily energy goal.

/// Raw ratio of today's energy to the daily goal.
///
/// Returns 0.0 when no goal is set. Values above 1.0 mean the goal was
/// lapped; the progress ring draws the fractional part as the current lap.
#[allow(clippy::cast_precision_loss)] // kcal totals are far below 2^52
pub fn goal_progress(today_energy: u64, goal_energy: u64) -> f64 {
    if goal_energy == 0 {
        return 0.0;
    }
    today_energy as f64 / goal_energy as f64
}
