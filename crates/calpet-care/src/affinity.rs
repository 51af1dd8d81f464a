//! Affinity meter and reward cards.
//!
//! Care actions fill a meter of `max` points. Whenever the meter reaches
//! `max` it wraps: each full `max` becomes one reward card and the remainder
//! stays on the meter. Cards are later spent on eggs.

use calpet_types::PetState;
use tracing::{debug, info};

use crate::error::CareError;

/// What an affinity gain did to the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffinityGain {
    /// Meter value before the gain.
    pub before: u32,
    /// Meter value after the gain and any wrap.
    pub after: u32,
    /// Reward cards produced by this gain.
    pub cards_gained: u32,
    /// Whether the meter wrapped at least once.
    pub did_wrap: bool,
    /// Whether this gain crossed the top of the meter.
    pub did_reach_max: bool,
}

/// Add `points` to the meter, converting every full meter into a card.
///
/// Conservation: `before + points == after + cards_gained * max`. A `max` of
/// zero is treated as one.
///
/// # Errors
///
/// Returns [`CareError::ArithmeticOverflow`] if the point total or card count
/// would overflow. The state is unchanged in that case.
pub fn add_affinity(state: &mut PetState, points: u32, max: u32) -> Result<AffinityGain, CareError> {
    let max = max.max(1);
    let before = state.affinity_point;
    let total = before
        .checked_add(points)
        .ok_or_else(|| CareError::ArithmeticOverflow {
            context: String::from("affinity point total"),
        })?;
    let did_reach_max = before < max && total >= max;

    if total < max {
        state.affinity_point = total;
        return Ok(AffinityGain {
            before,
            after: total,
            cards_gained: 0,
            did_wrap: false,
            did_reach_max,
        });
    }

    let cards_gained = total.checked_div(max).unwrap_or(0);
    let after = total.checked_rem(max).unwrap_or(0);
    let cards = state
        .affinity_card_count
        .checked_add(cards_gained)
        .ok_or_else(|| CareError::ArithmeticOverflow {
            context: String::from("affinity card count"),
        })?;

    state.affinity_point = after;
    state.affinity_card_count = cards;
    info!(cards_gained, cards, "Affinity meter wrapped into reward cards");
    Ok(AffinityGain {
        before,
        after,
        cards_gained,
        did_wrap: true,
        did_reach_max,
    })
}

/// Spend one reward card. Returns the cards left.
///
/// # Errors
///
/// Returns [`CareError::NoAffinityCards`] when none are held.
pub fn spend_affinity_card(state: &mut PetState) -> Result<u32, CareError> {
    let left = state
        .affinity_card_count
        .checked_sub(1)
        .ok_or(CareError::NoAffinityCards)?;
    state.affinity_card_count = left;
    debug!(left, "Affinity card spent");
    Ok(left)
}
