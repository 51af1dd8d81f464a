//! Owned food counts.
//!
//! The inventory maps food ids to positive counts. A count that reaches zero
//! is removed rather than stored, so an empty inventory is an empty map.

use calpet_types::{FoodId, PetState};
use tracing::debug;

use crate::error::CareError;

/// Units of `id` owned.
pub fn food_count(state: &PetState, id: &FoodId) -> u32 {
    state.owned_food_counts.get(id).copied().unwrap_or(0)
}

/// Add `count` units of `id`. Returns the new count.
///
/// # Errors
///
/// - [`CareError::ZeroCount`] if `count` is 0.
/// - [`CareError::ArithmeticOverflow`] if the count would overflow.
pub fn add_food(state: &mut PetState, id: &FoodId, count: u32) -> Result<u32, CareError> {
    if count == 0 {
        return Err(CareError::ZeroCount);
    }
    let next = food_count(state, id)
        .checked_add(count)
        .ok_or_else(|| CareError::ArithmeticOverflow {
            context: format!("food count for {id}"),
        })?;
    state.owned_food_counts.insert(id.clone(), next);
    debug!(food = %id, count = next, "Food added");
    Ok(next)
}

/// Remove `count` units of `id`. Returns the count left.
///
/// # Errors
///
/// - [`CareError::ZeroCount`] if `count` is 0.
/// - [`CareError::InsufficientFood`] if fewer than `count` are owned. The
///   inventory is unchanged.
pub fn consume_food(state: &mut PetState, id: &FoodId, count: u32) -> Result<u32, CareError> {
    if count == 0 {
        return Err(CareError::ZeroCount);
    }
    let available = food_count(state, id);
    let left = available
        .checked_sub(count)
        .ok_or_else(|| CareError::InsufficientFood {
            food: id.clone(),
            requested: count,
            available,
        })?;
    if left == 0 {
        state.owned_food_counts.remove(id);
    } else {
        state.owned_food_counts.insert(id.clone(), left);
    }
    debug!(food = %id, left, "Food consumed");
    Ok(left)
}

/// The first id in `order` that has a positive count.
///
/// Used to preselect a food on the feeding shelf.
pub fn first_owned_food<'a>(
    state: &PetState,
    order: impl IntoIterator<Item = &'a str>,
) -> Option<FoodId> {
    order
        .into_iter()
        .map(FoodId::from)
        .find(|id| food_count(state, id) > 0)
}
