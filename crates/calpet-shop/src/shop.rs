//! The daily food shop.
//!
//! Each calendar day the shop draws a line-up of distinct catalog foods,
//! each with a stock of one. The line-up is kept for the whole day; the
//! player may reroll it a limited number of times.

use calpet_care::inventory::add_food;
use calpet_types::{Calendar, FOOD_CATALOG, FoodId, PetState, ShopItem, food_by_id};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::config::ShopConfig;
use crate::error::ShopError;

/// Receipt for a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// The food bought.
    pub item: FoodId,
    /// Its display name.
    pub name: String,
    /// Energy paid.
    pub price: u64,
    /// Wallet balance after paying.
    pub wallet_after: u64,
    /// Units of this food owned after the purchase.
    pub owned_after: u32,
}

/// Draw `slots` distinct catalog foods in random order, each with stock 1.
///
/// Asking for more slots than the catalog holds returns the whole catalog.
pub fn draw_items(slots: u32, rng: &mut impl Rng) -> Vec<ShopItem> {
    let pool_len = FOOD_CATALOG.len();
    let count = usize::try_from(slots).unwrap_or(pool_len).min(pool_len);

    // Fisher-Yates partial shuffle over catalog indices.
    let mut indices: Vec<usize> = (0..pool_len).collect();
    for i in 0..count {
        let j = rng.random_range(i..pool_len);
        indices.swap(i, j);
    }

    indices
        .iter()
        .take(count)
        .filter_map(|&idx| FOOD_CATALOG.get(idx))
        .map(|entry| ShopItem {
            id: FoodId::from(entry.id),
            name: String::from(entry.name),
            price: entry.price_energy,
            stock: 1,
        })
        .collect()
}

/// Make sure today's line-up exists. Returns `true` if a draw happened.
///
/// On a new calendar day the line-up is redrawn and the reroll counter
/// reset. On the same day a missing line-up (first launch, or a record whose
/// line-up could not be decoded) is drawn once.
pub fn ensure_daily_shop(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &ShopConfig,
    rng: &mut impl Rng,
) -> bool {
    let today = calendar.day_key(now);
    if state.shop_day_key != today {
        state.shop_items = Some(draw_items(config.daily_slots, rng));
        state.shop_rerolls_today = 0;
        info!(day = %today, "Daily shop restocked");
        state.shop_day_key = today;
        return true;
    }
    if state.shop_items.is_none() {
        state.shop_items = Some(draw_items(config.daily_slots, rng));
        debug!(day = %today, "Missing shop line-up drawn");
        return true;
    }
    false
}

/// Buy one unit of `item` from today's line-up.
///
/// The line-up is brought up to date first. Checks run in order: listed,
/// in stock, affordable, known to the catalog. On success the price leaves
/// the wallet, one unit enters the inventory, and the line becomes sold out.
///
/// # Errors
///
/// [`ShopError::ItemNotListed`], [`ShopError::SoldOut`],
/// [`ShopError::InsufficientEnergy`], or [`ShopError::UnknownFood`]. The
/// state is unchanged apart from a line-up draw.
pub fn buy_food(
    state: &mut PetState,
    item: &FoodId,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &ShopConfig,
    rng: &mut impl Rng,
) -> Result<Purchase, ShopError> {
    let _ = ensure_daily_shop(state, now, calendar, config, rng);

    let (listed, price, stock) = state
        .shop_items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .find(|(_, line)| line.id == *item)
        .map(|(idx, line)| (idx, line.price, line.stock))
        .ok_or_else(|| ShopError::ItemNotListed { item: item.clone() })?;

    if stock == 0 {
        return Err(ShopError::SoldOut { item: item.clone() });
    }
    if !calpet_ledger::can_afford(state, price) {
        return Err(ShopError::InsufficientEnergy {
            item: item.clone(),
            price,
            available: state.wallet_energy,
        });
    }
    let entry = food_by_id(item.as_str()).ok_or_else(|| ShopError::UnknownFood { item: item.clone() })?;

    let wallet_before = state.wallet_energy;
    let wallet_after = calpet_ledger::spend(state, price)?;
    let owned_after = match add_food(state, item, 1) {
        Ok(count) => count,
        Err(err) => {
            state.wallet_energy = wallet_before;
            return Err(err.into());
        }
    };
    if let Some(line) = state.shop_items.as_mut().and_then(|items| items.get_mut(listed)) {
        line.stock = 0;
    }

    info!(item = %item, price, wallet_after, "Food purchased");
    Ok(Purchase {
        item: item.clone(),
        name: String::from(entry.name),
        price,
        wallet_after,
        owned_after,
    })
}

/// Replace today's line-up with a fresh draw. Returns rerolls used today.
///
/// # Errors
///
/// Returns [`ShopError::RerollCapReached`] once the daily cap is used.
pub fn reroll_shop(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &ShopConfig,
    rng: &mut impl Rng,
) -> Result<u32, ShopError> {
    let _ = ensure_daily_shop(state, now, calendar, config, rng);

    let used = state.shop_rerolls_today;
    if used >= config.reroll_daily_cap {
        return Err(ShopError::RerollCapReached {
            used,
            cap: config.reroll_daily_cap,
        });
    }
    let used = used.saturating_add(1);
    state.shop_rerolls_today = used;
    state.shop_items = Some(draw_items(config.daily_slots, rng));
    info!(used, cap = config.reroll_daily_cap, "Shop rerolled");
    Ok(used)
}
