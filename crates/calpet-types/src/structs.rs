//! The persisted [`PetState`] aggregate and the records embedded in it.
//!
//! `PetState` holds every field the care and economy rules read or write.
//! There is exactly one instance per install: it is created lazily on first
//! launch, mutated by every action, and never deleted. Only its day-scoped
//! fields are reset in place when the calendar day changes.
//!
//! Nested collections (shop line-up, food inventory, owned pets) are typed
//! fields here. Encoding them as embedded blobs is the persistence layer's
//! concern, not the rules'.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::catalog::STARTER_PET_ID;
use crate::ids::{DayKey, FoodId, PetId};

/// Initial satisfaction of a freshly created pet (the maximum).
const INITIAL_SATISFACTION: u32 = 3;

// ---------------------------------------------------------------------------
// Embedded records
// ---------------------------------------------------------------------------

/// One line of the daily shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    /// Catalog id of the food on offer.
    pub id: FoodId,
    /// Display name copied from the catalog at draw time.
    pub name: String,
    /// Price in energy. Always positive.
    pub price: u64,
    /// Remaining stock: 1 until bought, then 0.
    pub stock: u32,
}

impl ShopItem {
    /// Whether this line has already been bought today.
    pub const fn is_sold_out(&self) -> bool {
        self.stock == 0
    }
}

/// Reminder toggles shown on the settings screen.
///
/// The engine only stores these; delivering notifications is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    /// Remind when the pet is hungry.
    pub feed: bool,
    /// Remind when a bath is available.
    pub bath: bool,
    /// Remind when the pet needs the toilet.
    pub toilet: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            feed: true,
            bath: true,
            toilet: true,
        }
    }
}

// ---------------------------------------------------------------------------
// PetState
// ---------------------------------------------------------------------------

/// The single persisted aggregate for one install.
///
/// Invariants maintained by the rule crates:
/// - `affinity_point < affinity max` (wraps are resolved immediately)
/// - `satisfaction_level` is within `0..=satisfaction max`
/// - `bath_accelerated_uses_today` and `shop_rerolls_today` never exceed
///   their daily caps
/// - `egg_owned == false` implies `egg_hatch_at.is_none()`
/// - `owned_food_counts` never stores a zero count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    // --- Currency ---
    /// Settled, spendable energy.
    pub wallet_energy: u64,
    /// Energy earned from health sync but not yet merged into the wallet.
    pub pending_energy: u64,
    /// High-water mark of the last successful health sync.
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Player-set daily energy target for the progress ring (0 = unset).
    pub daily_goal_energy: u64,

    // --- Day boundary ---
    /// Day key the day-scoped fields were last reset against.
    pub last_day_key: DayKey,
    /// Last known-good step count for today.
    pub cached_today_steps: u64,
    /// Last known-good energy total (active + basal) for today.
    pub cached_today_energy: u64,

    // --- Affinity ---
    /// Progress toward the next reward card.
    pub affinity_point: u32,
    /// Unspent reward cards.
    pub affinity_card_count: u32,

    // --- Satisfaction ---
    /// Stored satisfaction level as of `satisfaction_last_updated_at`.
    pub satisfaction_level: u32,
    /// Baseline from which decay is measured (`None` until first seeded).
    pub satisfaction_last_updated_at: Option<DateTime<Utc>>,

    // --- Bath ---
    /// When the last bath started its cooldown.
    pub bath_last_at: Option<DateTime<Utc>>,
    /// Cooldown accelerants used today.
    pub bath_accelerated_uses_today: u32,

    // --- Toilet ---
    /// When the open toilet request was raised (`None` = no request).
    pub toilet_flag_at: Option<DateTime<Utc>>,
    /// When a toilet request was last raised, used for the minimum interval.
    pub toilet_last_raised_at: Option<DateTime<Utc>>,

    // --- Egg ---
    /// Whether an egg is incubating (at most one at a time).
    pub egg_owned: bool,
    /// When the egg becomes hatchable.
    pub egg_hatch_at: Option<DateTime<Utc>>,
    /// Whether today's instant hatch has been used.
    pub egg_instant_hatch_used_today: bool,

    // --- Daily shop ---
    /// Day key of the current shop line-up.
    pub shop_day_key: DayKey,
    /// Current line-up (`None` until the first draw).
    pub shop_items: Option<Vec<ShopItem>>,
    /// Rerolls used today.
    pub shop_rerolls_today: u32,

    // --- Pets ---
    /// The pet currently being raised.
    pub current_pet_id: PetId,
    /// Every pet collected so far, in acquisition order, without duplicates.
    pub owned_pet_ids: Vec<PetId>,

    // --- Inventory ---
    /// Owned food by catalog id. Zero counts are pruned.
    pub owned_food_counts: BTreeMap<FoodId, u32>,

    // --- Settings ---
    /// Reminder toggles.
    #[serde(default)]
    pub notifications: NotificationPrefs,
}

impl PetState {
    /// Create the state of a brand-new install at `now`.
    ///
    /// The pet starts fully satisfied with the starter pet owned, an empty
    /// wallet, and both day keys set to today.
    pub fn new(now: DateTime<Utc>, calendar: &Calendar) -> Self {
        let today = calendar.day_key(now);
        Self {
            wallet_energy: 0,
            pending_energy: 0,
            last_synced_at: None,
            daily_goal_energy: 0,
            last_day_key: today.clone(),
            cached_today_steps: 0,
            cached_today_energy: 0,
            affinity_point: 0,
            affinity_card_count: 0,
            satisfaction_level: INITIAL_SATISFACTION,
            satisfaction_last_updated_at: None,
            bath_last_at: None,
            bath_accelerated_uses_today: 0,
            toilet_flag_at: None,
            toilet_last_raised_at: None,
            egg_owned: false,
            egg_hatch_at: None,
            egg_instant_hatch_used_today: false,
            shop_day_key: today,
            shop_items: None,
            shop_rerolls_today: 0,
            current_pet_id: PetId::from(STARTER_PET_ID),
            owned_pet_ids: vec![PetId::from(STARTER_PET_ID)],
            owned_food_counts: BTreeMap::new(),
            notifications: NotificationPrefs::default(),
        }
    }

    /// Whether the given pet has been collected.
    pub fn owns_pet(&self, id: &PetId) -> bool {
        self.owned_pet_ids.contains(id)
    }

    /// Whether a toilet request is currently open.
    pub const fn has_toilet_request(&self) -> bool {
        self.toilet_flag_at.is_some()
    }
}
