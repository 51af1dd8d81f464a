//! The pet store: single owner of the persisted state.
//!
//! Every host action goes through [`PetStore`]. Each action first rolls the
//! calendar day over and makes sure the pet collection is not empty, then
//! delegates to the rule crates and grants the affinity reward the care loop
//! attaches to it. Judgment methods take `&self` and never mutate, so they
//! are safe to call while rendering.
//!
//! Refused actions return a [`CoreError`] whose `Display` is the reason to
//! show the player. Apart from the day rollover and committed satisfaction
//! decay, a refused action leaves the state unchanged.

use calpet_care::{
    AffinityGain, BathStatus, CareConfig, CareError, FeedOutcome, add_affinity,
    apply_accelerant, can_bath, can_feed, can_raise_flag, consume_food, current_satisfaction,
    ensure_initial_pets, feed, first_owned_food, food_count, mark_bath_done, raise_flag, resolve,
};
use calpet_ledger::{
    LedgerError, TodayReading, apply_sync, drain_pending_to_wallet, goal_progress,
    sync_window_start, update_today_cache,
};
use calpet_shop::{
    EggStatus, HatchOutcome, Purchase, ShopError, buy_egg, egg_status, ensure_daily_shop,
    hatch_egg, instant_hatch, reroll_shop,
};
use calpet_types::{Calendar, CalendarError, FOOD_CATALOG, FoodId, NotificationPrefs, PetState};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::health::{HealthSource, HealthTotals};
use crate::rollover::roll_over_day;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by pet store actions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A care rule refused the action.
    #[error(transparent)]
    Care(#[from] CareError),

    /// A shop or egg rule refused the action.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// A wallet update failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The configured calendar is invalid.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Daily goals must be positive.
    #[error("daily goal must be greater than zero")]
    InvalidGoal,
}

// ---------------------------------------------------------------------------
// Outcome records
// ---------------------------------------------------------------------------

/// Result of feeding the pet a food from the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FedOutcome {
    /// The food served.
    pub food: FoodId,
    /// Units of that food left.
    pub food_left: u32,
    /// Satisfaction change.
    pub feed: FeedOutcome,
    /// Affinity reward.
    pub affinity: AffinityGain,
}

/// What tapping the toilet did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToiletTap {
    /// An open request was resolved.
    Resolved {
        /// Whether the quick-response bonus applied.
        within_bonus_window: bool,
        /// Affinity reward.
        affinity: AffinityGain,
    },
    /// The roll succeeded and a new request was raised.
    Raised,
    /// No request was open and none was raised.
    Nothing,
}

/// Result of a health sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Energy credited to pending by this sync (0 when the collaborator
    /// failed).
    pub deposited: u64,
    /// Pending balance afterwards.
    pub pending: u64,
    /// Today's values to display.
    pub today: TodayReading,
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Clamp bounded counters to the configured limits. Returns `true` if any
/// counter changed.
fn clamp_counters(state: &mut PetState, config: &EngineConfig) -> bool {
    let care = &config.care;
    let affinity_ceiling = care.affinity_max.max(1).saturating_sub(1);
    let clamped = PetState {
        satisfaction_level: state.satisfaction_level.min(care.satisfaction_max),
        affinity_point: state.affinity_point.min(affinity_ceiling),
        bath_accelerated_uses_today: state
            .bath_accelerated_uses_today
            .min(care.accelerant_daily_cap),
        shop_rerolls_today: state.shop_rerolls_today.min(config.shop.reroll_daily_cap),
        ..state.clone()
    };
    if clamped == *state {
        return false;
    }
    warn!(
        satisfaction = state.satisfaction_level,
        affinity = state.affinity_point,
        accelerant_uses = state.bath_accelerated_uses_today,
        rerolls = state.shop_rerolls_today,
        "Loaded counters exceed configured limits; clamping"
    );
    *state = clamped;
    true
}

// ---------------------------------------------------------------------------
// PetStore
// ---------------------------------------------------------------------------

/// Single owner of one install's [`PetState`].
#[derive(Debug, Clone)]
pub struct PetStore {
    /// The persisted aggregate.
    state: PetState,
    /// Engine tunables.
    config: EngineConfig,
    /// Calendar derived from `config.calendar`.
    calendar: Calendar,
}

impl PetStore {
    /// Create the store of a brand-new install.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Calendar`] if the configured offset is invalid.
    pub fn new_install(now: DateTime<Utc>, config: EngineConfig) -> Result<Self, CoreError> {
        let calendar = config.calendar.calendar()?;
        let state = PetState::new(now, &calendar);
        info!(day = %state.last_day_key, "New install created");
        Ok(Self {
            state,
            config,
            calendar,
        })
    }

    /// Wrap a loaded state.
    ///
    /// Counters beyond the configured limits, as left by an edited record or
    /// a lowered limit, are pulled back inside them.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Calendar`] if the configured offset is invalid.
    pub fn open(mut state: PetState, config: EngineConfig) -> Result<Self, CoreError> {
        let calendar = config.calendar.calendar()?;
        let _ = ensure_initial_pets(&mut state);
        let _ = clamp_counters(&mut state, &config);
        Ok(Self {
            state,
            config,
            calendar,
        })
    }

    /// The current state, for display and persistence.
    pub const fn state(&self) -> &PetState {
        &self.state
    }

    /// Consume the store, returning the state.
    pub fn into_state(self) -> PetState {
        self.state
    }

    /// Engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The calendar that defines "today".
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    const fn care(&self) -> &CareConfig {
        &self.config.care
    }

    /// Prepare the state for an action at `now`.
    fn begin_action(&mut self, now: DateTime<Utc>) {
        let _ = roll_over_day(&mut self.state, now, &self.calendar);
        let _ = ensure_initial_pets(&mut self.state);
    }

    fn reward(&mut self, points: u32) -> Result<AffinityGain, CoreError> {
        Ok(add_affinity(&mut self.state, points, self.config.care.affinity_max)?)
    }

    // -----------------------------------------------------------------------
    // Judgments
    // -----------------------------------------------------------------------

    /// Satisfaction level at `now`.
    pub fn satisfaction(&self, now: DateTime<Utc>) -> u32 {
        current_satisfaction(&self.state, now, self.care())
    }

    /// Whether the pet can be fed at `now`.
    ///
    /// # Errors
    ///
    /// Returns the reason feeding is refused.
    pub fn can_feed(&self, now: DateTime<Utc>) -> Result<(), CareError> {
        can_feed(&self.state, now, self.care())
    }

    /// Bath availability at `now`.
    pub fn bath_status(&self, now: DateTime<Utc>) -> BathStatus {
        can_bath(&self.state, now, self.care())
    }

    /// Egg life-cycle status at `now`.
    pub fn egg_status(&self, now: DateTime<Utc>) -> EggStatus {
        egg_status(&self.state, now)
    }

    /// Progress of today's cached energy toward the daily goal.
    pub fn goal_progress(&self) -> f64 {
        goal_progress(self.state.cached_today_energy, self.state.daily_goal_energy)
    }

    /// The first owned food in catalog order, to preselect on the shelf.
    pub fn first_owned_food(&self) -> Option<FoodId> {
        first_owned_food(&self.state, FOOD_CATALOG.iter().map(|f| f.id))
    }

    // -----------------------------------------------------------------------
    // Care actions
    // -----------------------------------------------------------------------

    /// Feed the pet one unit of `food` from the inventory.
    ///
    /// The meal, the used unit and the reward are applied together: if any
    /// step fails the state goes back to how it was after the feed check.
    ///
    /// # Errors
    ///
    /// [`CareError::AlreadySatisfied`] when the pet is full, or
    /// [`CareError::InsufficientFood`] when none of `food` is owned.
    pub fn feed_with_food(&mut self, now: DateTime<Utc>, food: &FoodId) -> Result<FedOutcome, CoreError> {
        self.begin_action(now);
        can_feed(&self.state, now, &self.config.care)?;

        let snapshot = self.state.clone();
        let fed = self.serve(now, food);
        if fed.is_err() {
            self.state = snapshot;
        }
        fed
    }

    fn serve(&mut self, now: DateTime<Utc>, food: &FoodId) -> Result<FedOutcome, CoreError> {
        let food_left = consume_food(&mut self.state, food, 1)?;
        let outcome = feed(&mut self.state, now, &self.calendar, &self.config.care)?;
        let affinity = self.reward(self.config.care.rewards.feed)?;
        info!(food = %food, level = outcome.after, "Pet fed");
        Ok(FedOutcome {
            food: food.clone(),
            food_left,
            feed: outcome,
            affinity,
        })
    }

    /// Give the pet a bath.
    ///
    /// # Errors
    ///
    /// [`CareError::BathCoolingDown`] while the cooldown runs.
    pub fn bath(&mut self, now: DateTime<Utc>) -> Result<AffinityGain, CoreError> {
        self.begin_action(now);
        can_bath(&self.state, now, &self.config.care).ensure_available()?;
        mark_bath_done(&mut self.state, now, &self.calendar);
        let affinity = self.reward(self.config.care.rewards.bath)?;
        info!("Bath given");
        Ok(affinity)
    }

    /// Use a bath accelerant. Returns the bath status afterwards.
    ///
    /// # Errors
    ///
    /// [`CareError::AccelerantCapReached`] or [`CareError::BathNotCooling`].
    pub fn accelerate_bath(&mut self, now: DateTime<Utc>) -> Result<BathStatus, CoreError> {
        self.begin_action(now);
        Ok(apply_accelerant(&mut self.state, now, &self.calendar, &self.config.care)?)
    }

    /// Tap the toilet: resolve an open request, or roll for a new one.
    ///
    /// # Errors
    ///
    /// Only on affinity counter overflow.
    pub fn tap_toilet(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> Result<ToiletTap, CoreError> {
        self.begin_action(now);

        if self.state.has_toilet_request() {
            let resolution = resolve(&mut self.state, now, &self.calendar, &self.config.care);
            if resolution.resolved {
                let rewards = self.config.care.rewards;
                let points = if resolution.within_bonus_window {
                    rewards.toilet_quick
                } else {
                    rewards.toilet_late
                };
                let affinity = self.reward(points)?;
                return Ok(ToiletTap::Resolved {
                    within_bonus_window: resolution.within_bonus_window,
                    affinity,
                });
            }
        }

        if can_raise_flag(&self.state, now, &self.calendar, &self.config.care).is_err() {
            return Ok(ToiletTap::Nothing);
        }
        let roll: u32 = rng.random_range(1..=100);
        if roll > self.config.care.toilet_flag_chance_percent {
            debug!(roll, "Toilet roll missed");
            return Ok(ToiletTap::Nothing);
        }
        raise_flag(&mut self.state, now, &self.calendar, &self.config.care)?;
        Ok(ToiletTap::Raised)
    }

    /// Put the pet to sleep.
    ///
    /// # Errors
    ///
    /// Only on affinity counter overflow.
    pub fn sleep(&mut self, now: DateTime<Utc>) -> Result<AffinityGain, CoreError> {
        self.begin_action(now);
        let affinity = self.reward(self.config.care.rewards.sleep)?;
        debug!("Pet put to sleep");
        Ok(affinity)
    }

    // -----------------------------------------------------------------------
    // Economy actions
    // -----------------------------------------------------------------------

    /// Make sure today's shop line-up exists, as when the shop opens.
    /// Returns `true` if a draw happened.
    pub fn open_shop(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> bool {
        self.begin_action(now);
        ensure_daily_shop(&mut self.state, now, &self.calendar, &self.config.shop, rng)
    }

    /// Move all pending energy into the wallet. Returns the amount moved.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Overflow`] if the wallet would overflow.
    pub fn settle_pending(&mut self, now: DateTime<Utc>) -> Result<u64, CoreError> {
        self.begin_action(now);
        Ok(drain_pending_to_wallet(&mut self.state)?)
    }

    /// Buy one unit of `item` from today's line-up.
    ///
    /// Pending energy is settled into the wallet first.
    ///
    /// # Errors
    ///
    /// See [`calpet_shop::buy_food`].
    pub fn buy_food(
        &mut self,
        now: DateTime<Utc>,
        item: &FoodId,
        rng: &mut impl Rng,
    ) -> Result<Purchase, CoreError> {
        self.begin_action(now);
        let _ = drain_pending_to_wallet(&mut self.state)?;
        Ok(calpet_shop::buy_food(
            &mut self.state,
            item,
            now,
            &self.calendar,
            &self.config.shop,
            rng,
        )?)
    }

    /// Reroll today's line-up. Returns rerolls used today.
    ///
    /// # Errors
    ///
    /// [`ShopError::RerollCapReached`] once the daily cap is used.
    pub fn reroll_shop(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> Result<u32, CoreError> {
        self.begin_action(now);
        Ok(reroll_shop(&mut self.state, now, &self.calendar, &self.config.shop, rng)?)
    }

    /// Buy an egg with reward cards. Returns when it can hatch.
    ///
    /// # Errors
    ///
    /// See [`calpet_shop::buy_egg`].
    pub fn buy_egg(&mut self, now: DateTime<Utc>) -> Result<DateTime<Utc>, CoreError> {
        self.begin_action(now);
        Ok(buy_egg(&mut self.state, now, &self.config.shop)?)
    }

    /// Skip the incubation of the current egg. Once per day.
    ///
    /// # Errors
    ///
    /// [`ShopError::NoEgg`] or [`ShopError::InstantHatchUsed`].
    pub fn instant_hatch(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        self.begin_action(now);
        Ok(instant_hatch(&mut self.state, now, &self.calendar)?)
    }

    /// Hatch the egg.
    ///
    /// # Errors
    ///
    /// [`ShopError::NoEgg`] or [`ShopError::NotReadyToHatch`].
    pub fn hatch_egg(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> Result<HatchOutcome, CoreError> {
        self.begin_action(now);
        Ok(hatch_egg(&mut self.state, now, rng)?)
    }

    // -----------------------------------------------------------------------
    // Health sync and settings
    // -----------------------------------------------------------------------

    /// Pull new energy from the health collaborator into pending and refresh
    /// today's cached totals.
    ///
    /// A failing collaborator degrades to "no new data": nothing is
    /// deposited, the watermark stays, and the cached totals are shown.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Overflow`] if pending would overflow.
    pub fn sync_health(&mut self, now: DateTime<Utc>, source: &impl HealthSource) -> Result<SyncOutcome, CoreError> {
        self.begin_action(now);

        let since = sync_window_start(self.state.last_synced_at, now, &self.calendar);
        let deposited = match source.sync_delta(since, now) {
            Ok(report) => apply_sync(&mut self.state, report)?.deposited,
            Err(err) => {
                warn!(error = %err, "Health sync failed; keeping previous balances");
                0
            }
        };

        let day_start = self.calendar.start_of_day(now);
        let totals = source.today_totals(day_start, now).unwrap_or_else(|err| {
            warn!(error = %err, "Reading today's totals failed; showing cached values");
            HealthTotals::default()
        });
        let today_key = self.calendar.day_key(now);
        let today = update_today_cache(&mut self.state, totals.steps, totals.energy, &today_key);

        info!(deposited, pending = self.state.pending_energy, "Health synced");
        Ok(SyncOutcome {
            deposited,
            pending: self.state.pending_energy,
            today,
        })
    }

    /// Set the daily energy goal.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidGoal`] for 0.
    pub fn set_daily_goal(&mut self, goal_energy: u64) -> Result<(), CoreError> {
        if goal_energy == 0 {
            return Err(CoreError::InvalidGoal);
        }
        self.state.daily_goal_energy = goal_energy;
        info!(goal_energy, "Daily goal set");
        Ok(())
    }

    /// Replace the reminder toggles.
    pub const fn set_notifications(&mut self, prefs: NotificationPrefs) {
        self.state.notifications = prefs;
    }

    /// Units of `food` owned.
    pub fn food_count(&self, food: &FoodId) -> u32 {
        food_count(&self.state, food)
    }

    /// Discard all progress and start over as a new install at `now`.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        warn!("Pet state reset to a new install");
        self.state = PetState::new(now, &self.calendar);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use calpet_care::add_food;
    use calpet_types::{DayKey, PetId};
    use chrono::TimeDelta;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::health::{HealthSample, ScriptedHealthSource};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn store_at(now: DateTime<Utc>) -> PetStore {
        PetStore::new_install(now, EngineConfig::default()).unwrap()
    }

    #[test]
    fn feeding_consumes_food_and_rewards_affinity() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut store = store_at(t0);
        store.state.satisfaction_last_updated_at = Some(t0);
        let cake = FoodId::from("cake");
        add_food(&mut store.state, &cake, 2).unwrap();

        let fed = store.feed_with_food(at("2026-02-03T10:00:00Z"), &cake).unwrap();
        assert_eq!(fed.food_left, 1);
        assert_eq!(fed.feed, FeedOutcome { before: 2, after: 3 });
        assert_eq!(fed.affinity.after, 10);
    }

    #[test]
    fn feeding_when_full_keeps_the_food() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut store = store_at(t0);
        let cake = FoodId::from("cake");
        add_food(&mut store.state, &cake, 1).unwrap();
        let result = store.feed_with_food(t0, &cake);
        assert!(matches!(result, Err(CoreError::Care(CareError::AlreadySatisfied { .. }))));
        assert_eq!(store.food_count(&cake), 1);
        assert_eq!(store.state().affinity_point, 0);
    }

    #[test]
    fn feeding_without_food_is_refused() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut store = store_at(t0);
        store.state.satisfaction_level = 1;
        let result = store.feed_with_food(t0, &FoodId::from("cake"));
        assert!(matches!(result, Err(CoreError::Care(CareError::InsufficientFood { .. }))));
        assert_eq!(store.satisfaction(t0), 1);
    }

    #[test]
    fn failed_feed_reward_rolls_the_whole_meal_back() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut store = store_at(t0);
        store.state.satisfaction_level = 1;
        store.state.satisfaction_last_updated_at = Some(t0);
        store.state.affinity_point = 95;
        store.state.affinity_card_count = u32::MAX;
        let cake = FoodId::from("cake");
        add_food(&mut store.state, &cake, 1).unwrap();
        let before = store.state().clone();

        let result = store.feed_with_food(t0, &cake);
        assert!(matches!(
            result,
            Err(CoreError::Care(CareError::ArithmeticOverflow { .. }))
        ));
        assert_eq!(store.state(), &before);
        assert_eq!(store.food_count(&cake), 1);
    }

    #[test]
    fn bath_rewards_then_cools_down() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut store = store_at(t0);
        assert_eq!(store.bath(t0).unwrap().after, 15);
        let again = store.bath(at("2026-02-03T09:00:00Z"));
        assert!(matches!(
            again,
            Err(CoreError::Care(CareError::BathCoolingDown { remaining_minutes: 420 }))
        ));
        assert_eq!(
            store.accelerate_bath(at("2026-02-03T09:00:00Z")).unwrap(),
            BathStatus::Cooling {
                remaining: TimeDelta::hours(3)
            }
        );
    }

    #[test]
    fn toilet_tap_raises_then_resolves_with_bonus() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut store = store_at(t0);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut now = t0;
        let mut raised = false;
        for _ in 0..200 {
            if store.tap_toilet(now, &mut rng).unwrap() == ToiletTap::Raised {
                raised = true;
                break;
            }
            now = now.checked_add_signed(TimeDelta::seconds(1)).unwrap();
        }
        assert!(raised);
        let later = now.checked_add_signed(TimeDelta::minutes(30)).unwrap();
        let tap = store.tap_toilet(later, &mut rng).unwrap();
        assert!(matches!(
            tap,
            ToiletTap::Resolved {
                within_bonus_window: true,
                ..
            }
        ));
        assert_eq!(store.state().affinity_point, 20);
    }

    #[test]
    fn toilet_never_raises_with_zero_chance() {
        let t0 = at("2026-02-03T08:00:00Z");
        let mut config = EngineConfig::default();
        config.care.toilet_flag_chance_percent = 0;
        let mut store = PetStore::new_install(t0, config).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(store.tap_toilet(t0, &mut rng).unwrap(), ToiletTap::Nothing);
        }
    }

    #[test]
    fn sync_deposits_and_buy_settles_first() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut store = store_at(t0);
        let mut rng = SmallRng::seed_from_u64(42);
        let source = ScriptedHealthSource::new(vec![HealthSample {
            at: at("2026-02-03T08:00:00Z"),
            active_energy: 700,
            basal_energy: 300,
            steps: 5000,
        }]);

        let now = at("2026-02-03T09:00:00Z");
        let synced = store.sync_health(now, &source).unwrap();
        assert_eq!(synced.deposited, 1000);
        assert_eq!(synced.today.steps, 5000);
        assert_eq!(store.state().wallet_energy, 0);

        // A second sync over the same window credits nothing new.
        assert_eq!(store.sync_health(now, &source).unwrap().deposited, 0);

        assert!(store.open_shop(now, &mut rng));
        let (id, price) = store
            .state()
            .shop_items
            .as_deref()
            .and_then(|items| items.first())
            .map(|line| (line.id.clone(), line.price))
            .unwrap();
        let bought = store.buy_food(now, &id, &mut rng).unwrap();
        assert_eq!(bought.wallet_after, 1000_u64.saturating_sub(price));
        assert_eq!(store.state().pending_energy, 0);
    }

    #[test]
    fn buying_on_a_new_day_draws_one_fresh_line_up() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut store = store_at(t0);
        let mut rng = SmallRng::seed_from_u64(9);
        assert!(store.open_shop(t0, &mut rng));
        let yesterday = store.state().shop_items.clone().unwrap();

        let next = at("2026-02-04T07:00:00Z");
        let stale = yesterday.first().map(|line| line.id.clone()).unwrap();
        let _ = store.buy_food(next, &stale, &mut rng);

        assert_eq!(store.state().shop_day_key, DayKey::from("20260204"));
        assert_eq!(store.state().shop_rerolls_today, 0);
        let today = store.state().shop_items.clone().unwrap();
        assert_eq!(today.len(), 6);
        // Opening the shop again the same day keeps that line-up.
        assert!(!store.open_shop(next, &mut rng));
        assert_eq!(store.state().shop_items.as_ref(), Some(&today));
    }

    #[test]
    fn failed_sync_keeps_balances_and_cache() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut store = store_at(t0);
        store.state.pending_energy = 50;
        store.state.cached_today_steps = 4000;
        let now = at("2026-02-03T09:00:00Z");
        let synced = store.sync_health(now, &ScriptedHealthSource::unauthorized()).unwrap();
        assert_eq!(synced.deposited, 0);
        assert_eq!(synced.today.steps, 4000);
        assert_eq!(store.state().pending_energy, 50);
        assert!(store.state().last_synced_at.is_none());
    }

    #[test]
    fn daily_goal_rejects_zero() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut store = store_at(t0);
        assert!(matches!(store.set_daily_goal(0), Err(CoreError::InvalidGoal)));
        assert!(store.set_daily_goal(400).is_ok());
        store.state.cached_today_energy = 600;
        assert!((store.goal_progress() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn open_repairs_an_empty_collection() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut state = PetState::new(t0, &Calendar::utc());
        state.owned_pet_ids.clear();
        let store = PetStore::open(state, EngineConfig::default()).unwrap();
        assert_eq!(store.state().owned_pet_ids, vec![PetId::from("pet_000")]);
    }

    #[test]
    fn open_clamps_counters_beyond_limits() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut state = PetState::new(t0, &Calendar::utc());
        state.satisfaction_level = 9;
        state.affinity_point = 250;
        state.bath_accelerated_uses_today = 7;
        state.shop_rerolls_today = 5;
        state.wallet_energy = 40;

        let store = PetStore::open(state, EngineConfig::default()).unwrap();
        let state = store.state();
        assert_eq!(state.satisfaction_level, 3);
        assert_eq!(state.affinity_point, 99);
        assert_eq!(state.bath_accelerated_uses_today, 2);
        assert_eq!(state.shop_rerolls_today, 2);
        assert_eq!(state.wallet_energy, 40);
    }

    #[test]
    fn open_keeps_counters_within_limits() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut state = PetState::new(t0, &Calendar::utc());
        state.satisfaction_level = 2;
        state.affinity_point = 99;
        state.bath_accelerated_uses_today = 1;
        let expected = state.clone();
        let store = PetStore::open(state, EngineConfig::default()).unwrap();
        assert_eq!(store.state(), &expected);
    }

    #[test]
    fn reset_starts_over() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut store = store_at(t0);
        store.state.wallet_energy = 999;
        store.state.affinity_card_count = 3;
        store.reset(t0);
        assert_eq!(store.state(), &PetState::new(t0, &Calendar::utc()));
    }

    #[test]
    fn first_owned_food_uses_catalog_order() {
        let t0 = at("2026-02-03T07:00:00Z");
        let mut store = store_at(t0);
        assert_eq!(store.first_owned_food(), None);
        add_food(&mut store.state, &FoodId::from("beer"), 1).unwrap();
        add_food(&mut store.state, &FoodId::from("gyuudon"), 1).unwrap();
        assert_eq!(store.first_owned_food(), Some(FoodId::from("gyuudon")));
    }
}
