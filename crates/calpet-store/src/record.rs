//! The flat persisted record.
//!
//! Decoding is tolerant: a corrupt embedded blob never makes the record
//! unreadable. A missing or broken shop line-up decodes to `None` (the shop
//! redraws it), a broken inventory to an empty one, and a broken pet list to
//! an empty list that the pet store repairs with the starter pet.

use std::collections::BTreeMap;

use calpet_types::{DayKey, FoodId, NotificationPrefs, PetId, PetState, ShopItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StoreError;

/// One install's state as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    /// Settled energy.
    pub wallet_energy: u64,
    /// Energy not yet settled.
    pub pending_energy: u64,
    /// Health sync watermark.
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Daily energy goal.
    pub daily_goal_energy: u64,
    /// Day key of the last daily reset.
    pub last_day_key: String,
    /// Cached steps for `last_day_key`.
    pub cached_today_steps: u64,
    /// Cached energy for `last_day_key`.
    pub cached_today_energy: u64,
    /// Affinity meter.
    pub affinity_point: u32,
    /// Unspent reward cards.
    pub affinity_card_count: u32,
    /// Stored satisfaction level.
    pub satisfaction_level: u32,
    /// Satisfaction decay baseline.
    pub satisfaction_last_updated_at: Option<DateTime<Utc>>,
    /// Last bath.
    pub bath_last_at: Option<DateTime<Utc>>,
    /// Bath accelerants used today.
    pub bath_accelerated_uses_today: u32,
    /// Open toilet request.
    pub toilet_flag_at: Option<DateTime<Utc>>,
    /// Last toilet request raise.
    pub toilet_last_raised_at: Option<DateTime<Utc>>,
    /// Egg incubating.
    pub egg_owned: bool,
    /// Egg hatch time.
    pub egg_hatch_at: Option<DateTime<Utc>>,
    /// Instant hatch used today.
    pub egg_instant_hatch_used_today: bool,
    /// Day key of the shop line-up.
    pub shop_day_key: String,
    /// Shop line-up as a JSON array.
    pub shop_items_data: Option<String>,
    /// Shop rerolls used today.
    pub shop_rerolls_today: u32,
    /// Current pet id.
    pub current_pet_id: String,
    /// Owned pet ids as a JSON array.
    pub owned_pet_ids_data: Option<String>,
    /// Food inventory as a JSON object of id to count.
    pub owned_food_counts_data: Option<String>,
    /// Feed reminder toggle.
    #[serde(default = "default_true")]
    pub notify_feed: bool,
    /// Bath reminder toggle.
    #[serde(default = "default_true")]
    pub notify_bath: bool,
    /// Toilet reminder toggle.
    #[serde(default = "default_true")]
    pub notify_toilet: bool,
}

const fn default_true() -> bool {
    true
}

impl PetRecord {
    /// Flatten a state into a record, encoding nested collections.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if a collection cannot be encoded.
    pub fn from_state(state: &PetState) -> Result<Self, StoreError> {
        let shop_items_data = state
            .shop_items
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        Ok(Self {
            wallet_energy: state.wallet_energy,
            pending_energy: state.pending_energy,
            last_synced_at: state.last_synced_at,
            daily_goal_energy: state.daily_goal_energy,
            last_day_key: state.last_day_key.to_string(),
            cached_today_steps: state.cached_today_steps,
            cached_today_energy: state.cached_today_energy,
            affinity_point: state.affinity_point,
            affinity_card_count: state.affinity_card_count,
            satisfaction_level: state.satisfaction_level,
            satisfaction_last_updated_at: state.satisfaction_last_updated_at,
            bath_last_at: state.bath_last_at,
            bath_accelerated_uses_today: state.bath_accelerated_uses_today,
            toilet_flag_at: state.toilet_flag_at,
            toilet_last_raised_at: state.toilet_last_raised_at,
            egg_owned: state.egg_owned,
            egg_hatch_at: state.egg_hatch_at,
            egg_instant_hatch_used_today: state.egg_instant_hatch_used_today,
            shop_day_key: state.shop_day_key.to_string(),
            shop_items_data,
            shop_rerolls_today: state.shop_rerolls_today,
            current_pet_id: state.current_pet_id.to_string(),
            owned_pet_ids_data: Some(serde_json::to_string(&state.owned_pet_ids)?),
            owned_food_counts_data: Some(serde_json::to_string(&state.owned_food_counts)?),
            notify_feed: state.notifications.feed,
            notify_bath: state.notifications.bath,
            notify_toilet: state.notifications.toilet,
        })
    }

    /// Expand the record into a state, decoding nested collections
    /// tolerantly.
    pub fn into_state(self) -> PetState {
        let shop_items = decode_blob::<Vec<ShopItem>>("shop_items", self.shop_items_data.as_deref());

        let mut owned_pet_ids: Vec<PetId> = Vec::new();
        for id in decode_blob::<Vec<PetId>>("owned_pet_ids", self.owned_pet_ids_data.as_deref())
            .unwrap_or_default()
        {
            if !owned_pet_ids.contains(&id) {
                owned_pet_ids.push(id);
            }
        }

        let mut owned_food_counts = decode_blob::<BTreeMap<FoodId, u32>>(
            "owned_food_counts",
            self.owned_food_counts_data.as_deref(),
        )
        .unwrap_or_default();
        owned_food_counts.retain(|_, count| *count > 0);

        let egg_hatch_at = if self.egg_owned { self.egg_hatch_at } else { None };

        PetState {
            wallet_energy: self.wallet_energy,
            pending_energy: self.pending_energy,
            last_synced_at: self.last_synced_at,
            daily_goal_energy: self.daily_goal_energy,
            last_day_key: DayKey::from(self.last_day_key),
            cached_today_steps: self.cached_today_steps,
            cached_today_energy: self.cached_today_energy,
            affinity_point: self.affinity_point,
            affinity_card_count: self.affinity_card_count,
            satisfaction_level: self.satisfaction_level,
            satisfaction_last_updated_at: self.satisfaction_last_updated_at,
            bath_last_at: self.bath_last_at,
            bath_accelerated_uses_today: self.bath_accelerated_uses_today,
            toilet_flag_at: self.toilet_flag_at,
            toilet_last_raised_at: self.toilet_last_raised_at,
            egg_owned: self.egg_owned,
            egg_hatch_at,
            egg_instant_hatch_used_today: self.egg_instant_hatch_used_today,
            shop_day_key: DayKey::from(self.shop_day_key),
            shop_items,
            shop_rerolls_today: self.shop_rerolls_today,
            current_pet_id: PetId::from(self.current_pet_id),
            owned_pet_ids,
            owned_food_counts,
            notifications: NotificationPrefs {
                feed: self.notify_feed,
                bath: self.notify_bath,
                toilet: self.notify_toilet,
            },
        }
    }
}

/// Decode an embedded JSON blob, logging and dropping it when corrupt.
fn decode_blob<T: DeserializeOwned>(field: &'static str, data: Option<&str>) -> Option<T> {
    let raw = data?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(field, error = %err, "Discarding corrupt embedded blob");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use calpet_types::Calendar;

    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn busy_state() -> PetState {
        let now = at("2026-02-03T09:00:00Z");
        let mut state = PetState::new(now, &Calendar::utc());
        state.wallet_energy = 420;
        state.pending_energy = 80;
        state.last_synced_at = Some(now);
        state.shop_items = Some(vec![ShopItem {
            id: FoodId::from("pan"),
            name: String::from("Bread"),
            price: 150,
            stock: 0,
        }]);
        state.owned_food_counts.insert(FoodId::from("pan"), 1);
        state.owned_pet_ids.push(PetId::from("pet_003"));
        state.egg_owned = true;
        state.egg_hatch_at = Some(now);
        state.notifications.bath = false;
        state
    }

    #[test]
    fn state_survives_a_record_round_trip() {
        let state = busy_state();
        let record = PetRecord::from_state(&state).unwrap();
        assert_eq!(record.into_state(), state);
    }

    #[test]
    fn collections_are_embedded_as_json_strings() {
        let record = PetRecord::from_state(&busy_state()).unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert!(json.get("ownedPetIdsData").is_some_and(serde_json::Value::is_string));
        assert!(json.get("shopItemsData").is_some_and(serde_json::Value::is_string));
        assert!(json.get("ownedFoodCountsData").is_some_and(serde_json::Value::is_string));
    }

    #[test]
    fn corrupt_blobs_decode_to_defaults() {
        let mut record = PetRecord::from_state(&busy_state()).unwrap();
        record.shop_items_data = Some(String::from("[{\"id\":"));
        record.owned_food_counts_data = Some(String::from("not json"));
        record.owned_pet_ids_data = Some(String::from("42"));
        let state = record.into_state();
        assert!(state.shop_items.is_none());
        assert!(state.owned_food_counts.is_empty());
        assert!(state.owned_pet_ids.is_empty());
        assert_eq!(state.wallet_energy, 420);
    }

    #[test]
    fn decode_repairs_duplicates_zero_counts_and_stray_hatch_times() {
        let mut record = PetRecord::from_state(&busy_state()).unwrap();
        record.owned_pet_ids_data = Some(String::from("[\"pet_000\",\"pet_003\",\"pet_000\"]"));
        record.owned_food_counts_data = Some(String::from("{\"pan\":0,\"cake\":2}"));
        record.egg_owned = false;
        let state = record.into_state();
        assert_eq!(
            state.owned_pet_ids,
            vec![PetId::from("pet_000"), PetId::from("pet_003")]
        );
        assert_eq!(state.owned_food_counts.len(), 1);
        assert_eq!(state.owned_food_counts.get(&FoodId::from("cake")), Some(&2));
        assert!(state.egg_hatch_at.is_none());
    }

    #[test]
    fn missing_toggles_default_to_on() {
        let record = PetRecord::from_state(&busy_state()).unwrap();
        let mut json = serde_json::to_value(record).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("notifyFeed");
        obj.remove("notifyBath");
        obj.remove("notifyToilet");
        let back: PetRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.into_state().notifications, NotificationPrefs::default());
    }
}
