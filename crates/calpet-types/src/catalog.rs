//! Static reference tables: the food catalog and the pet catalog.
//!
//! Both tables are compiled in and are not externally configurable. Their
//! ids are persisted inside the player's record (inventory keys, owned pet
//! list), so existing ids must never be renamed or removed.

use serde::{Deserialize, Serialize};

/// Id of the pet every new install starts with.
pub const STARTER_PET_ID: &str = "pet_000";

/// One purchasable food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodCatalogEntry {
    /// Stable id used as the inventory key.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Shop price in energy (kcal). Always positive.
    pub price_energy: u64,
}

/// Temperament label attached to each pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Lively and excitable.
    Energetic,
    /// Calm and easygoing.
    Gentle,
    /// Aloof on the surface, fond underneath.
    Tsundere,
    /// Earnest and well-behaved.
    Diligent,
}

/// One collectible pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetCatalogEntry {
    /// Stable id stored in the owned pet list.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Temperament label.
    pub personality: Personality,
}

/// Every food item the daily shop can offer (19 entries).
pub static FOOD_CATALOG: [FoodCatalogEntry; 19] = [
    food("onigiri", "Rice Ball", 190),
    food("gyuudon", "Beef Bowl", 650),
    food("karaage", "Fried Chicken", 450),
    food("sandowitch", "Sandwich", 380),
    food("nabe", "Hot Pot", 500),
    food("barger", "Hamburger", 490),
    food("ra-men", "Ramen", 480),
    food("sute-ki", "Steak", 550),
    food("pizza", "Pizza", 640),
    food("cake", "Cake", 480),
    food("poteti", "Potato Chips", 325),
    food("icecream", "Soft Serve", 250),
    food("coffee", "Coffee", 8),
    food("coke", "Cola", 160),
    food("carry", "Curry Rice", 750),
    food("sarad", "Salad", 150),
    food("yo-guruto", "Yogurt", 56),
    food("pan", "Bread", 150),
    food("beer", "Beer", 135),
];

/// Every pet an egg can hatch into (6 entries).
pub static PET_CATALOG: [PetCatalogEntry; 6] = [
    pet(STARTER_PET_ID, "First Friend", Personality::Energetic),
    pet("pet_001", "Fluffy", Personality::Gentle),
    pet("pet_002", "Prickles", Personality::Tsundere),
    pet("pet_003", "Tidy", Personality::Diligent),
    pet("pet_004", "Bunbun", Personality::Energetic),
    pet("pet_005", "Kumaron", Personality::Gentle),
];

const fn food(id: &'static str, name: &'static str, price_energy: u64) -> FoodCatalogEntry {
    FoodCatalogEntry {
        id,
        name,
        price_energy,
    }
}

const fn pet(id: &'static str, name: &'static str, personality: Personality) -> PetCatalogEntry {
    PetCatalogEntry {
        id,
        name,
        personality,
    }
}

/// Look up a food catalog entry by id.
pub fn food_by_id(id: &str) -> Option<&'static FoodCatalogEntry> {
    FOOD_CATALOG.iter().find(|entry| entry.id == id)
}

/// Look up a pet catalog entry by id.
pub fn pet_by_id(id: &str) -> Option<&'static PetCatalogEntry> {
    PET_CATALOG.iter().find(|entry| entry.id == id)
}
