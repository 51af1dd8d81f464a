//! Owned pet collection.

use calpet_types::{PET_CATALOG, PetCatalogEntry, PetId, PetState, STARTER_PET_ID};
use tracing::{info, warn};

/// Give a state with an empty collection the starter pet.
///
/// Returns `true` if the starter pet was granted.
pub fn ensure_initial_pets(state: &mut PetState) -> bool {
    if !state.owned_pet_ids.is_empty() {
        return false;
    }
    warn!("Owned pet list was empty; granting the starter pet");
    let starter = PetId::from(STARTER_PET_ID);
    state.owned_pet_ids.push(starter.clone());
    state.current_pet_id = starter;
    true
}

/// Catalog pets not yet collected, in catalog order.
pub fn unowned_pets(state: &PetState) -> Vec<&'static PetCatalogEntry> {
    PET_CATALOG
        .iter()
        .filter(|entry| !state.owns_pet(&PetId::from(entry.id)))
        .collect()
}

/// Add `id` to the collection and make it the current pet.
///
/// Already-owned pets are not duplicated; they only become current.
pub fn adopt_pet(state: &mut PetState, id: PetId) {
    if !state.owns_pet(&id) {
        state.owned_pet_ids.push(id.clone());
    }
    info!(pet = %id, owned = state.owned_pet_ids.len(), "Pet adopted");
    state.current_pet_id = id;
}
