//! Deposits into pending, drains into the wallet, and spends from the wallet.

use calpet_types::PetState;
use tracing::debug;

use crate::LedgerError;

/// Credit `delta` energy to the pending bucket. Returns the new pending
/// balance.
///
/// A zero delta is accepted and changes nothing, matching a sync that found
/// no new samples.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the pending balance would overflow.
pub fn deposit_pending(state: &mut PetState, delta: u64) -> Result<u64, LedgerError> {
    let pending = state
        .pending_energy
        .checked_add(delta)
        .ok_or(LedgerError::Overflow {
            context: "pending deposit",
        })?;
    state.pending_energy = pending;
    if delta > 0 {
        debug!(delta, pending, "Energy deposited to pending");
    }
    Ok(pending)
}

/// Move the entire pending balance into the wallet. Returns the amount moved.
///
/// Idempotent: once pending is empty, further calls return 0 and change
/// nothing.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if the wallet would overflow. Neither
/// bucket is modified in that case.
pub fn drain_pending_to_wallet(state: &mut PetState) -> Result<u64, LedgerError> {
    let drained = state.pending_energy;
    if drained == 0 {
        return Ok(0);
    }
    let wallet = state
        .wallet_energy
        .checked_add(drained)
        .ok_or(LedgerError::Overflow {
            context: "wallet drain",
        })?;
    state.wallet_energy = wallet;
    state.pending_energy = 0;
    debug!(drained, wallet, "Pending energy drained to wallet");
    Ok(drained)
}

/// Whether the wallet holds at least `amount` settled energy.
pub const fn can_afford(state: &PetState, amount: u64) -> bool {
    state.wallet_energy >= amount
}

/// Debit `amount` from the wallet. Returns the wallet balance afterwards.
///
/// # Errors
///
/// - [`LedgerError::ZeroAmount`] if `amount` is 0.
/// - [`LedgerError::InsufficientFunds`] if the wallet holds less than
///   `amount`. The wallet is left unchanged.
pub fn spend(state: &mut PetState, amount: u64) -> Result<u64, LedgerError> {
    if amount == 0 {
        return Err(LedgerError::ZeroAmount);
    }
    let wallet = state
        .wallet_energy
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientFunds {
            requested: amount,
            available: state.wallet_energy,
        })?;
    state.wallet_energy = wallet;
    debug!(amount, wallet, "Energy spent");
    Ok(wallet)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use calpet_types::Calendar;
    use chrono::Utc;

    use super::*;

    fn fresh() -> PetState {
        PetState::new(Utc::now(), &Calendar::utc())
    }

    #[test]
    fn deposit_accumulates_in_pending_only() {
        let mut state = fresh();
        assert_eq!(deposit_pending(&mut state, 120), Ok(120));
        assert_eq!(deposit_pending(&mut state, 30), Ok(150));
        assert_eq!(state.pending_energy, 150);
        assert_eq!(state.wallet_energy, 0);
    }

    #[test]
    fn zero_deposit_is_a_no_op() {
        let mut state = fresh();
        assert_eq!(deposit_pending(&mut state, 0), Ok(0));
        assert_eq!(state.pending_energy, 0);
    }

    #[test]
    fn drain_moves_everything_and_is_idempotent() {
        let mut state = fresh();
        state.wallet_energy = 10;
        deposit_pending(&mut state, 250).unwrap();
        assert_eq!(drain_pending_to_wallet(&mut state), Ok(250));
        assert_eq!(state.wallet_energy, 260);
        assert_eq!(state.pending_energy, 0);
        // Second drain finds nothing.
        assert_eq!(drain_pending_to_wallet(&mut state), Ok(0));
        assert_eq!(state.wallet_energy, 260);
    }

    #[test]
    fn drain_overflow_leaves_buckets_untouched() {
        let mut state = fresh();
        state.wallet_energy = u64::MAX;
        state.pending_energy = 1;
        assert!(drain_pending_to_wallet(&mut state).is_err());
        assert_eq!(state.wallet_energy, u64::MAX);
        assert_eq!(state.pending_energy, 1);
    }

    #[test]
    fn spend_debits_wallet() {
        let mut state = fresh();
        state.wallet_energy = 500;
        assert_eq!(spend(&mut state, 190), Ok(310));
        assert_eq!(state.wallet_energy, 310);
    }

    #[test]
    fn spend_exact_balance_reaches_zero() {
        let mut state = fresh();
        state.wallet_energy = 190;
        assert_eq!(spend(&mut state, 190), Ok(0));
        assert!(!can_afford(&state, 1));
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut state = fresh();
        state.wallet_energy = 100;
        state.pending_energy = 1000;
        let result = spend(&mut state, 101);
        assert_eq!(
            result,
            Err(LedgerError::InsufficientFunds {
                requested: 101,
                available: 100,
            })
        );
        // Pending energy is not spendable and nothing changed.
        assert_eq!(state.wallet_energy, 100);
        assert_eq!(state.pending_energy, 1000);
    }

    #[test]
    fn spend_zero_is_rejected() {
        let mut state = fresh();
        state.wallet_energy = 100;
        assert_eq!(spend(&mut state, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(state.wallet_energy, 100);
    }
}
