// 🏧 ATM - A vault of banknotes with deposit and withdrawal
//
// The vault and its journal sit behind one RwLock, so an Arc<Atm> can be
// shared between callers and every read-modify-write is atomic. Mutations
// compute the new vault first and assign it last; a poisoned lock still
// holds a whole state.

use crate::change::make_change;
use crate::config::AtmConfig;
use crate::error::AtmError;
use crate::journal::{Journal, VaultEvent, VaultEventKind};
use crate::stash::MoneyStash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

struct AtmState {
    vault: MoneyStash,
    journal: Journal,
}

pub struct Atm {
    id: String,
    config: AtmConfig,
    state: RwLock<AtmState>,
}

impl Atm {
    /// ATM with an empty vault and default configuration
    pub fn new() -> Self {
        Self::build(AtmConfig::default(), MoneyStash::empty())
    }

    /// ATM starting with `vault` in it
    ///
    /// Negative counts are rejected with `AtmError::InvalidAmount`.
    pub fn with_vault(vault: MoneyStash) -> Result<Self, AtmError> {
        reject_negative(&vault)?;
        Ok(Self::build(AtmConfig::default(), vault))
    }

    pub fn from_config(config: AtmConfig) -> Result<Self, AtmError> {
        config.validate()?;
        let vault = config.initial_vault;
        let max_withdrawal = config.max_withdrawal;
        let atm = Self::build(config, vault);
        info!(atm = %atm.id, max_withdrawal, vault = %vault, "atm from config");
        Ok(atm)
    }

    fn build(config: AtmConfig, vault: MoneyStash) -> Self {
        Atm {
            id: uuid::Uuid::new_v4().to_string(),
            config,
            state: RwLock::new(AtmState {
                vault,
                journal: Journal::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &AtmConfig {
        &self.config
    }

    /// Snapshot of the vault
    pub fn vault(&self) -> MoneyStash {
        self.read().vault
    }

    pub fn total_value(&self) -> i128 {
        self.read().vault.total_value()
    }

    /// Journal snapshot, oldest event first
    ///
    /// The journal is unbounded, so this copy grows with every vault change.
    /// Use `with_history` to inspect it without copying.
    pub fn history(&self) -> Vec<VaultEvent> {
        self.read().journal.events().to_vec()
    }

    /// Run `f` over the journal while holding the read lock
    pub fn with_history<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[VaultEvent]) -> R,
    {
        f(self.read().journal.events())
    }

    /// Events of one kind, oldest first
    pub fn history_of(&self, kind: VaultEventKind) -> Vec<VaultEvent> {
        self.read().journal.by_kind(kind)
    }

    pub fn history_len(&self) -> usize {
        self.read().journal.len()
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Add every count in `amount` to the vault
    ///
    /// Fails without touching the vault if any count is negative or a
    /// resulting count would overflow.
    pub fn deposit(&self, amount: &MoneyStash) -> Result<(), AtmError> {
        if let Err(err) = reject_negative(amount) {
            warn!(atm = %self.id, %amount, "rejected deposit: {}", err);
            return Err(err);
        }

        let mut state = self.write();
        let mut vault = state.vault;
        for (denomination, count) in amount.iter() {
            match vault.count(denomination).checked_add(count) {
                Some(total) => vault.set(denomination, total),
                None => {
                    warn!(atm = %self.id, %amount, %denomination, "rejected deposit: count overflow");
                    return Err(AtmError::CountOverflow { denomination });
                }
            }
        }

        state.vault = vault;
        let event = VaultEvent::new(VaultEventKind::Deposit, *amount, vault);
        debug!(atm = %self.id, %amount, value = event.value(), vault = %vault, "deposit");
        state.journal.record(event);
        Ok(())
    }

    /// Pay out the whole vault and leave it empty
    pub fn withdraw_all(&self) -> MoneyStash {
        let mut state = self.write();
        let drained = std::mem::take(&mut state.vault);
        let event = VaultEvent::new(VaultEventKind::WithdrawAll, drained, MoneyStash::empty());
        debug!(atm = %self.id, notes = %drained, value = event.value(), "withdraw all");
        state.journal.record(event);
        drained
    }

    /// Pay out banknotes worth exactly `amount`
    ///
    /// Prefers large notes: of all exact combinations the one with the most
    /// 100s is chosen, then the most 50s, and so on down. `amount == 0`
    /// returns an empty stash and leaves the vault as it is.
    pub fn withdraw(&self, amount: i64) -> Result<MoneyStash, AtmError> {
        if amount < 0 {
            warn!(atm = %self.id, amount, "rejected negative withdrawal");
            return Err(AtmError::InvalidWithdrawal { amount });
        }
        if amount > self.config.max_withdrawal {
            warn!(atm = %self.id, amount, limit = self.config.max_withdrawal, "withdrawal over limit");
            return Err(AtmError::WithdrawalLimitExceeded {
                requested: amount,
                limit: self.config.max_withdrawal,
            });
        }
        if amount == 0 {
            return Ok(MoneyStash::empty());
        }

        let mut state = self.write();
        let notes = match make_change(&state.vault, amount) {
            Some(notes) => notes,
            None => {
                let available = state.vault.total_value();
                warn!(atm = %self.id, amount, available, "no exact change");
                return Err(AtmError::InsufficientExactChange {
                    requested: amount,
                    available,
                });
            }
        };

        // make_change never hands out more notes than the vault holds
        let mut vault = state.vault;
        for (denomination, count) in notes.iter() {
            vault.set(denomination, vault.count(denomination) - count);
        }

        state.vault = vault;
        let event = VaultEvent::new(VaultEventKind::Withdrawal, notes, vault);
        debug!(atm = %self.id, amount, %notes, vault = %vault, "withdrawal");
        state.journal.record(event);
        Ok(notes)
    }

    fn read(&self) -> RwLockReadGuard<'_, AtmState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AtmState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Atm {
    fn default() -> Self {
        Self::new()
    }
}

fn reject_negative(stash: &MoneyStash) -> Result<(), AtmError> {
    match stash.first_negative() {
        Some((denomination, count)) => Err(AtmError::InvalidAmount { denomination, count }),
        None => Ok(()),
    }
}

impl std::fmt::Debug for Atm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Atm")
            .field("id", &self.id)
            .field("vault", &self.vault())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denomination::Denomination;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_atm_is_empty() {
        let atm = Atm::new();
        assert!(!atm.id().is_empty());
        assert!(atm.vault().is_empty());
        assert!(atm.history().is_empty());
        assert_eq!(atm.withdraw_all(), MoneyStash::empty());
    }

    #[test]
    fn test_withdraw_all_on_empty_vault_is_journaled() {
        let atm = Atm::new();
        atm.withdraw_all();

        let history = atm.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, VaultEventKind::WithdrawAll);
        assert!(history[0].notes.is_empty());
        assert!(history[0].vault_after.is_empty());
    }

    #[test]
    fn test_deposit_exact_record() {
        let atm = Atm::new();
        let amount = MoneyStash::new(1, 2, 2, 2, 2);
        atm.deposit(&amount).unwrap();
        assert_eq!(atm.vault(), amount);
        assert_eq!(atm.total_value(), 365);
    }

    #[test]
    fn test_deposit_then_withdraw_all() {
        let atm = Atm::new();
        atm.deposit(&MoneyStash::of(Denomination::Five, 1)).unwrap();

        assert_eq!(atm.withdraw_all(), MoneyStash::new(1, 0, 0, 0, 0));
        assert_eq!(atm.vault(), MoneyStash::empty());
        assert_eq!(atm.withdraw_all(), MoneyStash::empty());
    }

    #[test]
    fn test_sequential_deposits_accumulate() {
        let atm = Atm::new();
        atm.deposit(&MoneyStash::of(Denomination::Five, 3)).unwrap();
        atm.deposit(&MoneyStash::of(Denomination::Five, 4)).unwrap();
        assert_eq!(atm.vault().five, 7);
    }

    #[test]
    fn test_negative_deposit_rejected() {
        let atm = Atm::with_vault(MoneyStash::new(1, 1, 1, 1, 1)).unwrap();
        let result = atm.deposit(&MoneyStash::new(2, 0, 0, -1, 0));

        assert_eq!(
            result,
            Err(AtmError::InvalidAmount {
                denomination: Denomination::Fifty,
                count: -1
            })
        );
        assert_eq!(atm.vault(), MoneyStash::new(1, 1, 1, 1, 1));
        assert!(atm.history().is_empty());
    }

    #[test]
    fn test_overflow_leaves_vault_untouched() {
        let atm = Atm::with_vault(MoneyStash::new(1, 0, 0, 0, i64::MAX)).unwrap();
        let result = atm.deposit(&MoneyStash::new(1, 0, 0, 0, 1));

        assert_eq!(
            result,
            Err(AtmError::CountOverflow {
                denomination: Denomination::Hundred
            })
        );
        assert_eq!(atm.vault(), MoneyStash::new(1, 0, 0, 0, i64::MAX));
        assert!(atm.history().is_empty());
    }

    #[test]
    fn test_with_vault_rejects_negative() {
        let result = Atm::with_vault(MoneyStash::new(-1, 0, 0, 0, 0));
        assert!(matches!(result, Err(AtmError::InvalidAmount { .. })));
    }

    #[test]
    fn test_withdraw_exact_amount() {
        let atm = Atm::with_vault(MoneyStash::new(2, 2, 2, 2, 2)).unwrap();
        let notes = atm.withdraw(170).unwrap();

        assert_eq!(notes, MoneyStash::new(0, 0, 1, 1, 1));
        assert_eq!(atm.vault(), MoneyStash::new(2, 2, 1, 1, 1));
    }

    #[test]
    fn test_withdraw_zero() {
        let atm = Atm::with_vault(MoneyStash::new(1, 1, 1, 1, 1)).unwrap();
        assert_eq!(atm.withdraw(0), Ok(MoneyStash::empty()));
        assert_eq!(atm.vault(), MoneyStash::new(1, 1, 1, 1, 1));
        assert!(atm.history().is_empty());
    }

    #[test]
    fn test_withdraw_without_exact_change() {
        let atm = Atm::with_vault(MoneyStash::of(Denomination::Fifty, 3)).unwrap();
        let result = atm.withdraw(70);

        assert_eq!(
            result,
            Err(AtmError::InsufficientExactChange {
                requested: 70,
                available: 150
            })
        );
        assert_eq!(atm.vault(), MoneyStash::of(Denomination::Fifty, 3));
        assert!(atm.history().is_empty());
    }

    #[test]
    fn test_withdraw_negative() {
        let atm = Atm::new();
        assert_eq!(
            atm.withdraw(-20),
            Err(AtmError::InvalidWithdrawal { amount: -20 })
        );
    }

    #[test]
    fn test_withdraw_over_limit() {
        let config = AtmConfig {
            max_withdrawal: 200,
            initial_vault: MoneyStash::of(Denomination::Hundred, 5),
        };
        let atm = Atm::from_config(config).unwrap();

        assert_eq!(
            atm.withdraw(300),
            Err(AtmError::WithdrawalLimitExceeded {
                requested: 300,
                limit: 200
            })
        );
        assert!(atm.history().is_empty());
        assert_eq!(atm.withdraw(200), Ok(MoneyStash::of(Denomination::Hundred, 2)));
        assert_eq!(atm.history_len(), 1);
    }

    #[test]
    fn test_from_config_rejects_unbounded_limit() {
        let config = AtmConfig {
            max_withdrawal: i64::MAX,
            initial_vault: MoneyStash::of(Denomination::Hundred, i64::MAX / 100),
        };
        assert!(matches!(
            Atm::from_config(config),
            Err(AtmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_history_of_and_with_history() {
        let atm = Atm::new();
        atm.deposit(&MoneyStash::of(Denomination::Ten, 4)).unwrap();
        atm.deposit(&MoneyStash::of(Denomination::Ten, 1)).unwrap();
        atm.withdraw(20).unwrap();

        let deposits = atm.history_of(VaultEventKind::Deposit);
        assert_eq!(deposits.len(), 2);
        assert_eq!(deposits[1].vault_after.ten, 5);
        assert_eq!(atm.history_of(VaultEventKind::WithdrawAll).len(), 0);

        let paid_out: i128 = atm.with_history(|events| {
            events
                .iter()
                .filter(|e| e.kind == VaultEventKind::Withdrawal)
                .map(|e| e.value())
                .sum()
        });
        assert_eq!(paid_out, 20);
        assert_eq!(atm.history_len(), 3);
    }

    #[test]
    fn test_history_records_each_change() {
        let atm = Atm::new();
        atm.deposit(&MoneyStash::new(0, 0, 5, 0, 0)).unwrap();
        atm.withdraw(40).unwrap();
        atm.withdraw_all();

        let history = atm.history();
        let kinds: Vec<VaultEventKind> = history.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                VaultEventKind::Deposit,
                VaultEventKind::Withdrawal,
                VaultEventKind::WithdrawAll
            ]
        );
        assert_eq!(history[0].vault_after.twenty, 5);
        assert_eq!(history[1].notes.twenty, 2);
        assert_eq!(history[1].vault_after.twenty, 3);
        assert_eq!(history[2].notes.twenty, 3);
        assert!(history[2].vault_after.is_empty());
    }

    #[test]
    fn test_concurrent_deposits() {
        let atm = Arc::new(Atm::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let atm = Arc::clone(&atm);
                thread::spawn(move || {
                    for _ in 0..100 {
                        atm.deposit(&MoneyStash::new(1, 0, 1, 0, 1)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(atm.vault(), MoneyStash::new(800, 0, 800, 0, 800));
        assert_eq!(atm.history().len(), 800);
    }
}
