// 📜 Vault Journal - Audit trail of every vault change
//
// Each deposit or withdrawal appends one immutable VaultEvent. The journal
// lives in memory for the lifetime of the ATM; nothing is persisted.

use crate::stash::MoneyStash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// EVENT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEventKind {
    /// Notes added to the vault
    Deposit,

    /// An exact amount paid out
    Withdrawal,

    /// Whole vault paid out
    WithdrawAll,
}

impl VaultEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultEventKind::Deposit => "deposit",
            VaultEventKind::Withdrawal => "withdrawal",
            VaultEventKind::WithdrawAll => "withdraw_all",
        }
    }
}

// ============================================================================
// VAULT EVENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultEvent {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: VaultEventKind,
    /// Notes moved in or out by this event
    pub notes: MoneyStash,
    pub vault_after: MoneyStash,
}

impl VaultEvent {
    pub fn new(kind: VaultEventKind, notes: MoneyStash, vault_after: MoneyStash) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            notes,
            vault_after,
        }
    }

    /// Face value moved by this event
    pub fn value(&self) -> i128 {
        self.notes.total_value()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "event_id": self.event_id,
            "timestamp": self.timestamp.to_rfc3339(),
            "kind": self.kind.as_str(),
            "notes": self.notes,
            "vault_after": self.vault_after,
        })
    }
}

// ============================================================================
// JOURNAL
// ============================================================================

/// Append-only list of vault events, oldest first
///
/// Unbounded: it grows by one event per vault change for the lifetime of
/// the owning ATM.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    events: Vec<VaultEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: VaultEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn by_kind(&self, kind: VaultEventKind) -> Vec<VaultEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
