// 💰 MoneyStash - Banknote counts keyed by denomination
//
// A fixed-shape record: one count per denomination. It is plain data, so it
// can hold whatever a caller hands in (including negative counts); the ATM
// validates before anything reaches its vault.

use crate::denomination::Denomination;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// MONEY STASH
// ============================================================================

/// Count of banknotes per denomination
///
/// Missing fields deserialize as zero, so `{"fifty": 2}` is a valid stash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyStash {
    pub five: i64,
    pub ten: i64,
    pub twenty: i64,
    pub fifty: i64,
    pub hundred: i64,
}

impl MoneyStash {
    pub fn new(five: i64, ten: i64, twenty: i64, fifty: i64, hundred: i64) -> Self {
        MoneyStash {
            five,
            ten,
            twenty,
            fifty,
            hundred,
        }
    }

    /// All-zero stash
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stash holding `count` notes of a single denomination
    pub fn of(denomination: Denomination, count: i64) -> Self {
        let mut stash = Self::empty();
        stash.set(denomination, count);
        stash
    }

    pub fn count(&self, denomination: Denomination) -> i64 {
        match denomination {
            Denomination::Five => self.five,
            Denomination::Ten => self.ten,
            Denomination::Twenty => self.twenty,
            Denomination::Fifty => self.fifty,
            Denomination::Hundred => self.hundred,
        }
    }

    pub fn set(&mut self, denomination: Denomination, count: i64) {
        match denomination {
            Denomination::Five => self.five = count,
            Denomination::Ten => self.ten = count,
            Denomination::Twenty => self.twenty = count,
            Denomination::Fifty => self.fifty = count,
            Denomination::Hundred => self.hundred = count,
        }
    }

    /// `(denomination, count)` pairs, smallest denomination first
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, i64)> + '_ {
        Denomination::ALL.iter().map(move |&d| (d, self.count(d)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, count)| count == 0)
    }

    /// Total number of banknotes
    pub fn note_count(&self) -> i128 {
        self.iter().map(|(_, count)| count as i128).sum()
    }

    /// Total face value
    ///
    /// Computed in i128: five i64 counts times at most 100 cannot overflow.
    pub fn total_value(&self) -> i128 {
        self.iter()
            .map(|(d, count)| count as i128 * d.face_value() as i128)
            .sum()
    }

    /// Smallest denomination holding a negative count, if any
    pub fn first_negative(&self) -> Option<(Denomination, i64)> {
        self.iter().find(|&(_, count)| count < 0)
    }

    /// Fieldwise sum, `None` if any count overflows
    pub fn checked_add(&self, other: &MoneyStash) -> Option<MoneyStash> {
        self.checked_zip(other, i64::checked_add)
    }

    /// Fieldwise difference, `None` if any count overflows
    pub fn checked_sub(&self, other: &MoneyStash) -> Option<MoneyStash> {
        self.checked_zip(other, i64::checked_sub)
    }

    fn checked_zip<F>(&self, other: &MoneyStash, op: F) -> Option<MoneyStash>
    where
        F: Fn(i64, i64) -> Option<i64>,
    {
        let mut result = MoneyStash::empty();
        for d in Denomination::ALL {
            result.set(d, op(self.count(d), other.count(d))?);
        }
        Some(result)
    }
}

impl fmt::Display for MoneyStash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(d, count)| format!("{}×{}", d, count))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

// ============================================================================
// TESTS
// ============================================================================
