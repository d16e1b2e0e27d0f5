// 💵 Denominations - The five banknote face values a cash machine handles
//
// Denomination identity is the key of every MoneyStash field, so it lives
// in its own closed enum instead of being encoded in field names.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// DENOMINATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Denomination {
    Five,
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl Denomination {
    /// All denominations, smallest first
    pub const ALL: [Denomination; 5] = [
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::Hundred,
    ];

    /// Face value of one banknote
    pub fn face_value(&self) -> i64 {
        match self {
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::Hundred => 100,
        }
    }

    /// Look up a denomination by its face value
    ///
    /// Example: `from_face_value(20)` → `Some(Denomination::Twenty)`
    pub fn from_face_value(value: i64) -> Option<Denomination> {
        Denomination::ALL
            .iter()
            .copied()
            .find(|d| d.face_value() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Denomination::Five => "five",
            Denomination::Ten => "ten",
            Denomination::Twenty => "twenty",
            Denomination::Fifty => "fifty",
            Denomination::Hundred => "hundred",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face_value())
    }
}

// ============================================================================
// TESTS
// ============================================================================
