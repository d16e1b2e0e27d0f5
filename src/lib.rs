// Cash Machine - Core Library
// A vault of five banknote denominations with deposit and withdrawal

pub mod denomination;
pub mod stash;
pub mod change;
pub mod journal;
pub mod config;
pub mod error;
pub mod atm;

// Re-export commonly used types
pub use denomination::Denomination;
pub use stash::MoneyStash;
pub use change::make_change;
pub use journal::{VaultEvent, VaultEventKind};
pub use config::{AtmConfig, DEFAULT_MAX_WITHDRAWAL, MAX_WITHDRAWAL_LIMIT};
pub use error::AtmError;
pub use atm::Atm;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
