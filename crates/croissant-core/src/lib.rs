//! # Croissant Core Library
//!
//! Core business logic for the croissant penalty tracker. Missed daily
//! submissions are recorded on a person's fixed array of penalty slots.
//! Escalation rules decide how many slots a missed date costs, and a
//! person who fills every slot owes the team croissants and permanently
//! loses one slot of headroom until someone reactivates it.
//!
//! ## Architecture
//!
//! - **Ledger**: the per-person slot array state machine with its
//!   insertion, removal, and reactivation operations
//! - **Escalation**: pure weekday and whole-week rules pricing a missed
//!   date at one to three slots
//! - **Storage**: JSON roster persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Ledger`]: one person's slots, history, and croissant debt
//! - [`Roster`]: every tracked person's ledger
//! - [`RosterStore`]: roster file persistence
//! - [`Config`]: application configuration management

pub mod slot;
pub mod sort;
pub mod escalation;
pub mod person;
pub mod ledger;
pub mod events;
pub mod roster;
pub mod storage;
pub mod error;

pub use slot::{Slot, SlotState};
pub use sort::SortDirection;
pub use person::Person;
pub use ledger::Ledger;
pub use events::LedgerEvent;
pub use roster::Roster;
pub use storage::{Config, RosterStore};
pub use error::{ConfigError, CoreError, LedgerError, RosterError, StoreError};
