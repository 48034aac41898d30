pub mod config;
pub mod penalty;
pub mod person;
pub mod roster;
