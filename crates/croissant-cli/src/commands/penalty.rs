//! Penalty commands: record, clear, and inspect missed dates.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use croissant_core::{Config, LedgerEvent, RosterError, RosterStore};

#[derive(Subcommand)]
pub enum PenaltyAction {
    /// Record a missed date on a person's ledger
    Add {
        /// Person identifier
        perso_id: String,
        /// Missed date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Clear a recorded date from a person's ledger
    Remove {
        /// Person identifier
        perso_id: String,
        /// Date to clear, YYYY-MM-DD (default: today)
        #[arg(long, conflicts_with = "slot")]
        date: Option<NaiveDate>,
        /// Clear the date held by this slot instead
        #[arg(long)]
        slot: Option<usize>,
    },
    /// Put the most recently deactivated slot back in service
    Reactivate {
        /// Person identifier
        perso_id: String,
    },
    /// Show a person's ledger
    Show {
        /// Person identifier
        perso_id: String,
    },
    /// List the dates recorded for a person
    Log {
        /// Person identifier
        perso_id: String,
    },
}

pub fn run(action: PenaltyAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = RosterStore::open(config.root()?)?;
    let mut roster = store.load(config.slots)?;

    match action {
        PenaltyAction::Add { perso_id, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let event = {
                let ledger = roster
                    .ledger_mut(&perso_id)
                    .ok_or_else(|| RosterError::UnknownPerson(perso_id.clone()))?;
                ledger.add_penalty(date)?
            };
            store.save(&roster)?;

            if let LedgerEvent::PenaltyAdded {
                units,
                exhaustions,
                owes_croissants,
                ..
            } = event
            {
                println!("Penalty recorded for {perso_id} on {date}: {units} unit(s)");
                if exhaustions > 0 {
                    println!("Ledger exhausted! One slot permanently deactivated.");
                }
                if owes_croissants {
                    println!("{perso_id} owes croissants.");
                }
            }
        }
        PenaltyAction::Remove {
            perso_id,
            date,
            slot,
        } => {
            let event = {
                let ledger = roster
                    .ledger_mut(&perso_id)
                    .ok_or_else(|| RosterError::UnknownPerson(perso_id.clone()))?;
                match slot {
                    Some(index) => {
                        if !ledger.select(index) {
                            return Err(format!("no slot {index} on this ledger").into());
                        }
                        ledger
                            .remove_selected()
                            .ok_or("the selected slot holds no penalty")?
                    }
                    None => {
                        let date = date.unwrap_or_else(|| Local::now().date_naive());
                        ledger.remove_penalty(date)
                    }
                }
            };
            store.save(&roster)?;

            if let LedgerEvent::PenaltyRemoved { date, cleared } = event {
                if cleared == 0 {
                    println!("No penalty recorded on {date}");
                } else {
                    println!("Cleared {cleared} slot(s) stamped {date}");
                }
            }
        }
        PenaltyAction::Reactivate { perso_id } => {
            let event = {
                let ledger = roster
                    .ledger_mut(&perso_id)
                    .ok_or_else(|| RosterError::UnknownPerson(perso_id.clone()))?;
                ledger.reactivate()?
            };
            store.save(&roster)?;

            if let LedgerEvent::SlotReactivated { index, limit } = event {
                println!("Slot {index} back in service; {limit} slot(s) usable");
            }
        }
        PenaltyAction::Show { perso_id } => {
            let ledger = roster
                .ledger(&perso_id)
                .ok_or_else(|| RosterError::UnknownPerson(perso_id.clone()))?;
            println!("{}", serde_json::to_string_pretty(ledger)?);
        }
        PenaltyAction::Log { perso_id } => {
            let ledger = roster
                .ledger(&perso_id)
                .ok_or_else(|| RosterError::UnknownPerson(perso_id.clone()))?;
            for date in ledger.penalty_log() {
                println!("{date}");
            }
        }
    }
    Ok(())
}
