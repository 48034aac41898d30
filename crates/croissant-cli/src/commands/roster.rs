//! Roster overview commands.

use clap::Subcommand;
use croissant_core::{Config, RosterStore};

#[derive(Subcommand)]
pub enum RosterAction {
    /// Dump every ledger as JSON
    Show,
    /// People who currently owe croissants
    Owing,
    /// Sort the roster by name and save it
    Sort,
}

pub fn run(action: RosterAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = RosterStore::open(config.root()?)?;
    let mut roster = store.load(config.slots)?;

    match action {
        RosterAction::Show => {
            println!("{}", serde_json::to_string_pretty(&roster)?);
        }
        RosterAction::Owing => {
            let owing: Vec<_> = roster
                .ledgers()
                .iter()
                .filter(|ledger| ledger.owes_croissants())
                .collect();
            if owing.is_empty() {
                println!("Nobody owes croissants.");
            } else {
                for ledger in owing {
                    println!("{} ({})", ledger.person(), ledger.person().perso_id);
                }
            }
        }
        RosterAction::Sort => {
            roster.sort_by_name();
            store.save(&roster)?;
            println!("Roster sorted: {} ledger(s)", roster.len());
        }
    }
    Ok(())
}
