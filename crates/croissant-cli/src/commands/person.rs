//! People management commands.

use clap::Subcommand;
use croissant_core::{Config, Person, RosterError, RosterStore};

#[derive(Subcommand)]
pub enum PersonAction {
    /// Add a person to the roster
    Add {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Identifier (default: derived from the name)
        #[arg(long)]
        id: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Slot count for the new ledger (default: from config)
        #[arg(long)]
        slots: Option<usize>,
    },
    /// Remove a person and their ledger
    Remove {
        /// Person identifier
        perso_id: String,
    },
    /// Update a person's details
    Update {
        /// Person identifier
        perso_id: String,
        /// New first name
        #[arg(long)]
        first_name: Option<String>,
        /// New last name
        #[arg(long)]
        last_name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
    },
    /// List everyone on the roster
    List,
}

pub fn run(action: PersonAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = RosterStore::open(config.root()?)?;
    let mut roster = store.load(config.slots)?;

    match action {
        PersonAction::Add {
            first_name,
            last_name,
            id,
            email,
            slots,
        } => {
            let perso_id = id.unwrap_or_else(|| Person::derive_id(&first_name, &last_name));
            let person = Person::new(first_name, last_name, perso_id.clone(), email);
            roster.add_person(person, slots.unwrap_or(config.slots))?;
            store.save(&roster)?;
            println!("Person added: {perso_id}");
        }
        PersonAction::Remove { perso_id } => {
            let ledger = roster.remove_person(&perso_id)?;
            store.save(&roster)?;
            println!(
                "Removed {} ({} penalty date(s) on the books)",
                ledger.person(),
                ledger.penalty_log().len()
            );
        }
        PersonAction::Update {
            perso_id,
            first_name,
            last_name,
            email,
        } => {
            {
                let ledger = roster
                    .ledger_mut(&perso_id)
                    .ok_or_else(|| RosterError::UnknownPerson(perso_id.clone()))?;
                let person = ledger.person_mut();
                if let Some(f) = first_name {
                    person.first_name = f;
                }
                if let Some(l) = last_name {
                    person.last_name = l;
                }
                if let Some(e) = email {
                    person.email = Some(e);
                }
            }
            store.save(&roster)?;

            if let Some(ledger) = roster.ledger(&perso_id) {
                println!("Person updated:");
                println!("{}", serde_json::to_string_pretty(ledger.person())?);
            }
        }
        PersonAction::List => {
            roster.sort_by_name();
            for ledger in roster.ledgers() {
                let marker = if ledger.owes_croissants() {
                    "  [owes croissants]"
                } else {
                    ""
                };
                println!(
                    "{}  {} ({}/{} slots used){}",
                    ledger.person().perso_id,
                    ledger.person(),
                    ledger.used_count(),
                    ledger.limit(),
                    marker
                );
            }
        }
    }
    Ok(())
}
