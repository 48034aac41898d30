//! The roster: every tracked person's ledger, in display order.

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::ledger::Ledger;
use crate::person::Person;

/// An ordered collection of ledgers, one per person. Persists as a plain
/// array of ledger records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    ledgers: Vec<Ledger>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from bare person records, giving each a fresh
    /// ledger of `slots` slots.
    pub fn from_people(people: Vec<Person>, slots: usize) -> Self {
        Self {
            ledgers: people
                .into_iter()
                .map(|person| Ledger::with_capacity(person, slots))
                .collect(),
        }
    }

    pub fn ledgers(&self) -> &[Ledger] {
        &self.ledgers
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    pub fn contains(&self, perso_id: &str) -> bool {
        self.ledger(perso_id).is_some()
    }

    pub fn ledger(&self, perso_id: &str) -> Option<&Ledger> {
        self.ledgers
            .iter()
            .find(|ledger| ledger.person().perso_id == perso_id)
    }

    pub fn ledger_mut(&mut self, perso_id: &str) -> Option<&mut Ledger> {
        self.ledgers
            .iter_mut()
            .find(|ledger| ledger.person().perso_id == perso_id)
    }

    /// Adds a person with a fresh ledger of `slots` slots. Identifiers
    /// must be unique across the roster.
    pub fn add_person(&mut self, person: Person, slots: usize) -> Result<(), RosterError> {
        if self.contains(&person.perso_id) {
            return Err(RosterError::DuplicatePerson(person.perso_id.clone()));
        }
        self.ledgers.push(Ledger::with_capacity(person, slots));
        Ok(())
    }

    /// Removes a person, returning their ledger for a last look at the
    /// history.
    pub fn remove_person(&mut self, perso_id: &str) -> Result<Ledger, RosterError> {
        match self
            .ledgers
            .iter()
            .position(|ledger| ledger.person().perso_id == perso_id)
        {
            Some(index) => Ok(self.ledgers.remove(index)),
            None => Err(RosterError::UnknownPerson(perso_id.to_string())),
        }
    }

    /// Orders the roster by person name, first name first.
    pub fn sort_by_name(&mut self) {
        self.ledgers
            .sort_by(|a, b| a.person().cmp(b.person()));
    }
}
