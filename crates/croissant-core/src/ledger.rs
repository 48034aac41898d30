//! A person's penalty ledger: a fixed-length array of slots plus the
//! operations that mutate it.
//!
//! The ledger maintains two structural invariants. Capacity: the number of
//! Used slots never exceeds the number of non-Deactivated slots. Contiguity:
//! deactivated slots always form one run at the high-index end of the array,
//! grown downward by exhaustion and shrunk upward by reactivation. The run
//! is tracked as an explicit start index instead of being re-derived by
//! scanning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::escalation;
use crate::events::LedgerEvent;
use crate::person::Person;
use crate::slot::{Slot, SlotState};
use crate::sort::{self, SortDirection};

/// One person's slots and penalty history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LedgerRecord", into = "LedgerRecord")]
pub struct Ledger {
    person: Person,
    slots: Vec<Slot>,
    /// Start index of the deactivated run; equals `slots.len()` when no
    /// slot is deactivated.
    deactivated_from: usize,
    /// Dates penalized so far, in insertion order. A date can appear twice
    /// when it was penalized again after an exhaustion wiped its stamp.
    penalty_log: Vec<NaiveDate>,
    owes_croissants: bool,
    /// Transient interactive selection; never persisted.
    selected: Option<usize>,
}

impl Ledger {
    /// Slot count used when none is configured.
    pub const DEFAULT_SLOTS: usize = 10;

    pub fn new(person: Person) -> Self {
        Self::with_capacity(person, Self::DEFAULT_SLOTS)
    }

    /// Creates a ledger with `capacity` fresh slots. The capacity is fixed
    /// for the ledger's lifetime; only deactivation changes how many of the
    /// slots are usable.
    pub fn with_capacity(person: Person, capacity: usize) -> Self {
        Self {
            person,
            slots: vec![Slot::new(); capacity],
            deactivated_from: capacity,
            penalty_log: Vec::new(),
            owes_croissants: false,
            selected: None,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Configured slot count, deactivated slots included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently holding a penalty date.
    pub fn used_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state() == SlotState::Used)
            .count()
    }

    /// Usable capacity: the number of slots not permanently deactivated.
    pub fn limit(&self) -> usize {
        self.deactivated_from
    }

    pub fn owes_croissants(&self) -> bool {
        self.owes_croissants
    }

    /// Dates penalized so far, oldest first.
    pub fn penalty_log(&self) -> &[NaiveDate] {
        &self.penalty_log
    }

    /// The most recent date stamped on any slot, if any.
    pub fn last_penalty_date(&self) -> Option<NaiveDate> {
        self.slots.iter().filter_map(Slot::date).max()
    }

    /// Index the next exhaustion will deactivate: the highest-index slot
    /// still in service, or 0 when every slot is already deactivated.
    pub fn next_index_to_deactivate(&self) -> usize {
        self.deactivated_from.saturating_sub(1)
    }

    /// One past `next_index_to_deactivate`: the exclusive upper bound of
    /// the region where a new date may be inserted.
    pub fn last_deactivated_boundary(&self) -> usize {
        self.next_index_to_deactivate() + 1
    }

    /// Records a penalty for `date`.
    ///
    /// The escalation rules decide how many units the date costs (1 to 3);
    /// each unit is applied against the ledger state left by the previous
    /// one, so a later unit can itself exhaust the ledger. A date already
    /// stamped on any slot is rejected whole, leaving the ledger untouched.
    pub fn add_penalty(&mut self, date: NaiveDate) -> Result<LedgerEvent, LedgerError> {
        if self.slots.iter().any(|slot| slot.date() == Some(date)) {
            return Err(LedgerError::DuplicatePenaltyDate(date));
        }

        let units = escalation::units(&self.slots, date);
        let mut exhaustions = 0;
        for _ in 0..units {
            if self.apply_unit(date) {
                exhaustions += 1;
            }
        }
        self.penalty_log.push(date);
        self.selected = None;

        Ok(LedgerEvent::PenaltyAdded {
            date,
            units,
            exhaustions,
            owes_croissants: self.owes_croissants,
        })
    }

    /// Applies one penalty unit. Returns true when the unit hit a full
    /// ledger and triggered an exhaustion instead of an insertion.
    fn apply_unit(&mut self, date: NaiveDate) -> bool {
        if self.used_count() < self.limit() {
            self.insert_date(date);
            false
        } else {
            self.exhaust();
            true
        }
    }

    /// Inserts `date` among the in-service slots, keeping stamped dates in
    /// ascending order at the low end of the array.
    fn insert_date(&mut self, date: NaiveDate) {
        let boundary = self.last_deactivated_boundary();
        let mut index = 0;
        while index < boundary && matches!(self.slots[index].date(), Some(d) if d <= date) {
            index += 1;
        }

        // Shift stamped dates one position toward the deactivation cursor,
        // right to left, vacating the insertion point.
        let mut target = self.next_index_to_deactivate();
        while target > index {
            let shifted = self.slots[target - 1].date();
            self.slots[target].set_date(shifted);
            target -= 1;
        }

        self.slots[index].set_date(Some(date));
    }

    /// The exhaustion penalty: every stamp on the ledger is wiped and the
    /// highest in-service slot is permanently deactivated. The person now
    /// owes croissants.
    fn exhaust(&mut self) {
        for slot in &mut self.slots {
            slot.set_date(None);
        }

        let index = self.next_index_to_deactivate();
        self.slots[index].deactivate();
        self.deactivated_from = index;
        self.owes_croissants = true;
    }

    /// Clears every stamp equal to `date` and compacts the remaining dates
    /// back to the low end of the array.
    ///
    /// Only the stamps are undone. Extra units charged by escalation for
    /// `date`, and any capacity lost to a later exhaustion, stay as they
    /// are. A date matching no slot is a no-op with `cleared` 0.
    pub fn remove_penalty(&mut self, date: NaiveDate) -> LedgerEvent {
        let mut cleared = 0;
        for slot in &mut self.slots {
            if slot.date() == Some(date) {
                slot.set_date(None);
                cleared += 1;
            }
        }

        if cleared > 0 {
            sort::sort_slots(&mut self.slots, SortDirection::Ascending);
            self.penalty_log.retain(|logged| *logged != date);
            self.selected = None;
        }

        LedgerEvent::PenaltyRemoved { date, cleared }
    }

    /// Puts the most recently deactivated slot back in service and clears
    /// the croissant debt. Fails when every slot is in service.
    pub fn reactivate(&mut self) -> Result<LedgerEvent, LedgerError> {
        if self.deactivated_from >= self.slots.len() {
            return Err(LedgerError::NoDeactivatedSlot);
        }

        let index = self.deactivated_from;
        self.slots[index].reactivate();
        self.deactivated_from = index + 1;
        self.owes_croissants = false;
        self.selected = None;

        Ok(LedgerEvent::SlotReactivated {
            index,
            limit: self.limit(),
        })
    }

    /// Marks a slot for interactive removal. Returns false when the index
    /// is out of range, leaving any previous selection in place.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.slots.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_slot(&self) -> Option<&Slot> {
        self.selected.and_then(|index| self.slots.get(index))
    }

    /// Removes the penalty stamped on the selected slot. Returns None when
    /// nothing is selected or the selected slot has no date.
    pub fn remove_selected(&mut self) -> Option<LedgerEvent> {
        let date = self.selected_slot().and_then(Slot::date)?;
        Some(self.remove_penalty(date))
    }
}

/// Persisted shape of a ledger. The deactivated-run index and the
/// interactive selection are not stored; the run index is rebuilt from the
/// slot states on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerRecord {
    person: Person,
    slots: Vec<Slot>,
    capacity: usize,
    #[serde(default)]
    penalty_log: Vec<NaiveDate>,
    #[serde(default)]
    owes_croissants: bool,
}

impl From<LedgerRecord> for Ledger {
    fn from(record: LedgerRecord) -> Self {
        // Hand-seeded records may list a person with no slots; give them a
        // fresh array of the declared capacity.
        let slots = if record.slots.is_empty() {
            let capacity = if record.capacity > 0 {
                record.capacity
            } else {
                Ledger::DEFAULT_SLOTS
            };
            vec![Slot::new(); capacity]
        } else {
            record.slots
        };

        let deactivated_from = slots
            .iter()
            .rposition(|slot| slot.state() != SlotState::Deactivated)
            .map_or(0, |index| index + 1);

        Self {
            person: record.person,
            slots,
            deactivated_from,
            penalty_log: record.penalty_log,
            owes_croissants: record.owes_croissants,
            selected: None,
        }
    }
}

impl From<Ledger> for LedgerRecord {
    fn from(ledger: Ledger) -> Self {
        Self {
            capacity: ledger.slots.len(),
            person: ledger.person,
            slots: ledger.slots,
            penalty_log: ledger.penalty_log,
            owes_croissants: ledger.owes_croissants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn someone() -> Person {
        Person::new("Ada", "Lovelace", "ada.lovelace", None)
    }

    fn fresh() -> Ledger {
        Ledger::new(someone())
    }

    fn states(ledger: &Ledger) -> Vec<SlotState> {
        ledger.slots().iter().map(Slot::state).collect()
    }

    fn dates(ledger: &Ledger) -> Vec<Option<NaiveDate>> {
        ledger.slots().iter().map(Slot::date).collect()
    }

    /// Fills all ten default slots using five Mondays (two units each).
    fn fully_used() -> Ledger {
        let mut ledger = fresh();
        for day in [1, 8, 15, 22, 29] {
            ledger.add_penalty(d(2024, 1, day)).unwrap();
        }
        assert_eq!(ledger.used_count(), 10);
        ledger
    }

    #[test]
    fn new_ledger_has_default_capacity_all_available() {
        let ledger = fresh();
        assert_eq!(ledger.capacity(), Ledger::DEFAULT_SLOTS);
        assert_eq!(ledger.limit(), 10);
        assert_eq!(ledger.used_count(), 0);
        assert!(!ledger.owes_croissants());
        assert!(states(&ledger)
            .iter()
            .all(|state| *state == SlotState::Available));
    }

    #[test]
    fn monday_penalty_consumes_two_slots() {
        let mut ledger = fresh();
        let event = ledger.add_penalty(d(2024, 1, 1)).unwrap();

        assert_eq!(
            event,
            LedgerEvent::PenaltyAdded {
                date: d(2024, 1, 1),
                units: 2,
                exhaustions: 0,
                owes_croissants: false,
            }
        );
        assert_eq!(ledger.used_count(), 2);
        assert_eq!(dates(&ledger)[..2], [Some(d(2024, 1, 1)); 2]);
        assert!(states(&ledger)[2..]
            .iter()
            .all(|state| *state == SlotState::Available));
    }

    #[test]
    fn friday_after_a_full_week_costs_three_units() {
        let mut ledger = fresh();
        for day in 2..=4 {
            // Tue, Wed, Thu of the week of Mon 2024-01-01.
            ledger.add_penalty(d(2024, 1, day)).unwrap();
        }
        ledger.add_penalty(d(2024, 1, 1)).unwrap(); // the Monday, 2 units

        let event = ledger.add_penalty(d(2024, 1, 5)).unwrap();
        assert_eq!(
            event,
            LedgerEvent::PenaltyAdded {
                date: d(2024, 1, 5),
                units: 3,
                exhaustions: 0,
                owes_croissants: false,
            }
        );
        assert_eq!(ledger.used_count(), 8);
        assert_eq!(
            dates(&ledger)[5..8],
            [Some(d(2024, 1, 5)), Some(d(2024, 1, 5)), Some(d(2024, 1, 5))]
        );
    }

    #[test]
    fn dates_are_kept_in_ascending_order_on_insert() {
        let mut ledger = fresh();
        // Three Wednesdays, added out of order.
        ledger.add_penalty(d(2024, 1, 10)).unwrap();
        ledger.add_penalty(d(2024, 1, 3)).unwrap();
        ledger.add_penalty(d(2024, 1, 17)).unwrap();

        assert_eq!(
            dates(&ledger)[..3],
            [Some(d(2024, 1, 3)), Some(d(2024, 1, 10)), Some(d(2024, 1, 17))]
        );
        assert_eq!(ledger.last_penalty_date(), Some(d(2024, 1, 17)));
    }

    #[test]
    fn duplicate_date_is_rejected_without_touching_the_ledger() {
        let mut ledger = fresh();
        ledger.add_penalty(d(2024, 1, 3)).unwrap();
        let snapshot = ledger.clone();

        let result = ledger.add_penalty(d(2024, 1, 3));
        assert_eq!(result, Err(LedgerError::DuplicatePenaltyDate(d(2024, 1, 3))));
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn exhaustion_wipes_dates_and_deactivates_the_top_slot() {
        let mut ledger = fully_used();

        // A Tuesday in another week: one unit, straight into exhaustion.
        let event = ledger.add_penalty(d(2024, 2, 6)).unwrap();

        assert_eq!(
            event,
            LedgerEvent::PenaltyAdded {
                date: d(2024, 2, 6),
                units: 1,
                exhaustions: 1,
                owes_croissants: true,
            }
        );
        assert_eq!(ledger.used_count(), 0);
        assert_eq!(ledger.limit(), 9);
        assert!(ledger.owes_croissants());
        assert!(dates(&ledger).iter().all(Option::is_none));
        assert_eq!(states(&ledger)[9], SlotState::Deactivated);
        assert!(states(&ledger)[..9]
            .iter()
            .all(|state| *state == SlotState::Available));
    }

    #[test]
    fn reactivate_restores_the_last_deactivated_slot() {
        let mut ledger = fully_used();
        ledger.add_penalty(d(2024, 2, 6)).unwrap();

        let event = ledger.reactivate().unwrap();
        assert_eq!(event, LedgerEvent::SlotReactivated { index: 9, limit: 10 });
        assert_eq!(ledger.limit(), 10);
        assert!(!ledger.owes_croissants());
        assert_eq!(states(&ledger)[9], SlotState::Available);
    }

    #[test]
    fn reactivate_on_a_healthy_ledger_is_rejected() {
        let mut ledger = fresh();
        assert_eq!(ledger.reactivate(), Err(LedgerError::NoDeactivatedSlot));
    }

    #[test]
    fn second_unit_can_trigger_the_exhaustion() {
        let mut ledger = fresh();
        // Nine used: four Mondays plus one lone Tuesday.
        for day in [1, 8, 15, 22] {
            ledger.add_penalty(d(2024, 1, day)).unwrap();
        }
        ledger.add_penalty(d(2024, 2, 6)).unwrap();
        assert_eq!(ledger.used_count(), 9);

        // A Friday costs two: the first unit fills the ledger, the second
        // exhausts it.
        let event = ledger.add_penalty(d(2024, 2, 9)).unwrap();
        assert_eq!(
            event,
            LedgerEvent::PenaltyAdded {
                date: d(2024, 2, 9),
                units: 2,
                exhaustions: 1,
                owes_croissants: true,
            }
        );
        assert_eq!(ledger.used_count(), 0);
        assert_eq!(ledger.limit(), 9);
        assert_eq!(ledger.penalty_log().last(), Some(&d(2024, 2, 9)));
    }

    #[test]
    fn reactivation_targets_the_second_deactivation_first() {
        let person = someone();
        let mut ledger = Ledger::with_capacity(person, 3);

        // Three Tuesdays fill the ledger, a fourth exhausts it (slot 2);
        // two more fill the shrunk ledger, a third exhausts it (slot 1).
        for day in [2, 9, 16, 23] {
            ledger.add_penalty(d(2024, 1, day)).unwrap();
        }
        assert_eq!(ledger.limit(), 2);
        for day in [6, 13, 20] {
            ledger.add_penalty(d(2024, 2, day)).unwrap();
        }
        assert_eq!(ledger.limit(), 1);

        let event = ledger.reactivate().unwrap();
        assert_eq!(event, LedgerEvent::SlotReactivated { index: 1, limit: 2 });
        assert_eq!(states(&ledger), vec![
            SlotState::Available,
            SlotState::Available,
            SlotState::Deactivated,
        ]);
    }

    #[test]
    fn exhaustion_with_no_slot_left_only_keeps_the_debt() {
        let mut ledger = Ledger::with_capacity(someone(), 1);
        ledger.add_penalty(d(2024, 1, 2)).unwrap();
        ledger.add_penalty(d(2024, 1, 3)).unwrap(); // exhausts the only slot
        assert_eq!(ledger.limit(), 0);

        let event = ledger.add_penalty(d(2024, 1, 4)).unwrap();
        assert_eq!(
            event,
            LedgerEvent::PenaltyAdded {
                date: d(2024, 1, 4),
                units: 1,
                exhaustions: 1,
                owes_croissants: true,
            }
        );
        assert_eq!(ledger.limit(), 0);
        assert_eq!(states(&ledger), vec![SlotState::Deactivated]);
    }

    #[test]
    fn remove_clears_every_stamp_for_the_date_and_compacts() {
        let mut ledger = fresh();
        ledger.add_penalty(d(2024, 1, 2)).unwrap(); // Tue, 1 unit
        ledger.add_penalty(d(2024, 1, 5)).unwrap(); // Fri, 2 units
        ledger.add_penalty(d(2024, 1, 9)).unwrap(); // Tue, 1 unit
        assert_eq!(ledger.used_count(), 4);

        let event = ledger.remove_penalty(d(2024, 1, 5));
        assert_eq!(
            event,
            LedgerEvent::PenaltyRemoved {
                date: d(2024, 1, 5),
                cleared: 2,
            }
        );
        assert_eq!(ledger.used_count(), 2);
        assert_eq!(
            dates(&ledger)[..2],
            [Some(d(2024, 1, 2)), Some(d(2024, 1, 9))]
        );
        assert!(dates(&ledger)[2..].iter().all(Option::is_none));
        assert_eq!(ledger.penalty_log(), [d(2024, 1, 2), d(2024, 1, 9)]);
    }

    #[test]
    fn remove_without_a_match_changes_nothing() {
        let mut ledger = fresh();
        ledger.add_penalty(d(2024, 1, 2)).unwrap();
        let snapshot = ledger.clone();

        let event = ledger.remove_penalty(d(2024, 1, 9));
        assert_eq!(
            event,
            LedgerEvent::PenaltyRemoved {
                date: d(2024, 1, 9),
                cleared: 0,
            }
        );
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn remove_does_not_restore_lost_capacity() {
        let mut ledger = fully_used();
        ledger.add_penalty(d(2024, 2, 6)).unwrap();
        assert_eq!(ledger.limit(), 9);

        // Clearing the date that caused the exhaustion leaves the lost
        // slot deactivated.
        ledger.remove_penalty(d(2024, 2, 6));
        assert_eq!(ledger.limit(), 9);
        assert_eq!(states(&ledger)[9], SlotState::Deactivated);
    }

    #[test]
    fn log_keeps_one_entry_per_recorded_date_across_exhaustions() {
        let mut ledger = Ledger::with_capacity(someone(), 2);
        ledger.add_penalty(d(2024, 1, 2)).unwrap();
        ledger.add_penalty(d(2024, 1, 3)).unwrap();
        ledger.add_penalty(d(2024, 1, 4)).unwrap(); // exhaustion wipes the stamps

        // The wipe removed the stamp, so the same date can be penalized
        // again and the log records it twice.
        ledger.add_penalty(d(2024, 1, 2)).unwrap();
        assert_eq!(
            ledger.penalty_log(),
            [d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4), d(2024, 1, 2)]
        );
    }

    #[test]
    fn selection_drives_removal_and_is_cleared_by_mutations() {
        let mut ledger = fresh();
        ledger.add_penalty(d(2024, 1, 2)).unwrap();
        ledger.add_penalty(d(2024, 1, 9)).unwrap();

        assert!(!ledger.select(10));
        assert!(ledger.select(1));
        assert_eq!(ledger.selected_slot().and_then(Slot::date), Some(d(2024, 1, 9)));

        let event = ledger.remove_selected().unwrap();
        assert_eq!(
            event,
            LedgerEvent::PenaltyRemoved {
                date: d(2024, 1, 9),
                cleared: 1,
            }
        );
        assert_eq!(ledger.selected(), None);
        assert_eq!(ledger.remove_selected(), None);
    }

    #[test]
    fn selecting_an_undated_slot_removes_nothing() {
        let mut ledger = fresh();
        ledger.add_penalty(d(2024, 1, 2)).unwrap();
        assert!(ledger.select(5));
        assert_eq!(ledger.remove_selected(), None);
        assert_eq!(ledger.selected(), Some(5));
    }

    #[test]
    fn serde_round_trip_rebuilds_the_deactivated_run() {
        let mut ledger = fully_used();
        ledger.add_penalty(d(2024, 2, 6)).unwrap();
        ledger.add_penalty(d(2024, 2, 7)).unwrap();
        assert_eq!(ledger.limit(), 9);

        let json = serde_json::to_string(&ledger).unwrap();
        let loaded: Ledger = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, ledger);
        assert_eq!(loaded.limit(), 9);
        assert_eq!(loaded.next_index_to_deactivate(), 8);
    }

    #[test]
    fn a_bare_person_record_gets_fresh_slots() {
        let json = r#"{
            "person": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "perso_id": "ada.lovelace"
            },
            "slots": [],
            "capacity": 4
        }"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.capacity(), 4);
        assert_eq!(ledger.limit(), 4);
        assert!(!ledger.owes_croissants());
        assert!(ledger.penalty_log().is_empty());
    }
}
