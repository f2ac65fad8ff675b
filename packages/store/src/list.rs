//! # List state shared by every screen
//!
//! [`ListState`] holds one screen's client-side copy of a backend collection
//! together with the view controls layered on top of it: loading flag, error
//! banner, search text and sort order. It has no I/O of its own; the UI feeds
//! it fetch results and reconciliations.
//!
//! ## Search
//!
//! Two search strings are kept. `search` mirrors the input box on every
//! keystroke; `applied_search` is what filtering actually uses and is only
//! updated once the debounce timer fires (see `ui::use_debounced`).
//!
//! ## Stale fetches
//!
//! [`ListState::begin_fetch`] hands out a [`FetchTicket`]. If another fetch
//! starts before the first one answers, the older ticket goes stale and its
//! result is dropped by [`ListState::finish_fetch`], so a slow response can
//! never overwrite a newer one.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::models::{Entity, RecordId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Column header marker.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Identifies one in-flight list fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// How local state catches up with a successful mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Reconciliation<T: Entity> {
    /// Throw local state away and fetch the whole list again.
    Refetch,
    /// Append a record the backend just created.
    Insert(T),
    /// Overwrite a local record's fields with what was sent.
    Patch { id: RecordId, draft: T::Draft },
    /// Drop a record the backend just deleted.
    Remove(RecordId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T: Entity> {
    pub records: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub applied_search: String,
    pub sort_field: T::SortField,
    pub sort_direction: SortDirection,
    generation: u64,
}

impl<T: Entity> Default for ListState<T>
where
    T::SortField: Default,
{
    fn default() -> Self {
        Self::new(T::SortField::default())
    }
}

impl<T: Entity> ListState<T> {
    /// Empty list that starts out loading, sorted ascending by `sort_field`.
    pub fn new(sort_field: T::SortField) -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
            search: String::new(),
            applied_search: String::new(),
            sort_field,
            sort_direction: SortDirection::Ascending,
            generation: 0,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Store a fetch result unless a newer fetch has started since.
    ///
    /// Returns whether the result was applied.
    pub fn finish_fetch<E: Display>(&mut self, ticket: FetchTicket, result: Result<Vec<T>, E>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(_) => {
                self.error = Some(format!("Failed to fetch {}", T::PLURAL));
            }
        }
        true
    }

    pub fn set_search(&mut self, raw: impl Into<String>) {
        self.search = raw.into();
    }

    pub fn apply_search(&mut self, text: impl Into<String>) {
        self.applied_search = text.into();
    }

    /// Header click: same column flips direction, a new column sorts ascending.
    pub fn toggle_sort(&mut self, field: T::SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_sort_field(&mut self, field: T::SortField) {
        self.sort_field = field;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
    }

    /// Direction marker for a column header, empty when not sorted by it.
    pub fn indicator(&self, field: T::SortField) -> &'static str {
        if self.sort_field == field {
            self.sort_direction.indicator()
        } else {
            ""
        }
    }

    pub fn matches(&self, record: &T) -> bool {
        let needle = self.applied_search.to_lowercase();
        needle.is_empty() || record.search_text().to_lowercase().contains(&needle)
    }

    /// Records that pass the applied search, in the current sort order.
    pub fn visible(&self) -> Vec<T> {
        let mut rows: Vec<T> = self
            .records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| compare(a, b, self.sort_field, self.sort_direction));
        rows
    }

    pub fn find(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Apply a local reconciliation. [`Reconciliation::Refetch`] is left to the
    /// caller, which owns the fetch; this returns `true` in that case.
    pub fn apply(&mut self, reconciliation: Reconciliation<T>) -> bool {
        match reconciliation {
            Reconciliation::Refetch => return true,
            Reconciliation::Insert(record) => self.records.push(record),
            Reconciliation::Patch { id, draft } => {
                if let Some(record) = self.records.iter_mut().find(|r| r.id() == id) {
                    record.apply_draft(&draft);
                }
            }
            Reconciliation::Remove(id) => self.records.retain(|r| r.id() != id),
        }
        false
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Order two records by one field. Descending reverses the comparator rather
/// than the list, so equal keys keep their fetch order either way.
pub fn compare<T: Entity>(a: &T, b: &T, field: T::SortField, direction: SortDirection) -> Ordering {
    let ord = a.sort_key(field).cmp(&b.sort_key(field));
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Appointment, AppointmentDraft, AppointmentSort, Doctor, DoctorSort, Patient, PatientSort,
    };
    use chrono::NaiveDate;

    fn patient(id: RecordId, name: &str, email: &str) -> Patient {
        Patient {
            id,
            name: name.into(),
            email: email.into(),
            phone: format!("55500000{id:02}"),
        }
    }

    fn loaded(records: Vec<Patient>) -> ListState<Patient> {
        let mut state = ListState::<Patient>::default();
        let ticket = state.begin_fetch();
        assert!(state.finish_fetch::<String>(ticket, Ok(records)));
        state
    }

    fn names(rows: &[Patient]) -> Vec<&str> {
        rows.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_fetch_populates_rows() {
        let state = loaded(vec![
            patient(1, "Ann", "ann@x.com"),
            patient(2, "Ben", "ben@x.com"),
            patient(3, "Cat", "cat@x.com"),
        ]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.visible().len(), 3);
    }

    #[test]
    fn test_fetch_failure_sets_message() {
        let mut state = ListState::<Doctor>::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err::<Vec<Doctor>, _>("connection refused"));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch doctors"));
    }

    #[test]
    fn test_stale_fetch_is_ignored() {
        let mut state = ListState::<Patient>::default();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.finish_fetch::<String>(second, Ok(vec![patient(2, "New", "n@x.com")])));
        assert!(!state.finish_fetch::<String>(first, Ok(vec![patient(1, "Old", "o@x.com")])));

        assert_eq!(names(&state.records), vec!["New"]);
        assert!(!state.loading);
    }

    #[test]
    fn test_search_uses_applied_text_only() {
        let mut state = loaded(vec![
            patient(1, "Jane Doe", "jane@x.com"),
            patient(2, "John Roe", "john@y.org"),
        ]);

        state.set_search("jane");
        assert_eq!(state.visible().len(), 2);

        state.apply_search("JANE");
        assert_eq!(names(&state.visible()), vec!["Jane Doe"]);

        // Matches across the joined fields, including email.
        state.apply_search("y.org");
        assert_eq!(names(&state.visible()), vec!["John Roe"]);

        state.apply_search("");
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn test_sort_reverses_on_toggle() {
        let mut state = loaded(vec![
            patient(1, "bob", "b@x.com"),
            patient(2, "Alice", "a@x.com"),
            patient(3, "carol", "c@x.com"),
        ]);

        assert_eq!(names(&state.visible()), vec!["Alice", "bob", "carol"]);
        assert_eq!(state.indicator(PatientSort::Name), "▲");

        state.toggle_sort(PatientSort::Name);
        assert_eq!(names(&state.visible()), vec!["carol", "bob", "Alice"]);
        assert_eq!(state.indicator(PatientSort::Name), "▼");
        assert_eq!(state.indicator(PatientSort::Email), "");

        // A new column starts ascending.
        state.toggle_sort(PatientSort::Email);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_doctor_missing_phone_sorts_first() {
        let mut state = ListState::<Doctor>::new(DoctorSort::Phone);
        let ticket = state.begin_fetch();
        let doc = |id, phone: Option<&str>| Doctor {
            id,
            name: format!("D{id}"),
            specialization: String::new(),
            email: String::new(),
            phone: phone.map(String::from),
        };
        state.finish_fetch::<String>(ticket, Ok(vec![doc(1, Some("555")), doc(2, None)]));
        let ids: Vec<_> = state.visible().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_appointment_sort_is_independent_per_control() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let appt = |id, patient_id, hour| Appointment {
            id,
            doctor_id: 1,
            patient_id,
            appointment_date_time: day.and_hms_opt(hour, 0, 0).unwrap(),
        };
        let mut state = ListState::<Appointment>::default();
        let ticket = state.begin_fetch();
        state.finish_fetch::<String>(ticket, Ok(vec![appt(1, 10, 9), appt(2, 2, 11), appt(3, 7, 8)]));

        let ids = |s: &ListState<Appointment>| s.visible().iter().map(|a| a.id).collect::<Vec<_>>();
        assert_eq!(ids(&state), vec![3, 1, 2]);

        // Numeric, not lexicographic: 2 < 7 < 10.
        state.set_sort_field(AppointmentSort::PatientId);
        assert_eq!(ids(&state), vec![2, 3, 1]);

        // Choosing the same field again does not flip direction.
        state.set_sort_field(AppointmentSort::PatientId);
        assert_eq!(state.sort_direction, SortDirection::Ascending);

        state.set_sort_direction(SortDirection::Descending);
        assert_eq!(ids(&state), vec![1, 3, 2]);
    }

    #[test]
    fn test_apply_reconciliations() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let draft = AppointmentDraft {
            doctor_id: 1,
            patient_id: 2,
            appointment_date_time: day.and_hms_opt(9, 0, 0).unwrap(),
        };
        let mut state = ListState::<Appointment>::default();
        let ticket = state.begin_fetch();
        state.finish_fetch::<String>(ticket, Ok(vec![]));

        assert!(!state.apply(Reconciliation::Insert(Appointment::from_draft(42, &draft))));
        assert_eq!(state.records.len(), 1);

        let moved = AppointmentDraft { doctor_id: 3, ..draft.clone() };
        state.apply(Reconciliation::Patch { id: 42, draft: moved });
        assert_eq!(state.find(42).map(|a| a.doctor_id), Some(3));

        state.apply(Reconciliation::Remove(42));
        assert!(state.records.is_empty());

        assert!(state.apply(Reconciliation::Refetch));
    }
}
