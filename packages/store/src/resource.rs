//! # Remote list resource — one CRUD controller for every entity
//!
//! [`RecordSource`] is the async seam between list state and the backend. The
//! HTTP client in the `api` crate implements it for real traffic and
//! [`crate::MemoryBackend`] implements it for tests.
//!
//! [`ListResource`] wraps a source with a [`Reconcile`] strategy and turns each
//! successful mutation into the [`Reconciliation`] the list state should apply:
//!
//! | Strategy | create | update | delete |
//! |----------|--------|--------|--------|
//! | [`Reconcile::Refetch`] | refetch | refetch | refetch |
//! | [`Reconcile::Patch`] | append server record | patch local fields | remove locally |
//!
//! Forms are validated before the source is touched, so an incomplete dialog
//! never produces a request.

use std::fmt::{Debug, Display};
use std::future::Future;
use std::marker::PhantomData;

use thiserror::Error;

use crate::form::{DraftForm, ValidationError};
use crate::list::Reconciliation;
use crate::models::{Entity, RecordId};

/// Async access to one backend collection.
pub trait RecordSource<T: Entity> {
    type Error: Display + Debug;

    fn list(&self) -> impl Future<Output = Result<Vec<T>, Self::Error>>;
    fn get(&self, id: RecordId) -> impl Future<Output = Result<T, Self::Error>>;
    fn create(&self, draft: &T::Draft) -> impl Future<Output = Result<T, Self::Error>>;
    fn update(&self, id: RecordId, draft: &T::Draft) -> impl Future<Output = Result<(), Self::Error>>;
    fn delete(&self, id: RecordId) -> impl Future<Output = Result<(), Self::Error>>;
}

/// How a screen brings local state back in line after a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconcile {
    /// Refetch the whole list; one more round trip, never drifts.
    Refetch,
    /// Patch local state from the request and response; no extra round trip,
    /// but fields the backend changes on its own are not picked up.
    Patch,
}

/// A failed save or delete.
#[derive(Debug, Error)]
pub enum SaveError<E: Display + Debug> {
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("{message}")]
    Source {
        /// Static banner text, e.g. `"Failed to save patient"`.
        message: String,
        cause: E,
    },
}

impl<E: Display + Debug> SaveError<E> {
    /// Text for the error banner or the dialog's inline message.
    pub fn message(&self) -> String {
        match self {
            SaveError::Invalid(e) => e.to_string(),
            SaveError::Source { message, .. } => message.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ListResource<T: Entity, S> {
    source: S,
    strategy: Reconcile,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, S: Clone> Clone for ListResource<T, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            strategy: self.strategy,
            _entity: PhantomData,
        }
    }
}

impl<T: Entity, S: RecordSource<T>> ListResource<T, S> {
    pub fn new(source: S, strategy: Reconcile) -> Self {
        Self {
            source,
            strategy,
            _entity: PhantomData,
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<T>, S::Error> {
        self.source.list().await
    }

    /// Validate `form`, then create (no `editing` id) or update.
    pub async fn save(
        &self,
        editing: Option<RecordId>,
        form: &T::Form,
    ) -> Result<Reconciliation<T>, SaveError<S::Error>> {
        let draft = form.validate()?;
        let failed = |cause| SaveError::Source {
            message: format!("Failed to save {}", T::NOUN),
            cause,
        };
        match (editing, self.strategy) {
            (Some(id), Reconcile::Refetch) => {
                self.source.update(id, &draft).await.map_err(failed)?;
                Ok(Reconciliation::Refetch)
            }
            (Some(id), Reconcile::Patch) => {
                self.source.update(id, &draft).await.map_err(failed)?;
                Ok(Reconciliation::Patch { id, draft })
            }
            (None, Reconcile::Refetch) => {
                self.source.create(&draft).await.map_err(failed)?;
                Ok(Reconciliation::Refetch)
            }
            (None, Reconcile::Patch) => {
                let created = self.source.create(&draft).await.map_err(failed)?;
                Ok(Reconciliation::Insert(created))
            }
        }
    }

    pub async fn delete(&self, id: RecordId) -> Result<Reconciliation<T>, SaveError<S::Error>> {
        self.source
            .delete(id)
            .await
            .map_err(|cause| SaveError::Source {
                message: format!("Failed to delete {}", T::NOUN),
                cause,
            })?;
        Ok(match self.strategy {
            Reconcile::Refetch => Reconciliation::Refetch,
            Reconcile::Patch => Reconciliation::Remove(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::events_from;
    use crate::form::{AppointmentForm, PatientForm};
    use crate::list::ListState;
    use crate::memory::{Call, MemoryBackend};
    use crate::models::{Appointment, AppointmentDraft, NameLookup, Patient};
    use chrono::NaiveDate;

    async fn refresh<T: Entity, S: RecordSource<T>>(res: &ListResource<T, S>, state: &mut ListState<T>) {
        let ticket = state.begin_fetch();
        let result = res.fetch_all().await;
        state.finish_fetch(ticket, result);
    }

    #[tokio::test]
    async fn test_create_patient_then_refetch() {
        let backend = MemoryBackend::<Patient>::new();
        let res = ListResource::new(backend.clone(), Reconcile::Refetch);
        let mut state = ListState::<Patient>::default();
        refresh(&res, &mut state).await;
        assert!(state.visible().is_empty());

        let form = PatientForm {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "1234567890".into(),
        };
        let outcome = res.save(None, &form).await.unwrap();
        assert_eq!(outcome, Reconciliation::Refetch);

        assert_eq!(
            backend.calls()[1],
            Call::Create(serde_json::json!({
                "name": "Jane Doe",
                "email": "jane@x.com",
                "phone": "1234567890"
            }))
        );

        if state.apply(outcome) {
            refresh(&res, &mut state).await;
        }
        let rows = state.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_incomplete_form_makes_no_call() {
        let backend = MemoryBackend::<Patient>::new();
        let res = ListResource::new(backend.clone(), Reconcile::Refetch);

        let form = PatientForm {
            name: "Jane Doe".into(),
            email: String::new(),
            phone: "1234567890".into(),
        };
        let err = res.save(None, &form).await.unwrap_err();
        assert!(matches!(err, SaveError::Invalid(_)));
        assert_eq!(err.message(), "Email is required");

        let short_phone = PatientForm {
            phone: "12345".into(),
            email: "jane@x.com".into(),
            ..form
        };
        let err = res.save(Some(1), &short_phone).await.unwrap_err();
        assert!(matches!(err, SaveError::Invalid(ValidationError::Phone)));

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_reports_static_message() {
        let backend = MemoryBackend::<Patient>::new();
        let res = ListResource::new(backend.clone(), Reconcile::Refetch);
        let form = PatientForm {
            name: "Ghost".into(),
            email: "g@x.com".into(),
            phone: "0000000000".into(),
        };
        let err = res.save(Some(99), &form).await.unwrap_err();
        assert_eq!(err.message(), "Failed to save patient");

        let err = res.delete(99).await.unwrap_err();
        assert_eq!(err.message(), "Failed to delete patient");
    }

    fn slot(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_appointment_patch_without_refetch() {
        let backend = MemoryBackend::<Appointment>::new();
        let res = ListResource::new(backend.clone(), Reconcile::Patch);
        let mut state = ListState::<Appointment>::default();
        refresh(&res, &mut state).await;

        let mut form = AppointmentForm::for_slot(slot(3, 10, 0));
        form.doctor_id = "1".into();
        form.patient_id = "2".into();
        let outcome = res.save(None, &form).await.unwrap();
        let Reconciliation::Insert(ref created) = outcome else {
            panic!("expected insert, got {outcome:?}");
        };
        let id = created.id;
        assert!(!state.apply(outcome));

        form.time = "11:30".into();
        let outcome = res.save(Some(id), &form).await.unwrap();
        assert!(!state.apply(outcome));
        assert_eq!(
            state.find(id).map(|a| a.appointment_date_time),
            Some(slot(3, 11, 30))
        );

        // Only the initial list call; mutations never triggered a refetch.
        let lists = backend.calls().iter().filter(|c| **c == Call::List).count();
        assert_eq!(lists, 1);
    }

    #[tokio::test]
    async fn test_delete_appointment_42_removes_locally() {
        let backend = MemoryBackend::<Appointment>::with_records(vec![
            Appointment::from_draft(
                41,
                &AppointmentDraft { doctor_id: 1, patient_id: 1, appointment_date_time: slot(3, 9, 0) },
            ),
            Appointment::from_draft(
                42,
                &AppointmentDraft { doctor_id: 1, patient_id: 2, appointment_date_time: slot(3, 10, 0) },
            ),
        ]);
        let res = ListResource::new(backend.clone(), Reconcile::Patch);
        let mut state = ListState::<Appointment>::default();
        refresh(&res, &mut state).await;
        assert_eq!(state.visible().len(), 2);

        let outcome = res.delete(42).await.unwrap();
        assert_eq!(outcome, Reconciliation::Remove(42));
        assert!(!state.apply(outcome));

        assert_eq!(backend.calls(), vec![Call::List, Call::Delete(42)]);
        assert!(state.visible().iter().all(|a| a.id != 42));
        let events = events_from(&state.records, &NameLookup::default(), 30);
        assert_eq!(events.len(), 1);
        assert!(events.iter().all(|e| e.id != 42));
    }

    #[tokio::test]
    async fn test_refetch_strategy_on_delete() {
        let backend = MemoryBackend::<Patient>::new();
        let res = ListResource::new(backend.clone(), Reconcile::Refetch);
        let created = backend
            .create(&crate::models::PatientDraft {
                name: "A".into(),
                email: "a@x.com".into(),
                phone: "1111111111".into(),
            })
            .await
            .unwrap();
        assert_eq!(res.delete(created.id).await.unwrap(), Reconciliation::Refetch);
        assert!(res.fetch_all().await.unwrap().is_empty());
    }
}
