//! # `use_remote_list`: one list screen's state plus its backend
//!
//! Binds a [`ListState`] signal to a [`ListResource`] and wires fetches,
//! saves and deletes through it. The initial fetch is spawned on mount; every
//! task runs in the owning component's scope, so leaving the screen drops any
//! request still in flight. Fetch tickets cover the remaining case of two
//! overlapping fetches on the same screen.
//!
//! Outcomes are written to the activity log; failures also set the list's
//! error banner.

use dioxus::prelude::*;
use store::{Entity, ListResource, ListState, RecordId, RecordSource, SaveError};

use crate::activity_log::{log_entity_activity, use_activity_log, ActivityLog, LogLevel};

pub struct RemoteList<T: Entity, S: 'static> {
    pub state: Signal<ListState<T>>,
    resource: CopyValue<ListResource<T, S>>,
    log: Signal<ActivityLog>,
}

impl<T: Entity, S: 'static> Clone for RemoteList<T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Entity, S: 'static> Copy for RemoteList<T, S> {}

/// What a dialog should do after a save attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    Saved,
    /// Keep the dialog open and show this inline.
    Invalid(String),
    /// The backend refused; the banner shows the same message.
    Failed(String),
}

impl<T: Entity, S: RecordSource<T> + Clone + 'static> RemoteList<T, S> {
    /// Fetch the whole collection. A response that arrives after a newer
    /// fetch started is discarded.
    pub async fn refresh(self) {
        let mut state = self.state;
        let mut log = self.log;
        let ticket = state.write().begin_fetch();
        let resource = self.resource.cloned();
        let result = resource.fetch_all().await;
        if let Err(e) = &result {
            tracing::warn!("listing {} failed: {}", T::PLURAL, e);
        }
        let failed = result.is_err();
        if state.write().finish_fetch(ticket, result) && failed {
            log_entity_activity::<T>(&mut log, LogLevel::Error, None, &format!("Failed to fetch {}", T::PLURAL));
        }
    }

    pub fn reload(self) {
        spawn(self.refresh());
    }

    pub async fn save(self, editing: Option<RecordId>, form: T::Form) -> SaveOutcome {
        let mut state = self.state;
        let mut log = self.log;
        let resource = self.resource.cloned();
        match resource.save(editing, &form).await {
            Ok(reconciliation) => {
                let verb = if editing.is_some() { "Updated" } else { "Created" };
                log_entity_activity::<T>(&mut log, LogLevel::Success, editing, &format!("{verb} {}", T::NOUN));
                state.write().clear_error();
                if state.write().apply(reconciliation) {
                    self.refresh().await;
                }
                SaveOutcome::Saved
            }
            Err(SaveError::Invalid(e)) => SaveOutcome::Invalid(e.to_string()),
            Err(e @ SaveError::Source { .. }) => {
                self.report(editing, &e);
                SaveOutcome::Failed(e.message())
            }
        }
    }

    pub async fn delete(self, id: RecordId) {
        let mut state = self.state;
        let mut log = self.log;
        let resource = self.resource.cloned();
        match resource.delete(id).await {
            Ok(reconciliation) => {
                log_entity_activity::<T>(&mut log, LogLevel::Success, Some(id), &format!("Deleted {} {id}", T::NOUN));
                state.write().clear_error();
                if state.write().apply(reconciliation) {
                    self.refresh().await;
                }
            }
            Err(e) => self.report(Some(id), &e),
        }
    }

    fn report(self, id: Option<RecordId>, error: &SaveError<S::Error>) {
        let mut state = self.state;
        let mut log = self.log;
        if let SaveError::Source { cause, .. } = error {
            tracing::warn!("{}: {}", error.message(), cause);
        }
        state.write().fail(error.message());
        log_entity_activity::<T>(&mut log, LogLevel::Error, id, &error.message());
    }
}

/// List state for one screen, fetched once on mount.
pub fn use_remote_list<T, S>(init: impl FnOnce() -> ListResource<T, S>) -> RemoteList<T, S>
where
    T: Entity,
    T::SortField: Default,
    S: RecordSource<T> + Clone + 'static,
{
    let state = use_signal(ListState::<T>::default);
    let resource = use_hook(|| CopyValue::new(init()));
    let log = use_activity_log();
    let list = RemoteList { state, resource, log };
    use_hook(move || {
        list.reload();
    });
    list
}
