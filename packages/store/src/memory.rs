use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::models::{Entity, RecordId};
use crate::resource::RecordSource;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("record {0} not found")]
    NotFound(RecordId),
}

/// One request as the backend would have seen it. Payloads are kept as the
/// JSON that would have gone over the wire.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    List,
    Get(RecordId),
    Create(serde_json::Value),
    Update(RecordId, serde_json::Value),
    Delete(RecordId),
}

#[derive(Debug)]
struct Inner<T> {
    records: BTreeMap<RecordId, T>,
    next_id: RecordId,
    calls: Vec<Call>,
}

/// In-memory RecordSource for testing. Ids are assigned sequentially the way
/// an identity column would.
#[derive(Debug)]
pub struct MemoryBackend<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for MemoryBackend<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> Default for MemoryBackend<T> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<T: Entity> MemoryBackend<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<T>) -> Self {
        let next_id = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Inner {
                records: records.into_iter().map(|r| (r.id(), r)).collect(),
                next_id,
                calls: Vec::new(),
            })),
        }
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        // A panic while holding the lock can only come from a failing test.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn payload<D: serde::Serialize>(draft: &D) -> serde_json::Value {
    serde_json::to_value(draft).unwrap_or(serde_json::Value::Null)
}

impl<T: Entity> RecordSource<T> for MemoryBackend<T> {
    type Error = MemoryError;

    async fn list(&self) -> Result<Vec<T>, MemoryError> {
        let mut inner = self.lock();
        inner.calls.push(Call::List);
        Ok(inner.records.values().cloned().collect())
    }

    async fn get(&self, id: RecordId) -> Result<T, MemoryError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Get(id));
        inner.records.get(&id).cloned().ok_or(MemoryError::NotFound(id))
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, MemoryError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Create(payload(draft)));
        let id = inner.next_id;
        inner.next_id += 1;
        let record = T::from_draft(id, draft);
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: RecordId, draft: &T::Draft) -> Result<(), MemoryError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Update(id, payload(draft)));
        let record = inner.records.get_mut(&id).ok_or(MemoryError::NotFound(id))?;
        record.apply_draft(draft);
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), MemoryError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Delete(id));
        inner
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(MemoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Doctor, DoctorDraft};

    fn draft(name: &str) -> DoctorDraft {
        DoctorDraft {
            name: name.into(),
            specialization: "Cardiology".into(),
            email: format!("{}@x.com", name.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let backend = MemoryBackend::<Doctor>::new();
        let a = backend.create(&draft("Grey")).await.unwrap();
        let b = backend.create(&draft("Shepherd")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(backend.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_continue_after_seeded_records() {
        let seeded = Doctor::from_draft(10, &draft("Yang"));
        let backend = MemoryBackend::with_records(vec![seeded]);
        let created = backend.create(&draft("Karev")).await.unwrap();
        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn test_get_update_delete() {
        let backend = MemoryBackend::<Doctor>::new();
        let doc = backend.create(&draft("Bailey")).await.unwrap();

        backend.update(doc.id, &draft("Webber")).await.unwrap();
        assert_eq!(backend.get(doc.id).await.unwrap().name, "Webber");

        backend.delete(doc.id).await.unwrap();
        assert_eq!(backend.get(doc.id).await, Err(MemoryError::NotFound(doc.id)));
        assert_eq!(backend.delete(doc.id).await, Err(MemoryError::NotFound(doc.id)));
        assert_eq!(
            backend.update(doc.id, &draft("Nobody")).await,
            Err(MemoryError::NotFound(doc.id))
        );
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let backend = MemoryBackend::<Doctor>::new();
        backend.list().await.unwrap();
        let doc = backend.create(&draft("Hunt")).await.unwrap();
        backend.delete(doc.id).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::List);
        assert!(matches!(calls[1], Call::Create(_)));
        assert_eq!(calls[2], Call::Delete(doc.id));
    }
}
