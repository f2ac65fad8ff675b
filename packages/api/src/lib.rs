//! # API crate: REST client for the clinic backend
//!
//! The backend exposes one collection per entity:
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `GET` | `{base}/{collection}` | | JSON array |
//! | `GET` | `{base}/{collection}/{id}` | | JSON object |
//! | `POST` | `{base}/{collection}` | draft | created record |
//! | `PUT` | `{base}/{collection}/{id}` | draft | ignored |
//! | `DELETE` | `{base}/{collection}/{id}` | | ignored |
//!
//! [`ClinicClient`] owns the base URL and a shared `reqwest::Client` and hands
//! out an [`EntityClient`] per collection. Calls are direct pass-throughs: no
//! retries, no timeouts, and any non-2xx status is an [`ApiError::Status`].
//! `EntityClient<T>` implements [`store::RecordSource`], so list screens can
//! swap it for [`store::MemoryBackend`] in tests.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use store::{Appointment, Doctor, Entity, Patient, RecordId, RecordSource};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status { status: u16, url: String },
}

/// Entry point for all backend calls.
#[derive(Clone, Debug)]
pub struct ClinicClient {
    base: String,
    http: reqwest::Client,
}

impl ClinicClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn entity<T: Entity>(&self) -> EntityClient<T> {
        EntityClient {
            base: self.base.clone(),
            http: self.http.clone(),
            _entity: PhantomData,
        }
    }

    pub fn patients(&self) -> EntityClient<Patient> {
        self.entity()
    }

    pub fn doctors(&self) -> EntityClient<Doctor> {
        self.entity()
    }

    pub fn appointments(&self) -> EntityClient<Appointment> {
        self.entity()
    }
}

/// Client for one collection, e.g. `/patients`.
#[derive(Debug)]
pub struct EntityClient<T> {
    base: String,
    http: reqwest::Client,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            http: self.http.clone(),
            _entity: PhantomData,
        }
    }
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    tracing::warn!("{} {}", url, status);
    Err(ApiError::Status {
        status: status.as_u16(),
        url,
    })
}

async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
    Ok(checked(response).await?.json().await?)
}

impl<T: Entity> EntityClient<T> {
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base, T::COLLECTION)
    }

    pub fn item_url(&self, id: RecordId) -> String {
        format!("{}/{}/{}", self.base, T::COLLECTION, id)
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);
        decode(self.http.get(&url).send().await?).await
    }

    pub async fn get(&self, id: RecordId) -> Result<T, ApiError> {
        let url = self.item_url(id);
        tracing::debug!("GET {}", url);
        decode(self.http.get(&url).send().await?).await
    }

    pub async fn create(&self, draft: &T::Draft) -> Result<T, ApiError> {
        let url = self.collection_url();
        tracing::debug!("POST {}", url);
        decode(self.http.post(&url).json(draft).send().await?).await
    }

    pub async fn update(&self, id: RecordId, draft: &T::Draft) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);
        checked(self.http.put(&url).json(draft).send().await?).await?;
        Ok(())
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);
        checked(self.http.delete(&url).send().await?).await?;
        Ok(())
    }
}

impl<T: Entity> RecordSource<T> for EntityClient<T> {
    type Error = ApiError;

    async fn list(&self) -> Result<Vec<T>, ApiError> {
        EntityClient::list(self).await
    }

    async fn get(&self, id: RecordId) -> Result<T, ApiError> {
        EntityClient::get(self, id).await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, ApiError> {
        EntityClient::create(self, draft).await
    }

    async fn update(&self, id: RecordId, draft: &T::Draft) -> Result<(), ApiError> {
        EntityClient::update(self, id, draft).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        EntityClient::delete(self, id).await
    }
}
