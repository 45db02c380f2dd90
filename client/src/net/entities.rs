//! Generic entity CRUD over the hosted backend's collection API.
//!
//! Every collection shares one shape: `GET /api/entities/{Collection}` lists
//! (with optional `sort`, `limit` and JSON `q` filter), `POST` creates, and
//! `PATCH /api/entities/{Collection}/{id}` updates.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as display strings; forms show a generic message and
//! log the detail.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "entities_test.rs"]
mod entities_test;

use serde::de::DeserializeOwned;

use super::types::{Employee, LeaveRequest, Policy, TrainingCourse};

/// A record type stored in a named backend collection.
pub trait Entity: DeserializeOwned + 'static {
    const COLLECTION: &'static str;
}

impl Entity for Employee {
    const COLLECTION: &'static str = "Employee";
}

impl Entity for LeaveRequest {
    const COLLECTION: &'static str = "LeaveRequest";
}

impl Entity for Policy {
    const COLLECTION: &'static str = "Policy";
}

impl Entity for TrainingCourse {
    const COLLECTION: &'static str = "TrainingCourse";
}

#[cfg(any(test, feature = "hydrate"))]
fn collection_endpoint(collection: &str) -> String {
    format!("/api/entities/{collection}")
}

#[cfg(any(test, feature = "hydrate"))]
fn record_endpoint(collection: &str, id: &str) -> String {
    format!("/api/entities/{collection}/{id}")
}

/// Query parameters for a list/filter call. `sort` follows the backend
/// convention: a field name, `-` prefixed for descending.
#[cfg(any(test, feature = "hydrate"))]
fn query_params(filter: Option<&serde_json::Value>, sort: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(filter) = filter {
        params.push(("q", filter.to_string()));
    }
    if let Some(sort) = sort.map(str::trim).filter(|s| !s.is_empty()) {
        params.push(("sort", sort.to_owned()));
    }
    params
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(collection: &str, status: u16) -> String {
    format!("{collection} request failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(collection: &str, resp: gloo_net::http::Response) -> Result<T, String> {
    if !resp.ok() {
        return Err(request_failed_message(collection, resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn fetch_many<T: Entity>(filter: Option<&serde_json::Value>, sort: Option<&str>) -> Result<Vec<T>, String> {
    let params = query_params(filter, sort);
    let resp = gloo_net::http::Request::get(&collection_endpoint(T::COLLECTION))
        .query(params.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_json(T::COLLECTION, resp).await
}

/// List every record in `T`'s collection.
///
/// # Errors
///
/// Returns an error string if the request fails or the body does not parse.
pub async fn list<T: Entity>(sort: Option<&str>) -> Result<Vec<T>, String> {
    #[cfg(feature = "hydrate")]
    {
        fetch_many::<T>(None, sort).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = sort;
        Err("not available on server".to_owned())
    }
}

/// List records matching a field-equality filter such as `{"status": "pending"}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body does not parse.
pub async fn filter<T: Entity>(query: &serde_json::Value, sort: Option<&str>) -> Result<Vec<T>, String> {
    #[cfg(feature = "hydrate")]
    {
        fetch_many::<T>(Some(query), sort).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (query, sort);
        Err("not available on server".to_owned())
    }
}

/// Create a record from a JSON payload and return the stored record.
///
/// # Errors
///
/// Returns an error string if the backend rejects the payload.
pub async fn create<T: Entity>(payload: &serde_json::Value) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&collection_endpoint(T::COLLECTION))
            .json(payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(T::COLLECTION, resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        Err("not available on server".to_owned())
    }
}

/// Apply a partial update to record `id` and return the stored record.
///
/// # Errors
///
/// Returns an error string if the backend rejects the patch.
pub async fn update<T: Entity>(id: &str, patch: &serde_json::Value) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::patch(&record_endpoint(T::COLLECTION, id))
            .json(patch)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(T::COLLECTION, resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, patch);
        Err("not available on server".to_owned())
    }
}
