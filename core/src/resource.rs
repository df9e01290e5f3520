//! Generic, stateless REST client for any entity with a numeric id.
//!
//! # Design
//! `ResourceClient<T>` holds a base URL, a route table and a write shape,
//! and nothing else. Each CRUD operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; the plain `list`/`get`/`create`/`update`/`delete` methods
//! glue the two together through a `Transport`.
//!
//! Entities whose backend paths or write payloads deviate from the plain
//! REST convention are configured, not special-cased: `Routes` names each
//! endpoint and a `WriteShape` turns drafts and entities into request bodies.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, JSON_CONTENT_TYPE};

/// Server-assigned record identifier.
pub type EntityId = i64;

/// A record owned by the backend.
///
/// `Draft` is the create payload (the entity without its id). `Patch` is a
/// partial update whose unset fields must not serialize at all, so that it
/// can be overlaid onto a held entity.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned {
    type Draft: Serialize + fmt::Debug;
    type Patch: Serialize + fmt::Debug;

    /// Short lowercase name used in logs and error messages.
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    /// Soft-deleted records return `false` and are dropped from store
    /// collections.
    fn is_visible(&self) -> bool {
        true
    }
}

/// `{ "id": n }` reference used in nested write payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: EntityId,
}

/// Embedded `{ id, denominacion }` reference as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: EntityId,
    #[serde(rename = "denominacion", default)]
    pub name: String,
}

impl Reference {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id_ref(&self) -> IdRef {
        IdRef { id: self.id }
    }
}

/// Endpoint paths for one entity, relative to the base URL.
///
/// `item`, `update` and `delete` are prefixes; the id is appended as the
/// last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routes {
    pub list: &'static str,
    pub item: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl Routes {
    /// `GET/POST {base}` and `GET/PUT/DELETE {base}/{id}`.
    pub const fn rest(base: &'static str) -> Self {
        Self {
            list: base,
            item: base,
            create: base,
            update: base,
            delete: base,
        }
    }
}

/// Turns drafts and entities into write bodies for one entity type.
pub trait WriteShape<T: Entity>: Send + Sync {
    fn create_body(&self, draft: &T::Draft) -> Result<Value, ApiError>;
    fn update_body(&self, entity: &T) -> Result<Value, ApiError>;
}

/// Sends drafts and entities exactly as they serialize.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl<T: Entity> WriteShape<T> for Verbatim {
    fn create_body(&self, draft: &T::Draft) -> Result<Value, ApiError> {
        to_json_value(draft)
    }

    fn update_body(&self, entity: &T) -> Result<Value, ApiError> {
        to_json_value(entity)
    }
}

pub(crate) fn to_json_value<S: Serialize + ?Sized>(value: &S) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Overlay the set fields of `patch` onto `entity`.
///
/// The id is never part of a patch, so the result keeps the entity's id.
pub fn merge_patch<T: Entity>(entity: &T, patch: &T::Patch) -> Result<T, ApiError> {
    let mut merged = to_json_value(entity)?;
    if let (Value::Object(fields), Value::Object(changes)) = (&mut merged, to_json_value(patch)?) {
        fields.extend(changes);
    }
    serde_json::from_value(merged).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Stateless CRUD client bound to one entity type.
pub struct ResourceClient<T: Entity> {
    base_url: String,
    routes: Routes,
    shape: Arc<dyn WriteShape<T>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            routes: self.routes,
            shape: Arc::clone(&self.shape),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &T::KIND)
            .field("base_url", &self.base_url)
            .field("routes", &self.routes)
            .finish()
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(base_url: &str, routes: Routes) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            routes,
            shape: Arc::new(Verbatim),
            _entity: PhantomData,
        }
    }

    /// Replace the default verbatim write shape.
    pub fn with_shape(mut self, shape: impl WriteShape<T> + 'static) -> Self {
        self.shape = Arc::new(shape);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn routes(&self) -> Routes {
        self.routes
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn item_url(&self, prefix: &str, id: EntityId) -> String {
        format!("{}{prefix}/{id}", self.base_url)
    }

    // --- build ---

    pub fn build_list(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.url(self.routes.list))
    }

    pub fn build_get(&self, id: EntityId) -> HttpRequest {
        bodiless(HttpMethod::Get, self.item_url(self.routes.item, id))
    }

    pub fn build_create(&self, draft: &T::Draft) -> Result<HttpRequest, ApiError> {
        let body = self.shape.create_body(draft)?;
        json_request(HttpMethod::Post, self.url(self.routes.create), &body)
    }

    pub fn build_update(&self, id: EntityId, entity: &T) -> Result<HttpRequest, ApiError> {
        let body = self.shape.update_body(entity)?;
        json_request(HttpMethod::Put, self.item_url(self.routes.update, id), &body)
    }

    pub fn build_delete(&self, id: EntityId) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.item_url(self.routes.delete, id))
    }

    // --- parse ---

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<T>, ApiError> {
        decode(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- execute ---

    pub fn list(&self, transport: &impl Transport) -> Result<Vec<T>, ApiError> {
        self.parse_list(transport.execute(&self.build_list())?)
    }

    pub fn get(&self, transport: &impl Transport, id: EntityId) -> Result<T, ApiError> {
        self.parse_get(transport.execute(&self.build_get(id))?)
    }

    pub fn create(&self, transport: &impl Transport, draft: &T::Draft) -> Result<T, ApiError> {
        self.parse_create(transport.execute(&self.build_create(draft)?)?)
    }

    pub fn update(&self, transport: &impl Transport, id: EntityId, entity: &T) -> Result<T, ApiError> {
        self.parse_update(transport.execute(&self.build_update(id, entity)?)?)
    }

    pub fn delete(&self, transport: &impl Transport, id: EntityId) -> Result<(), ApiError> {
        self.parse_delete(transport.execute(&self.build_delete(id))?)
    }
}

fn bodiless(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request(method: HttpMethod, url: String, body: &Value) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
        body: Some(body),
    })
}

/// Any 2xx is success; 404 gets its own variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

fn decode<D: DeserializeOwned>(response: HttpResponse) -> Result<D, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
