//! Generic CRUD client shared by every API resource.
//!
//! DESIGN
//! ======
//! A resource is described once by a [`ResourceSpec`]: base path, whether
//! reads need the token, and one field projection per write operation.
//! [`ResourceClient`] turns that description into the five standard calls:
//!
//! | op       | method | path                 |
//! |----------|--------|----------------------|
//! | list     | GET    | `<base>?..&page=N`   |
//! | get      | GET    | `<base>/:id`         |
//! | create   | POST   | `<base>/create`      |
//! | update   | PATCH  | `<base>/:id/update`  |
//! | delete   | DELETE | `<base>/:id/delete`  |
//!
//! Resource-specific endpoints are added as inherent impls on the concrete
//! `ResourceClient<Dto>` in `resources`.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use std::fmt;

use serde_json::{Map, Value};

use super::client::{Access, ApiClient};
use super::error::ApiError;
use super::transport::{ApiRequest, Method};

/// Builds the outgoing JSON body for a write operation.
pub type Projection<D> = fn(&D) -> Value;

/// Static description of one server resource.
pub struct ResourceSpec<D> {
    /// Short name used in errors and logs, e.g. `"companies"`.
    pub name: &'static str,
    /// Base path, e.g. `/companies`.
    pub base_path: &'static str,
    /// Token policy for GET requests.
    pub reads: Access,
    /// Body for `create`; `None` when the resource has no `<base>/create`.
    pub create: Option<Projection<D>>,
    /// Body for `update`; `None` when the resource cannot be updated.
    pub update: Option<Projection<D>>,
    /// Whether `<base>/:id/delete` exists.
    pub delete: bool,
}

/// CRUD client for one resource.
pub struct ResourceClient<D: 'static> {
    api: ApiClient,
    spec: &'static ResourceSpec<D>,
}

impl<D> Clone for ResourceClient<D> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone(), spec: self.spec }
    }
}

impl<D> fmt::Debug for ResourceClient<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_path", &self.spec.base_path)
            .finish_non_exhaustive()
    }
}

impl<D> ResourceClient<D> {
    #[must_use]
    pub fn new(api: ApiClient, spec: &'static ResourceSpec<D>) -> Self {
        Self { api, spec }
    }

    #[must_use]
    pub fn spec(&self) -> &'static ResourceSpec<D> {
        self.spec
    }

    /// `GET <base>?<filters>&page=N`. Omitting `page` leaves the default to the server.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn list(&self, page: Option<u32>, filters: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.read(self.list_request(page, filters)).await
    }

    /// `GET <base>/:id`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn get_by_id(&self, id: impl fmt::Display) -> Result<Value, ApiError> {
        self.read(ApiRequest::get(self.item_path(&id, None))).await
    }

    /// `POST <base>/create` with the projected fields of `dto`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unsupported`] without a create projection, otherwise any
    /// [`ApiError`] from the call.
    pub async fn create(&self, dto: &D) -> Result<Value, ApiError> {
        let project = self.spec.create.ok_or_else(|| self.unsupported("create"))?;
        let path = format!("{}/create", self.spec.base_path);
        self.protected(ApiRequest::new(Method::Post, path).with_body(project(dto))).await
    }

    /// `PATCH <base>/:id/update` with the projected fields of `dto`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unsupported`] without an update projection, otherwise any
    /// [`ApiError`] from the call.
    pub async fn update(&self, id: impl fmt::Display, dto: &D) -> Result<Value, ApiError> {
        let project = self.spec.update.ok_or_else(|| self.unsupported("update"))?;
        let path = self.item_path(&id, Some("update"));
        self.protected(ApiRequest::new(Method::Patch, path).with_body(project(dto))).await
    }

    /// `DELETE <base>/:id/delete`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unsupported`] when the resource has no delete endpoint,
    /// otherwise any [`ApiError`] from the call.
    pub async fn delete(&self, id: impl fmt::Display) -> Result<Value, ApiError> {
        if !self.spec.delete {
            return Err(self.unsupported("delete"));
        }
        self.protected(ApiRequest::new(Method::Delete, self.item_path(&id, Some("delete")))).await
    }

    /// `GET <base>?<filters>&page=N`, filters first.
    pub(crate) fn list_request(&self, page: Option<u32>, filters: &[(&str, &str)]) -> ApiRequest {
        let mut request = ApiRequest::get(self.spec.base_path);
        for (key, value) in filters {
            request = request.with_query(key, value);
        }
        if let Some(page) = page {
            request = request.with_query("page", page);
        }
        request
    }

    /// `<base>/:id` or `<base>/:id/<action>`.
    pub(crate) fn item_path(&self, id: &dyn fmt::Display, action: Option<&str>) -> String {
        match action {
            Some(action) => format!("{}/{id}/{action}", self.spec.base_path),
            None => format!("{}/{id}", self.spec.base_path),
        }
    }

    pub(crate) async fn read(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.api.execute(request, self.spec.reads).await
    }

    pub(crate) async fn protected(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.api.execute(request, Access::Protected).await
    }

    fn unsupported(&self, operation: &'static str) -> ApiError {
        ApiError::Unsupported { resource: self.spec.name, operation }
    }
}

// =============================================================================
// PROJECTION HELPERS
// =============================================================================

/// Builder for projected request bodies. `None` fields are left out, matching
/// how browsers drop `undefined` members when serializing.
#[derive(Debug, Default)]
pub struct Body(Map<String, Value>);

impl Body {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` when `value` is present.
    #[must_use]
    pub fn field<T>(mut self, key: &str, value: Option<&T>) -> Self
    where
        T: Clone + Into<Value>,
    {
        if let Some(value) = value {
            self.0.insert(key.to_owned(), value.clone().into());
        }
        self
    }

    #[must_use]
    pub fn finish(self) -> Value {
        Value::Object(self.0)
    }
}
