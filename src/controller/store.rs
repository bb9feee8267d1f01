//! Access to the authoritative copy of managed objects.
//!
//! [`StatusStore`] is the seam between the updater and the API server. The
//! production implementation talks to Kubernetes through a dynamic API per
//! registered kind; tests substitute a mock or an in-memory store.

use async_trait::async_trait;
use kube::api::PostParams;
use kube::core::DynamicObject;
use kube::{Api, Client};
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

use crate::controller::error::{Error, Result};
use crate::crd::ResourceRef;

/// Field manager name for the operator
pub const FIELD_MANAGER: &str = "nim-operator";

/// Trait abstracting the object store holding managed resources
///
/// This trait allows mocking the Kubernetes client in tests while using
/// the real client in production.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Fetch the current object for `target`.
    ///
    /// Returns [`Error::NotFound`] if the object does not exist.
    async fn get(&self, target: &ResourceRef) -> Result<DynamicObject>;

    /// Replace the status of `current` with `status`.
    ///
    /// `current` is the object returned by the preceding [`StatusStore::get`];
    /// its resource version guards the write. A stale version fails with
    /// [`Error::Conflict`] and leaves the stored object unchanged.
    async fn update_status(
        &self,
        target: &ResourceRef,
        current: &DynamicObject,
        status: &Value,
    ) -> Result<DynamicObject>;
}

/// Status store backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeStatusStore {
    client: Client,
    field_manager: String,
}

impl KubeStatusStore {
    /// Create a store using the default field manager
    pub fn new(client: Client) -> Self {
        Self::with_field_manager(client, FIELD_MANAGER)
    }

    /// Create a store that writes status under a custom field manager
    pub fn with_field_manager(client: Client, field_manager: impl Into<String>) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
        }
    }

    fn api(&self, target: &ResourceRef) -> Api<DynamicObject> {
        Api::namespaced_with(
            self.client.clone(),
            &target.namespace,
            &target.kind.api_resource(),
        )
    }
}

#[async_trait]
impl StatusStore for KubeStatusStore {
    async fn get(&self, target: &ResourceRef) -> Result<DynamicObject> {
        match self.api(target).get(&target.name).await {
            Ok(obj) => Ok(obj),
            Err(kube::Error::Api(e)) if e.code == 404 => Err(Error::NotFound(target.to_string())),
            Err(e) => Err(Error::Kube(e)),
        }
    }

    async fn update_status(
        &self,
        target: &ResourceRef,
        current: &DynamicObject,
        status: &Value,
    ) -> Result<DynamicObject> {
        let replacement = status_replacement(current, status);
        let params = PostParams {
            field_manager: Some(self.field_manager.clone()),
            ..Default::default()
        };
        match self
            .api(target)
            .replace_status(&target.name, &params, serde_json::to_vec(&replacement)?)
            .await
        {
            Ok(obj) => Ok(obj),
            Err(kube::Error::Api(e)) if e.code == 409 => Err(Error::Conflict(target.to_string())),
            Err(kube::Error::Api(e)) if e.code == 404 => Err(Error::NotFound(target.to_string())),
            Err(e) => Err(Error::Kube(e)),
        }
    }
}

/// Build the object sent to the status subresource.
///
/// The fetched object is copied with `.status` swapped for `status`, so the
/// PUT replaces the stored status at every depth. Its resource version is
/// kept, which makes the API server reject the write with 409 if the object
/// changed since it was read.
pub fn status_replacement(current: &DynamicObject, status: &Value) -> DynamicObject {
    let mut replacement = current.clone();
    replacement.data["status"] = status.clone();
    replacement
}
