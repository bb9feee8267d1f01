//! In-memory status store for functional tests.
//!
//! Behaves like the API server's status subresource as far as the updater can
//! observe: objects are keyed by kind/namespace/name, every successful write
//! bumps the resource version, and a write carrying a stale version is
//! rejected without touching the stored object.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use kube::core::DynamicObject;
use serde_json::Value;

use nim_operator::controller::error::{Error, Result};
use nim_operator::controller::store::{StatusStore, status_replacement};
use nim_operator::crd::ResourceRef;

#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<HashMap<ResourceRef, DynamicObject>>,
    version: AtomicUsize,
    gets: AtomicUsize,
    writes: AtomicUsize,
    /// When set, another writer bumps the object right after the next read.
    race_after_get: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object, assigning it a fresh resource version.
    pub fn insert(&self, mut obj: DynamicObject) -> ResourceRef {
        let target = ResourceRef::from_object(&obj).unwrap();
        obj.metadata.resource_version = Some(self.next_version());
        self.objects.lock().unwrap().insert(target.clone(), obj);
        target
    }

    pub fn remove(&self, target: &ResourceRef) {
        self.objects.lock().unwrap().remove(target);
    }

    /// Stored object, if any.
    pub fn object(&self, target: &ResourceRef) -> Option<DynamicObject> {
        self.objects.lock().unwrap().get(target).cloned()
    }

    /// Serialized bytes of the stored object.
    pub fn raw(&self, target: &ResourceRef) -> Vec<u8> {
        serde_json::to_vec(&self.object(target).unwrap()).unwrap()
    }

    /// Simulate a write by another client.
    pub fn touch(&self, target: &ResourceRef) {
        let version = self.next_version();
        if let Some(obj) = self.objects.lock().unwrap().get_mut(target) {
            obj.metadata.resource_version = Some(version);
        }
    }

    /// Make the next read race with another writer.
    pub fn race_next_get(&self) {
        self.race_after_get.store(true, Ordering::SeqCst);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn next_version(&self) -> String {
        (self.version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

#[async_trait]
impl StatusStore for InMemoryStore {
    async fn get(&self, target: &ResourceRef) -> Result<DynamicObject> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let obj = self
            .object(target)
            .ok_or_else(|| Error::NotFound(target.to_string()))?;
        if self.race_after_get.swap(false, Ordering::SeqCst) {
            self.touch(target);
        }
        Ok(obj)
    }

    async fn update_status(
        &self,
        target: &ResourceRef,
        current: &DynamicObject,
        status: &Value,
    ) -> Result<DynamicObject> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let version = self.next_version();
        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .get_mut(target)
            .ok_or_else(|| Error::NotFound(target.to_string()))?;
        if stored.metadata.resource_version != current.metadata.resource_version {
            return Err(Error::Conflict(target.to_string()));
        }
        // Same body the real store PUTs to the status subresource; the
        // server keeps only `.status` from it.
        let replacement = status_replacement(current, status);
        stored.data["status"] = replacement.data["status"].clone();
        stored.metadata.resource_version = Some(version);
        Ok(stored.clone())
    }
}
