//! Registry of the resource kinds whose status this crate manages.
//!
//! The set of kinds is closed: every kind-specific decision (API coordinates,
//! state spellings) is a match arm on [`ResourceKind`], so registering a new
//! kind means adding one variant here.

use std::fmt;
use std::str::FromStr;

use kube::Resource;
use kube::api::ApiResource;
use kube::core::{DynamicObject, TypeMeta};
use serde::Serialize;

use super::condition::{FAILED, NOT_READY, READY};
use super::{NIMService, NemoGuardrail};
use crate::controller::error::{Error, Result};

/// Lifecycle outcome recorded on a managed resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceState {
    Ready,
    NotReady,
    Failed,
}

impl ResourceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceState::Ready => READY,
            ResourceState::NotReady => NOT_READY,
            ResourceState::Failed => FAILED,
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Ready" => Ok(ResourceState::Ready),
            "NotReady" => Ok(ResourceState::NotReady),
            "Failed" => Ok(ResourceState::Failed),
            _ => Err(format!("Unknown resource state: {}", s)),
        }
    }
}

/// Enumeration of all managed resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    NIMService,
    NemoGuardrail,
}

impl ResourceKind {
    /// Kind name as it appears in `kind:`
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::NIMService => "NIMService",
            ResourceKind::NemoGuardrail => "NemoGuardrail",
        }
    }

    /// All registered kinds
    pub fn all() -> &'static [Self] {
        &[ResourceKind::NIMService, ResourceKind::NemoGuardrail]
    }

    /// API coordinates used to address objects of this kind dynamically
    pub fn api_resource(&self) -> ApiResource {
        match self {
            ResourceKind::NIMService => ApiResource::erase::<NIMService>(&()),
            ResourceKind::NemoGuardrail => ApiResource::erase::<NemoGuardrail>(&()),
        }
    }

    /// Spelling of the `.status.state` label for an outcome.
    pub fn state_label(&self, state: ResourceState) -> &'static str {
        match (self, state) {
            (ResourceKind::NIMService, ResourceState::Ready) => "Ready",
            (ResourceKind::NIMService, ResourceState::NotReady) => "NotReady",
            (ResourceKind::NIMService, ResourceState::Failed) => "Failed",
            (ResourceKind::NemoGuardrail, ResourceState::Ready) => "Ready",
            (ResourceKind::NemoGuardrail, ResourceState::NotReady) => "NotReady",
            (ResourceKind::NemoGuardrail, ResourceState::Failed) => "Failed",
        }
    }

    /// Resolve the kind of a dynamic object.
    ///
    /// Both `kind` and, when present, `apiVersion` must match a registered
    /// kind; anything else is [`Error::UnsupportedKind`].
    pub fn from_object(obj: &DynamicObject) -> Result<Self> {
        let types = obj
            .types
            .as_ref()
            .ok_or_else(|| Error::UnsupportedKind("<missing kind>".to_string()))?;
        let kind: ResourceKind = types
            .kind
            .parse()
            .map_err(|_| Error::UnsupportedKind(types.kind.clone()))?;
        if !types.api_version.is_empty() && types.api_version != kind.api_resource().api_version {
            return Err(Error::UnsupportedKind(format!(
                "{}/{}",
                types.api_version, types.kind
            )));
        }
        Ok(kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NIMService" => Ok(ResourceKind::NIMService),
            "NemoGuardrail" => Ok(ResourceKind::NemoGuardrail),
            _ => Err(Error::UnsupportedKind(s.to_string())),
        }
    }
}

/// Identity of a managed object: kind, namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Build the handle for a dynamic object, validating its kind first.
    pub fn from_object(obj: &DynamicObject) -> Result<Self> {
        let kind = ResourceKind::from_object(obj)?;
        let namespace = obj
            .metadata
            .namespace
            .clone()
            .ok_or_else(|| Error::MissingField("metadata.namespace".to_string()))?;
        let name = obj
            .metadata
            .name
            .clone()
            .ok_or_else(|| Error::MissingField("metadata.name".to_string()))?;
        Ok(Self {
            kind,
            namespace,
            name,
        })
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
    }
}

/// Convert a typed resource into the dynamic form the updater operates on.
pub fn to_dynamic<K>(resource: &K) -> Result<DynamicObject>
where
    K: Resource<DynamicType = ()> + Serialize,
{
    let mut obj: DynamicObject = serde_json::from_value(serde_json::to_value(resource)?)?;
    obj.types = Some(TypeMeta {
        api_version: K::api_version(&()).into_owned(),
        kind: K::kind(&()).into_owned(),
    });
    Ok(obj)
}
