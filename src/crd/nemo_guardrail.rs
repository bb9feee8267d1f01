//! NemoGuardrail Custom Resource Definition.
//!
//! A NemoGuardrail deploys a guardrails service in front of a model endpoint.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::nim_service::ImageSpec;

/// NemoGuardrail is a custom resource for deploying a guardrails service.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "apps.nvidia.com",
    version = "v1alpha1",
    kind = "NemoGuardrail",
    plural = "nemoguardrails",
    shortname = "nemogr",
    status = "NemoGuardrailStatus",
    namespaced,
    printcolumn = r#"{"name":"Status", "type":"string", "jsonPath":".status.state"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct NemoGuardrailSpec {
    /// Container image for the guardrails service.
    pub image: ImageSpec,

    /// Number of replicas.
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    /// ConfigMap holding the guardrail rail definitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<String>,
}

fn default_replicas() -> i32 {
    1
}

/// Status of a NemoGuardrail.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NemoGuardrailStatus {
    /// Conditions describing the current state.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Number of ready replicas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_replicas: Option<i32>,

    /// Lifecycle state (Ready, NotReady, Failed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
}
