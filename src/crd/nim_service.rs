//! NIMService Custom Resource Definition.
//!
//! A NIMService deploys a NVIDIA Inference Microservice serving one model.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// NIMService is a custom resource for deploying an inference microservice.
///
/// Example:
/// ```yaml
/// apiVersion: apps.nvidia.com/v1alpha1
/// kind: NIMService
/// metadata:
///   name: meta-llama3-8b
/// spec:
///   image:
///     repository: nvcr.io/nim/meta/llama3-8b-instruct
///     tag: "1.0.0"
///   replicas: 1
///   modelName: meta/llama3-8b-instruct
/// ```
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "apps.nvidia.com",
    version = "v1alpha1",
    kind = "NIMService",
    plural = "nimservices",
    shortname = "nimsvc",
    status = "NIMServiceStatus",
    namespaced,
    printcolumn = r#"{"name":"Status", "type":"string", "jsonPath":".status.state"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct NIMServiceSpec {
    /// Container image for the microservice.
    pub image: ImageSpec,

    /// Number of serving replicas.
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    /// Name of the model served by this service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

fn default_replicas() -> i32 {
    1
}

/// Container image reference.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    /// Image repository.
    pub repository: String,

    /// Image tag.
    pub tag: String,

    /// Image pull policy (Always, IfNotPresent, Never).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_policy: Option<String>,
}

/// Status of a NIMService.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NIMServiceStatus {
    /// Conditions describing the current state.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Number of replicas ready to serve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_replicas: Option<i32>,

    /// Lifecycle state (Ready, NotReady, Failed).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
}
