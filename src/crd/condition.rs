//! Status condition types shared by every managed resource kind.

use std::str::FromStr;

use kube::core::DynamicObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::controller::error::{Error, Result};

/// Condition type and reason token for readiness
pub const READY: &str = "Ready";
/// State token for a resource that is not yet ready
pub const NOT_READY: &str = "NotReady";
/// Condition type and reason token for failure
pub const FAILED: &str = "Failed";

/// Tri-state status of a condition.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        }
    }
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConditionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "True" => Ok(ConditionStatus::True),
            "False" => Ok(ConditionStatus::False),
            "Unknown" => Ok(ConditionStatus::Unknown),
            _ => Err(format!("Unknown condition status: {}", s)),
        }
    }
}

/// Condition describes one observed aspect of a resource at a point in time.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, unique within a condition list.
    pub r#type: String,
    /// Status of the condition.
    #[serde(default)]
    pub status: ConditionStatus,
    /// Machine-readable reason for the condition's last transition.
    #[serde(default)]
    pub reason: String,
    /// Human-readable message indicating details about last transition.
    #[serde(default)]
    pub message: String,
    /// Last time the condition was written.
    #[serde(default)]
    pub last_transition_time: String,
    /// The generation of the resource this condition was observed for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    /// Create a new condition stamped with the current time.
    pub fn new(condition_type: &str, status: ConditionStatus, reason: &str, message: &str) -> Self {
        Self {
            r#type: condition_type.to_string(),
            status,
            reason: reason.to_string(),
            message: message.to_string(),
            last_transition_time: jiff::Timestamp::now().to_string(),
            observed_generation: None,
        }
    }

    /// Whether the condition status is `True`.
    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }
}

/// Kind-agnostic view of a managed resource's status.
///
/// Only `conditions` and `state` are interpreted. Every other status field
/// (for example `availableReplicas`) is carried through `extra` untouched, so
/// a status read from one kind serializes back to the same shape.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionedStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Lifecycle label; empty until the first transition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConditionedStatus {
    /// Read the status subresource of a dynamic object.
    ///
    /// A missing or null status yields an empty status.
    pub fn from_object(obj: &DynamicObject) -> Result<Self> {
        match obj.data.get("status") {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }

    /// Serialize into the JSON value stored under `.status`.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(Error::from)
    }
}
