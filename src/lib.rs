//! nim-operator library crate
//!
//! This module exports the CRD definitions and the status condition updater
//! used by the NIMService and NemoGuardrail controllers.

pub mod controller;
pub mod crd;

pub use controller::conditions::{ConditionUpdater, apply_transition};
pub use controller::error::{Error, Result};
pub use controller::store::{FIELD_MANAGER, KubeStatusStore, StatusStore};
