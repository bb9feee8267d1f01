//! Custom Resource Definitions (CRDs) for nim-operator.
//!
//! - `NIMService`: Deploy an inference microservice
//! - `NemoGuardrail`: Deploy a guardrails service
//!
//! Both kinds share the condition types in `condition` and are registered in
//! `kind`.

mod condition;
mod kind;
mod nemo_guardrail;
mod nim_service;

pub use condition::*;
pub use kind::*;
pub use nemo_guardrail::*;
pub use nim_service::*;
