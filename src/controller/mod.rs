//! Controller-side status handling for nim-operator.
//!
//! Contains the condition list editor, the Ready/NotReady/Failed transition
//! applier, the status store abstraction and error handling.

pub mod conditions;
pub mod error;
pub mod status;
pub mod store;
