//! Status management utilities.
//!
//! Editing and querying of condition lists. Everything here is pure and
//! operates on the in-memory list only.

use crate::crd::{Condition, ConditionStatus};

/// Add or update a condition.
///
/// An existing record of `condition_type` is overwritten in place and its
/// `lastTransitionTime` refreshed; otherwise a new record is appended.
pub fn upsert_condition(
    conditions: &mut Vec<Condition>,
    condition_type: &str,
    status: ConditionStatus,
    reason: &str,
    message: &str,
) {
    if !update_condition_if_present(conditions, condition_type, status, reason, message) {
        conditions.push(Condition::new(condition_type, status, reason, message));
    }
}

/// Update a condition only if a record of that type already exists.
///
/// Returns `true` if a record was updated.
pub fn update_condition_if_present(
    conditions: &mut [Condition],
    condition_type: &str,
    status: ConditionStatus,
    reason: &str,
    message: &str,
) -> bool {
    match conditions.iter_mut().find(|c| c.r#type == condition_type) {
        Some(existing) => {
            existing.status = status;
            existing.reason = reason.to_string();
            existing.message = message.to_string();
            existing.last_transition_time = jiff::Timestamp::now().to_string();
            true
        }
        None => false,
    }
}

/// Find a condition by type
pub fn find_condition<'a>(conditions: &'a [Condition], condition_type: &str) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Check if a condition type is true
pub fn is_condition_true(conditions: &[Condition], condition_type: &str) -> bool {
    find_condition(conditions, condition_type).is_some_and(Condition::is_true)
}

/// Get the reason for a condition
pub fn get_condition_reason<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a str> {
    find_condition(conditions, condition_type).map(|c| c.reason.as_str())
}
