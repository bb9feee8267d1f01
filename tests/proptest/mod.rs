// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Property-based tests for nim-operator.
//!
//! Uses proptest to generate random condition lists and transition sequences
//! and verify the editor and transition invariants.

use proptest::prelude::*;

use nim_operator::apply_transition;
use nim_operator::controller::conditions::{FAILED, READY};
use nim_operator::controller::status::{
    find_condition, is_condition_true, update_condition_if_present, upsert_condition,
};
use nim_operator::crd::{
    Condition, ConditionStatus, ConditionedStatus, ResourceKind, ResourceState,
};

/// Strategy for condition type names drawn from a small pool so that
/// collisions with existing records are common.
fn condition_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Ready".to_string()),
        Just("Failed".to_string()),
        Just("Progressing".to_string()),
        Just("Available".to_string()),
        "[A-Z][a-z]{2,8}",
    ]
}

fn any_status() -> impl Strategy<Value = ConditionStatus> {
    prop_oneof![
        Just(ConditionStatus::True),
        Just(ConditionStatus::False),
        Just(ConditionStatus::Unknown),
    ]
}

fn any_state() -> impl Strategy<Value = ResourceState> {
    prop_oneof![
        Just(ResourceState::Ready),
        Just(ResourceState::NotReady),
        Just(ResourceState::Failed),
    ]
}

fn any_kind() -> impl Strategy<Value = ResourceKind> {
    prop_oneof![
        Just(ResourceKind::NIMService),
        Just(ResourceKind::NemoGuardrail),
    ]
}

/// Condition lists with unique types.
fn condition_list() -> impl Strategy<Value = Vec<Condition>> {
    prop::collection::vec((condition_type(), any_status(), "[A-Za-z]{0,12}"), 0..6).prop_map(
        |entries| {
            let mut conditions: Vec<Condition> = Vec::new();
            for (condition_type, status, reason) in entries {
                if find_condition(&conditions, &condition_type).is_none() {
                    conditions.push(Condition {
                        r#type: condition_type,
                        status,
                        reason,
                        message: String::new(),
                        last_transition_time: "2024-01-01T00:00:00Z".to_string(),
                        observed_generation: None,
                    });
                }
            }
            conditions
        },
    )
}

proptest! {
    /// Upserting a type not in the list appends exactly one record.
    #[test]
    fn upsert_absent_type_appends(
        mut conditions in condition_list(),
        condition_type in condition_type(),
        status in any_status(),
        reason in "[A-Za-z]{1,12}",
    ) {
        prop_assume!(find_condition(&conditions, &condition_type).is_none());
        let before = conditions.clone();

        upsert_condition(&mut conditions, &condition_type, status, &reason, "msg");

        prop_assert_eq!(conditions.len(), before.len() + 1);
        prop_assert_eq!(&conditions[..before.len()], &before[..]);
        let added = conditions.last().unwrap();
        prop_assert_eq!(&added.r#type, &condition_type);
        prop_assert_eq!(added.status, status);
        prop_assert_eq!(&added.reason, &reason);
    }

    /// Upserting an existing type keeps the length and touches only that record.
    #[test]
    fn upsert_present_type_updates_in_place(
        mut conditions in condition_list(),
        index in any::<prop::sample::Index>(),
        status in any_status(),
        reason in "[A-Za-z]{1,12}",
        message in "[ -~]{0,20}",
    ) {
        prop_assume!(!conditions.is_empty());
        let before = conditions.clone();
        let target = index.index(conditions.len());
        let condition_type = before[target].r#type.clone();

        upsert_condition(&mut conditions, &condition_type, status, &reason, &message);

        prop_assert_eq!(conditions.len(), before.len());
        for (i, (after, prior)) in conditions.iter().zip(before.iter()).enumerate() {
            if i == target {
                prop_assert_eq!(&after.r#type, &condition_type);
                prop_assert_eq!(after.status, status);
                prop_assert_eq!(&after.reason, &reason);
                prop_assert_eq!(&after.message, &message);
            } else {
                prop_assert_eq!(after, prior);
            }
        }
    }

    /// Update-if-present never adds a record for a missing type.
    #[test]
    fn update_if_present_absent_is_noop(
        mut conditions in condition_list(),
        condition_type in condition_type(),
        status in any_status(),
    ) {
        prop_assume!(find_condition(&conditions, &condition_type).is_none());
        let before = conditions.clone();

        let updated = update_condition_if_present(&mut conditions, &condition_type, status, "R", "m");

        prop_assert!(!updated);
        prop_assert_eq!(conditions, before);
    }

    /// Ready and Failed are never both True, and the last outcome wins.
    #[test]
    fn transitions_keep_ready_and_failed_exclusive(
        conditions in condition_list(),
        kind in any_kind(),
        outcomes in prop::collection::vec(any_state(), 1..12),
    ) {
        let mut status = ConditionedStatus {
            conditions,
            ..Default::default()
        };

        for outcome in &outcomes {
            apply_transition(&mut status, kind, *outcome, "Reason", "message");
            prop_assert!(
                !(is_condition_true(&status.conditions, READY)
                    && is_condition_true(&status.conditions, FAILED))
            );
        }

        let last = *outcomes.last().unwrap();
        prop_assert_eq!(&status.state, kind.state_label(last));
        prop_assert_eq!(is_condition_true(&status.conditions, READY), last == ResourceState::Ready);
        prop_assert_eq!(is_condition_true(&status.conditions, FAILED), last == ResourceState::Failed);

        let ready_records = status.conditions.iter().filter(|c| c.r#type == READY).count();
        let failed_records = status.conditions.iter().filter(|c| c.r#type == FAILED).count();
        prop_assert_eq!(ready_records, 1);
        prop_assert_eq!(failed_records, 1);
    }
}
