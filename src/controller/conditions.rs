//! Ready / NotReady / Failed transitions for managed resources.
//!
//! Each transition edits two conditions together so that `Ready` and
//! `Failed` are never both `True`, sets the kind's `state` label, and writes
//! the resulting status over the freshly fetched object.

use std::sync::Arc;

use kube::core::DynamicObject;
use tracing::{debug, info, warn};

use crate::controller::error::Result;
use crate::controller::status::upsert_condition;
use crate::controller::store::StatusStore;
use crate::crd::{ConditionStatus, ConditionedStatus, ResourceKind, ResourceRef, ResourceState};

pub use crate::crd::{FAILED, NOT_READY, READY};

/// Creation of the service account failed
pub const REASON_SERVICE_ACCOUNT_FAILED: &str = "ServiceAccountFailed";
/// Creation of the role failed
pub const REASON_ROLE_FAILED: &str = "RoleFailed";
/// Creation of the role binding failed
pub const REASON_ROLE_BINDING_FAILED: &str = "RoleBindingFailed";
/// Creation of the service failed
pub const REASON_SERVICE_FAILED: &str = "ServiceFailed";
/// Creation of the ingress failed
pub const REASON_INGRESS_FAILED: &str = "IngressFailed";
/// Creation of the horizontal pod autoscaler failed
pub const REASON_HPA_FAILED: &str = "HPAFailed";
/// Creation of the security context constraints failed
pub const REASON_SCC_FAILED: &str = "SCCFailed";
/// Creation of the service monitor failed
pub const REASON_SERVICE_MONITOR_FAILED: &str = "ServiceMonitorFailed";
/// Creation of the deployment failed
pub const REASON_DEPLOYMENT_FAILED: &str = "DeploymentFailed";
/// Creation of the statefulset failed
pub const REASON_STATEFULSET_FAILED: &str = "StatefulsetFailed";

/// Apply the condition edits and state label for `outcome` to `status`.
///
/// Pure: no I/O, and the only time-dependent output is the
/// `lastTransitionTime` of the two edited conditions.
pub fn apply_transition(
    status: &mut ConditionedStatus,
    kind: ResourceKind,
    outcome: ResourceState,
    reason: &str,
    message: &str,
) {
    let conditions = &mut status.conditions;
    match outcome {
        ResourceState::Ready => {
            upsert_condition(conditions, READY, ConditionStatus::True, reason, message);
            upsert_condition(conditions, FAILED, ConditionStatus::False, READY, "");
        }
        ResourceState::NotReady => {
            upsert_condition(conditions, READY, ConditionStatus::False, reason, message);
            // The pending message is mirrored onto Failed; Ready and Failed
            // outcomes leave the counterpart message empty.
            upsert_condition(conditions, FAILED, ConditionStatus::False, READY, message);
        }
        ResourceState::Failed => {
            upsert_condition(conditions, READY, ConditionStatus::False, FAILED, "");
            upsert_condition(conditions, FAILED, ConditionStatus::True, reason, message);
        }
    }
    status.state = kind.state_label(outcome).to_string();
}

/// Records Ready / NotReady / Failed verdicts on managed resources.
#[derive(Clone)]
pub struct ConditionUpdater {
    /// Object store (trait object for testability)
    store: Arc<dyn StatusStore>,
}

impl ConditionUpdater {
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self { store }
    }

    /// Mark the resource ready.
    pub async fn mark_ready(
        &self,
        resource: &mut DynamicObject,
        reason: &str,
        message: &str,
    ) -> Result<()> {
        self.transition(resource, ResourceState::Ready, reason, message)
            .await
    }

    /// Mark the resource not ready; `message` is also recorded on `Failed`.
    pub async fn mark_not_ready(
        &self,
        resource: &mut DynamicObject,
        reason: &str,
        message: &str,
    ) -> Result<()> {
        self.transition(resource, ResourceState::NotReady, reason, message)
            .await
    }

    /// Mark the resource failed.
    pub async fn mark_failed(
        &self,
        resource: &mut DynamicObject,
        reason: &str,
        message: &str,
    ) -> Result<()> {
        self.transition(resource, ResourceState::Failed, reason, message)
            .await
    }

    /// Compute the new status from the caller's copy and persist it.
    ///
    /// The kind is validated before any I/O. On success `resource` is
    /// replaced with the object returned by the store; on failure it is left
    /// as it was.
    async fn transition(
        &self,
        resource: &mut DynamicObject,
        outcome: ResourceState,
        reason: &str,
        message: &str,
    ) -> Result<()> {
        let target = ResourceRef::from_object(resource)?;
        let mut status = ConditionedStatus::from_object(resource)?;
        apply_transition(&mut status, target.kind, outcome, reason, message);

        debug!(
            resource = %target,
            state = %status.state,
            reason = %reason,
            "Computed status transition"
        );

        let updated = self.persist(&target, &status).await?;
        *resource = updated;

        info!(
            resource = %target,
            state = %status.state,
            "Status updated"
        );
        Ok(())
    }

    /// Re-read the object and overwrite its status with `status`.
    async fn persist(
        &self,
        target: &ResourceRef,
        status: &ConditionedStatus,
    ) -> Result<DynamicObject> {
        let current = self.store.get(target).await?;
        let value = status.to_value()?;
        self.store
            .update_status(target, &current, &value)
            .await
            .inspect_err(|e| {
                if e.is_conflict() {
                    warn!(resource = %target, "Status update conflicted with a newer version");
                }
            })
    }
}
