//! Notification router: transition → deduplicated recipient set
//!
//! Table-driven fan-out sharing the status/amount facts with the stage
//! resolver. Computes the target set only; dispatch, delivery state, and
//! retry belong to an external service.

use crate::fallback::{ACTOR_ID_FIELDS, ACTOR_NAME_FIELDS, BRANCH_FIELDS};
use crate::{EngineConfig, RecordNormalizer};
use approval_types::{FormSnapshot, NotificationRecipient, RawAction, Transition, UserType};
use serde_json::Value;
use std::collections::HashSet;

/// Recipient user types per transition, for the pool-derived branches.
const CREATE_TARGETS: &[UserType] = &[UserType::Checker, UserType::BmApprover];
const CHECK_TARGETS: &[UserType] = &[UserType::BmApprover];
/// The two clerk code families are merged for approval and acknowledgement.
const CLERK_TARGETS: &[UserType] = &[UserType::AccountClerk, UserType::BranchAccount];

/// Computes who to notify after a transition that already occurred.
#[derive(Clone, Debug, Default)]
pub struct NotificationRouter {
    config: EngineConfig,
    normalizer: RecordNormalizer,
}

impl NotificationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            normalizer: RecordNormalizer::new(),
        }
    }

    /// Tolerant entry point for callers holding the raw upstream payloads.
    pub fn compute_recipients_value(
        &self,
        form: &Value,
        raw_actions: &Value,
        transition: Transition,
    ) -> Vec<NotificationRecipient> {
        let form = FormSnapshot::from_value(form);
        let pool = RawAction::list_from_value(raw_actions);
        self.compute_recipients(&form, &pool, transition)
    }

    /// The deduplicated recipient set for one transition.
    ///
    /// Candidates that resolve no id are dropped whole, never emitted as
    /// partial entries. Deduplication is by id, first occurrence wins.
    pub fn compute_recipients(
        &self,
        form: &FormSnapshot,
        pool: &[RawAction],
        transition: Transition,
    ) -> Vec<NotificationRecipient> {
        let candidates = match transition {
            Transition::Create => self.from_pool(form, pool, CREATE_TARGETS, transition),
            Transition::Check => self.from_pool(form, pool, CHECK_TARGETS, transition),
            Transition::Approve => {
                if self.config.over_threshold(form.total_amount) {
                    vec![self.operations_manager(form, transition)]
                } else {
                    self.from_pool(form, pool, CLERK_TARGETS, transition)
                }
            }
            Transition::Acknowledge => self.from_pool(form, pool, CLERK_TARGETS, transition),
            Transition::Issue => self.originator(form, transition),
        };

        dedup_by_id(candidates)
    }

    /// Actors from the raw pool whose user type is in the target set.
    fn from_pool(
        &self,
        form: &FormSnapshot,
        pool: &[RawAction],
        targets: &[UserType],
        transition: Transition,
    ) -> Vec<NotificationRecipient> {
        let mut recipients = Vec::new();
        for record in pool {
            let (user_type, _) = self.normalizer.peek(record);
            if !targets.contains(&user_type) {
                continue;
            }

            let id = record.first_str(ACTOR_ID_FIELDS);
            if id.is_empty() {
                tracing::debug!(
                    form_id = %form.id,
                    user_type = %user_type,
                    %transition,
                    "candidate dropped: no resolvable id"
                );
                continue;
            }

            let record_branch = record.first_str(BRANCH_FIELDS);
            recipients.push(NotificationRecipient {
                id,
                name: record.first_str(ACTOR_NAME_FIELDS),
                role: user_type.role_name().to_string(),
                user_type,
                reason: transition.reason().to_string(),
                branch: if record_branch.is_empty() {
                    form.branch.clone()
                } else {
                    record_branch
                },
            });
        }
        recipients
    }

    /// The fixed over-threshold recipient. Configured identity, never
    /// derived from the pool.
    fn operations_manager(
        &self,
        form: &FormSnapshot,
        transition: Transition,
    ) -> NotificationRecipient {
        NotificationRecipient {
            id: self.config.operations_manager.id.clone(),
            name: self.config.operations_manager.name.clone(),
            role: UserType::OperationManager.role_name().to_string(),
            user_type: UserType::OperationManager,
            reason: transition.reason().to_string(),
            branch: form.branch.clone(),
        }
    }

    /// The form originator, or nobody when no id resolves.
    fn originator(&self, form: &FormSnapshot, transition: Transition) -> Vec<NotificationRecipient> {
        if form.originator_id.trim().is_empty() {
            tracing::debug!(form_id = %form.id, "issue notification skipped: no originator id");
            return Vec::new();
        }
        vec![NotificationRecipient {
            id: form.originator_id.clone(),
            name: form.originator_name.clone(),
            role: UserType::Originator.role_name().to_string(),
            user_type: UserType::Originator,
            reason: transition.reason().to_string(),
            branch: form.branch.clone(),
        }]
    }
}

/// Deduplicate by id, first occurrence wins. Order otherwise preserved.
fn dedup_by_id(candidates: Vec<NotificationRecipient>) -> Vec<NotificationRecipient> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|recipient| seen.insert(recipient.id.clone()))
        .collect()
}
