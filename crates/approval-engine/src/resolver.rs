//! Stage resolver: rebuilds the ordered approval trail
//!
//! Walks the fixed pipeline table, matching normalized records from a local
//! remaining pool. A record is consumed by at most one stage; the pool is a
//! value owned by the call, so consumption is never visible outside it.

use crate::{canonicalize_date, EngineConfig, RecordNormalizer};
use approval_types::{
    standard_pipeline, ApprovalStage, FormSnapshot, RawAction, StageDef, StatusStateMachine,
    PENDING_LABEL,
};
use serde_json::Value;

/// Reconstructs the display-ready approval trail for one form.
#[derive(Clone, Debug, Default)]
pub struct StageResolver {
    config: EngineConfig,
    normalizer: RecordNormalizer,
}

impl StageResolver {
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
    /// A malformed form yields an empty snapshot; a non-array action payload
    /// yields an empty pool. Neither aborts resolution.
    pub fn resolve_value(&self, form: &Value, raw_actions: &Value) -> Vec<ApprovalStage> {
        let form = FormSnapshot::from_value(form);
        let pool = RawAction::list_from_value(raw_actions);
        self.resolve(&form, &pool)
    }

    /// Resolve the ordered stage list: 4 entries, or 5 when the form's
    /// amount strictly exceeds the Operation-Manager threshold.
    ///
    /// Per stage, in fixed pipeline order: skip if not included; otherwise
    /// consume the first record matched by the highest-priority rule; with
    /// no record, synthesize an acted entry when the form status proves the
    /// step happened, else emit a pending entry. Missing upstream data
    /// degrades the affected stage only.
    pub fn resolve(&self, form: &FormSnapshot, pool: &[RawAction]) -> Vec<ApprovalStage> {
        let mut remaining: Vec<RawAction> = pool.to_vec();
        let mut stages = Vec::with_capacity(standard_pipeline().len());

        for def in standard_pipeline() {
            if !def.included(form, self.config.op_approval_threshold) {
                continue;
            }

            match self.take_match(def, &mut remaining) {
                Some(record) => {
                    tracing::debug!(stage = ?def.slot, form_id = %form.id, "action record consumed");
                    stages.push(self.stage_from_record(def, &record, form));
                }
                None if StatusStateMachine::is_reached(form.status, def.slot) => {
                    tracing::debug!(
                        stage = ?def.slot,
                        form_id = %form.id,
                        status = %form.status,
                        "no record survived upstream; stage synthesized from form status"
                    );
                    stages.push(self.stage_from_form(def, form));
                }
                None => stages.push(ApprovalStage::pending(def)),
            }
        }

        stages
    }

    /// First rule with any match selects the first matching record
    /// (original-order tie-break) and removes it from the pool.
    fn take_match(&self, def: &StageDef, remaining: &mut Vec<RawAction>) -> Option<RawAction> {
        for rule in def.match_rules {
            let position = remaining.iter().position(|record| {
                let (user_type, status) = self.normalizer.peek(record);
                rule.matches(user_type, status)
            });
            if let Some(index) = position {
                return Some(remaining.remove(index));
            }
        }
        None
    }

    fn stage_from_record(
        &self,
        def: &StageDef,
        record: &RawAction,
        form: &FormSnapshot,
    ) -> ApprovalStage {
        let action = self.normalizer.normalize(record, def, form);

        let display_status = if action.status == def.expected_status || action.acted {
            if action.status_text.is_empty() {
                def.expected_status.label().to_string()
            } else {
                action.status_text.clone()
            }
        } else {
            PENDING_LABEL.to_string()
        };

        ApprovalStage {
            slot: def.slot,
            label: def.label.to_string(),
            role_name: def.role_name.to_string(),
            user_type: action.user_type,
            acted: action.acted,
            display_name: action.actor_name,
            display_date: action.acted_at,
            display_status,
            comment: action.comment,
        }
    }

    /// Defensive inclusion: the status proves the step happened but no
    /// record survived, so display fields come from the form-level
    /// denormalized fallbacks only. No viewer identity is ever substituted
    /// for a missing actor name.
    fn stage_from_form(&self, def: &StageDef, form: &FormSnapshot) -> ApprovalStage {
        ApprovalStage {
            slot: def.slot,
            label: def.label.to_string(),
            role_name: def.role_name.to_string(),
            user_type: def.user_type,
            acted: true,
            display_name: form.first_field(def.name_fallback_fields),
            display_date: canonicalize_date(&form.first_field(def.date_fallback_fields)),
            display_status: def.expected_status.label().to_string(),
            comment: String::new(),
        }
    }
}
