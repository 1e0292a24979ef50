//! The resolved approval trail entry
//!
//! One `ApprovalStage` per included pipeline slot, produced fresh on every
//! resolution call and consumed by the presentation layer to render the
//! timeline. Never persisted.

use crate::{StageDef, StageSlot, UserType};
use serde::{Deserialize, Serialize};

/// Display label used by stages and recipients when no status applies.
pub const PENDING_LABEL: &str = "Pending";

/// One resolved entry of the approval trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStage {
    pub slot: StageSlot,
    pub label: String,
    pub role_name: String,
    pub user_type: UserType,
    /// Whether the step is considered performed
    pub acted: bool,
    /// Attributed actor name; empty when unresolvable
    pub display_name: String,
    pub display_date: String,
    pub display_status: String,
    pub comment: String,
}

impl ApprovalStage {
    /// A pending entry for a stage with no matched record and a form status
    /// that does not reach it.
    pub fn pending(def: &StageDef) -> Self {
        Self {
            slot: def.slot,
            label: def.label.to_string(),
            role_name: def.role_name.to_string(),
            user_type: def.user_type,
            acted: false,
            display_name: String::new(),
            display_date: String::new(),
            display_status: PENDING_LABEL.to_string(),
            comment: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_pipeline;

    #[test]
    fn test_pending_stage_is_empty() {
        let def = &standard_pipeline()[0];
        let stage = ApprovalStage::pending(def);
        assert!(!stage.acted);
        assert_eq!(stage.label, "Checked");
        assert_eq!(stage.display_status, PENDING_LABEL);
        assert!(stage.display_name.is_empty());
        assert!(stage.comment.is_empty());
    }
}
