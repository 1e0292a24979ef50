//! Form statuses and the reached-stage lookup table
//!
//! `StatusStateMachine` is a static table, not an executor: given a form
//! status it reports which pipeline stages that status implies were already
//! reached. The resolver uses it for defensive inclusion (a stage with no
//! surviving record is still shown as acted when the status proves the step
//! happened); the router uses it only indirectly through the same facts.

use crate::StageSlot;
use serde::{Deserialize, Serialize};

/// Canonical form status ladder.
///
/// Upstream spells these many ways; `FormStatus::parse` folds the known
/// spellings into one value. `Unknown` carries no implications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormStatus {
    Created,
    Checked,
    BmApproved,
    OpApproved,
    Acknowledged,
    Issued,
    Completed,
    Unknown,
}

impl FormStatus {
    /// Parse an upstream status string, case-insensitively, tolerating the
    /// spellings the data sources are known to emit. Never fails; anything
    /// unrecognized is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "created" | "new" | "submitted" | "pending" => Self::Created,
            "checked" => Self::Checked,
            "approved" | "bmapproved" => Self::BmApproved,
            "omapproved" | "opapproved" | "operationapproved" => Self::OpApproved,
            "acknowledged" | "ack" => Self::Acknowledged,
            "issued" => Self::Issued,
            "completed" | "complete" | "done" | "closed" => Self::Completed,
            _ => Self::Unknown,
        }
    }

    /// Canonical display label for this status
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Checked => "Checked",
            Self::BmApproved => "Approved",
            Self::OpApproved => "OM Approved",
            Self::Acknowledged => "Acknowledged",
            Self::Issued => "Issued",
            Self::Completed => "Completed",
            Self::Unknown => "Pending",
        }
    }
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static status → reached-stages lookup. Read-only; executes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusStateMachine;

impl StatusStateMachine {
    /// The ordered set of pipeline stages a status implies were reached.
    pub fn stages_reached(status: FormStatus) -> &'static [StageSlot] {
        use StageSlot::*;
        match status {
            FormStatus::Created | FormStatus::Unknown => &[],
            FormStatus::Checked => &[Checked],
            FormStatus::BmApproved => &[Checked, BmApproved],
            FormStatus::OpApproved => &[Checked, BmApproved, OpApproved],
            FormStatus::Acknowledged => &[Checked, BmApproved, OpApproved, Acknowledged],
            FormStatus::Issued | FormStatus::Completed => {
                &[Checked, BmApproved, OpApproved, Acknowledged, Issued]
            }
        }
    }

    /// Whether a status implies the given stage was reached.
    pub fn is_reached(status: FormStatus, slot: StageSlot) -> bool {
        Self::stages_reached(status).contains(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_spellings() {
        assert_eq!(FormStatus::parse("Checked"), FormStatus::Checked);
        assert_eq!(FormStatus::parse("  checked "), FormStatus::Checked);
        assert_eq!(FormStatus::parse("BM_Approved"), FormStatus::BmApproved);
        assert_eq!(FormStatus::parse("approved"), FormStatus::BmApproved);
        assert_eq!(FormStatus::parse("OM-Approved"), FormStatus::OpApproved);
        assert_eq!(FormStatus::parse("COMPLETED"), FormStatus::Completed);
        assert_eq!(FormStatus::parse("ack"), FormStatus::Acknowledged);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(FormStatus::parse("reverted"), FormStatus::Unknown);
        assert_eq!(FormStatus::parse(""), FormStatus::Unknown);
    }

    #[test]
    fn test_ladder_is_monotonic() {
        let ladder = [
            FormStatus::Created,
            FormStatus::Checked,
            FormStatus::BmApproved,
            FormStatus::OpApproved,
            FormStatus::Acknowledged,
            FormStatus::Issued,
            FormStatus::Completed,
        ];
        let mut prev = 0;
        for status in ladder {
            let reached = StatusStateMachine::stages_reached(status).len();
            assert!(reached >= prev, "{status:?} regressed the ladder");
            prev = reached;
        }
    }

    #[test]
    fn test_completed_reaches_issued() {
        assert!(StatusStateMachine::is_reached(
            FormStatus::Completed,
            StageSlot::Issued
        ));
    }

    #[test]
    fn test_checked_reaches_only_checked() {
        assert!(StatusStateMachine::is_reached(
            FormStatus::Checked,
            StageSlot::Checked
        ));
        assert!(!StatusStateMachine::is_reached(
            FormStatus::Checked,
            StageSlot::BmApproved
        ));
        assert!(!StatusStateMachine::is_reached(
            FormStatus::Checked,
            StageSlot::Issued
        ));
    }

    #[test]
    fn test_unknown_reaches_nothing() {
        assert!(StatusStateMachine::stages_reached(FormStatus::Unknown).is_empty());
    }
}
