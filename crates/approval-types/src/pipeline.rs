//! The fixed approval pipeline, expressed as data
//!
//! Stage order, match rules, expected statuses, and the denormalized
//! form-field fallbacks are all declarative tables here, so the resolution
//! policy is auditable and testable without running the resolver.

use crate::{FormSnapshot, FormStatus, UserType};
use serde::{Deserialize, Serialize};

/// The five fixed pipeline slots, in trail order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageSlot {
    Checked,
    BmApproved,
    OpApproved,
    Acknowledged,
    Issued,
}

/// A declarative predicate matching a normalized (user type, status) pair.
///
/// Rules are evaluated in priority order; the first rule with any match in
/// the remaining pool selects a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Exact role and exact status
    RoleWithStatus(UserType, FormStatus),
    /// Exact role, any status
    Role(UserType),
    /// Merged clerk family (AccountClerk | BranchAccount) with exact status
    ClerkFamilyWithStatus(FormStatus),
    /// Merged clerk family, any status
    ClerkFamily,
}

impl MatchRule {
    pub fn matches(&self, user_type: UserType, status: FormStatus) -> bool {
        match self {
            Self::RoleWithStatus(role, expected) => user_type == *role && status == *expected,
            Self::Role(role) => user_type == *role,
            Self::ClerkFamilyWithStatus(expected) => {
                user_type.is_clerk_family() && status == *expected
            }
            Self::ClerkFamily => user_type.is_clerk_family(),
        }
    }
}

/// When a stage participates in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inclusion {
    Always,
    /// Only for forms whose amount strictly exceeds the configured threshold
    AboveOpApprovalThreshold,
}

/// One fixed pipeline slot descriptor.
#[derive(Clone, Copy, Debug)]
pub struct StageDef {
    pub slot: StageSlot,
    pub label: &'static str,
    pub role_name: &'static str,
    pub user_type: UserType,
    /// Match predicates in priority order
    pub match_rules: &'static [MatchRule],
    /// The status a matched record is expected to carry
    pub expected_status: FormStatus,
    pub include: Inclusion,
    /// Denormalized form fields tried for the actor name when the record
    /// itself carries none (record-level candidates come first, these after)
    pub name_fallback_fields: &'static [&'static str],
    /// Denormalized form fields tried for the action date
    pub date_fallback_fields: &'static [&'static str],
}

impl StageDef {
    /// Whether this stage participates for the given form.
    pub fn included(&self, form: &FormSnapshot, op_approval_threshold: f64) -> bool {
        match self.include {
            Inclusion::Always => true,
            Inclusion::AboveOpApprovalThreshold => form.total_amount > op_approval_threshold,
        }
    }
}

/// The fixed pipeline table. Output stage order is exactly this order,
/// independent of input record order.
pub fn standard_pipeline() -> &'static [StageDef] {
    STANDARD_PIPELINE
}

const STANDARD_PIPELINE: &[StageDef] = &[
    StageDef {
        slot: StageSlot::Checked,
        label: "Checked",
        role_name: "Checker",
        user_type: UserType::Checker,
        match_rules: &[
            MatchRule::RoleWithStatus(UserType::Checker, FormStatus::Checked),
            MatchRule::Role(UserType::Checker),
        ],
        expected_status: FormStatus::Checked,
        include: Inclusion::Always,
        name_fallback_fields: &["checkerName", "checker_name", "checkedBy", "checked_by"],
        date_fallback_fields: &["checkedDate", "checked_date", "checkedAt", "checked_at"],
    },
    StageDef {
        slot: StageSlot::BmApproved,
        label: "BM Approved",
        role_name: "Branch Manager",
        user_type: UserType::BmApprover,
        match_rules: &[
            MatchRule::RoleWithStatus(UserType::BmApprover, FormStatus::BmApproved),
            MatchRule::Role(UserType::BmApprover),
        ],
        expected_status: FormStatus::BmApproved,
        include: Inclusion::Always,
        name_fallback_fields: &[
            "approverName",
            "approver_name",
            "approvedBy",
            "approved_by",
            "bmApproverName",
        ],
        date_fallback_fields: &["approvedDate", "approved_date", "approvedAt", "approved_at"],
    },
    StageDef {
        slot: StageSlot::OpApproved,
        label: "OM Approved",
        role_name: "Operation Manager",
        user_type: UserType::OperationManager,
        match_rules: &[
            MatchRule::RoleWithStatus(UserType::OperationManager, FormStatus::OpApproved),
            MatchRule::Role(UserType::OperationManager),
        ],
        expected_status: FormStatus::OpApproved,
        include: Inclusion::AboveOpApprovalThreshold,
        name_fallback_fields: &[
            "omApproverName",
            "om_approver_name",
            "omApprovedBy",
            "om_approved_by",
        ],
        date_fallback_fields: &[
            "omApprovedDate",
            "om_approved_date",
            "omApprovedAt",
            "om_approved_at",
        ],
    },
    StageDef {
        slot: StageSlot::Acknowledged,
        label: "Acknowledged",
        role_name: "Account Clerk",
        user_type: UserType::AccountClerk,
        // The unqualified family rule is limited to status-less records so an
        // issue-status clerk record is never consumed here ahead of the
        // Issued stage.
        match_rules: &[
            MatchRule::ClerkFamilyWithStatus(FormStatus::Acknowledged),
            MatchRule::ClerkFamilyWithStatus(FormStatus::Unknown),
        ],
        expected_status: FormStatus::Acknowledged,
        include: Inclusion::Always,
        name_fallback_fields: &[
            "acknowledgerName",
            "acknowledger_name",
            "acknowledgedBy",
            "acknowledged_by",
        ],
        date_fallback_fields: &[
            "acknowledgedDate",
            "acknowledged_date",
            "acknowledgedAt",
            "acknowledged_at",
        ],
    },
    StageDef {
        slot: StageSlot::Issued,
        label: "Issued",
        role_name: "Account Clerk",
        user_type: UserType::AccountClerk,
        match_rules: &[
            MatchRule::ClerkFamilyWithStatus(FormStatus::Issued),
            MatchRule::ClerkFamilyWithStatus(FormStatus::Completed),
            MatchRule::ClerkFamily,
        ],
        expected_status: FormStatus::Issued,
        include: Inclusion::Always,
        name_fallback_fields: &["issuerName", "issuer_name", "issuedBy", "issued_by"],
        date_fallback_fields: &["issuedDate", "issued_date", "issuedAt", "issued_at"],
    },
];
