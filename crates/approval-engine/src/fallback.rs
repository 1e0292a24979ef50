//! Field fallback resolution
//!
//! Upstream spells the same fact under several keys. The candidate key lists
//! below are the complete resolution policy, as data: actor-reported record
//! fields come first, then (per stage, held on the pipeline table) the
//! denormalized fields from the parent form, in that fixed order.

/// Record-level candidate keys for the actor's user type code.
pub const USER_TYPE_FIELDS: &[&str] =
    &["userType", "user_type", "userTypeCode", "user_type_code", "role"];

/// Record-level candidate keys for the action status.
pub const STATUS_FIELDS: &[&str] = &["status", "approvalStatus", "approval_status", "state"];

/// Record-level candidate keys for the actor's display name.
pub const ACTOR_NAME_FIELDS: &[&str] = &[
    "name",
    "userName",
    "user_name",
    "actorName",
    "actor_name",
    "fullName",
    "full_name",
];

/// Record-level candidate keys for the action timestamp.
pub const ACTED_AT_FIELDS: &[&str] = &[
    "date",
    "actionDate",
    "action_date",
    "actedAt",
    "acted_at",
    "createdAt",
    "created_at",
    "updatedAt",
    "updated_at",
];

/// Record-level candidate keys for the actor's comment.
pub const COMMENT_FIELDS: &[&str] = &["comment", "remarks", "remark", "note", "description"];

/// Record-level candidate keys for the branch.
pub const BRANCH_FIELDS: &[&str] = &["branch", "branchName", "branch_name", "branchCode"];

/// Record-level candidate keys for the actor's identity, used by the router.
pub const ACTOR_ID_FIELDS: &[&str] = &["id", "userId", "user_id", "actorId", "actor_id"];

/// Record-level candidate keys for an explicit acted flag.
pub const ACTED_FLAG_FIELDS: &[&str] = &["acted", "isActed", "is_acted", "done", "completed"];

/// The first candidate whose trimmed value is non-empty; `""` when none is.
/// Pure and total: any mix of absent and blank candidates is fine.
pub fn resolve_first<'a, I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}
