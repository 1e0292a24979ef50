//! Record normalizer: one raw record → one canonical action
//!
//! All casing and spelling differences are absorbed here, once. Downstream
//! code compares parsed enums only; the source's mix of case-sensitive and
//! case-insensitive comparisons does not survive this boundary.

use crate::fallback::{
    resolve_first, ACTED_AT_FIELDS, ACTED_FLAG_FIELDS, ACTOR_NAME_FIELDS, BRANCH_FIELDS,
    COMMENT_FIELDS, STATUS_FIELDS, USER_TYPE_FIELDS,
};
use approval_types::{
    ApprovalAction, FormSnapshot, FormStatus, RawAction, StageDef, StatusStateMachine, UserType,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Turns loosely-shaped upstream records into canonical actions.
/// Pure evaluation, no side effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// The normalized (user type, status) pair of a raw record, without the
    /// display-field work. The resolver's match rules run on this.
    pub fn peek(&self, raw: &RawAction) -> (UserType, FormStatus) {
        let user_type = UserType::parse_lossy(&raw.first_str(USER_TYPE_FIELDS));
        let status = FormStatus::parse(&raw.first_str(STATUS_FIELDS));
        (user_type, status)
    }

    /// Normalize a raw record against the stage it was matched to.
    ///
    /// Display fields resolve actor-reported record fields first, then the
    /// stage's denormalized form fields, in that fixed order. Absent fields
    /// become empty strings; this never fails.
    pub fn normalize(
        &self,
        raw: &RawAction,
        stage: &StageDef,
        form: &FormSnapshot,
    ) -> ApprovalAction {
        let (user_type, status) = self.peek(raw);
        let status_text = raw.first_str(STATUS_FIELDS);

        let record_name = raw.first_str(ACTOR_NAME_FIELDS);
        let form_name = form.first_field(stage.name_fallback_fields);
        let actor_name = resolve_first([Some(record_name.as_str()), Some(form_name.as_str())]);

        let record_date = raw.first_str(ACTED_AT_FIELDS);
        let form_date = form.first_field(stage.date_fallback_fields);
        let acted_at = canonicalize_date(&resolve_first([
            Some(record_date.as_str()),
            Some(form_date.as_str()),
        ]));

        let record_branch = raw.first_str(BRANCH_FIELDS);
        let branch = resolve_first([Some(record_branch.as_str()), Some(form.branch.as_str())]);

        let acted = raw.any_truthy(ACTED_FLAG_FIELDS)
            || status == stage.expected_status
            || StatusStateMachine::is_reached(status, stage.slot);

        ApprovalAction {
            user_type,
            status,
            status_text,
            actor_name,
            acted_at,
            comment: raw.first_str(COMMENT_FIELDS),
            branch,
            acted,
        }
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Re-render recognizable timestamp strings in one canonical shape, so the
/// trail displays consistently regardless of which source supplied the date.
/// Unrecognized strings pass through verbatim; either way the result is a
/// pure function of the input.
pub fn canonicalize_date(raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return parsed.format("%Y-%m-%d").to_string();
        }
    }
    text.to_string()
}
