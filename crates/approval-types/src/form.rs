//! Form snapshot: the read-only facts the engine consumes
//!
//! The snapshot is owned by the external submission workflow; the engine only
//! reads it. Beyond the typed fields it retains the full raw object, because
//! upstream denormalizes per-stage fallback data (checker name, approval
//! date, ...) directly onto the form under loosely conventioned keys.

use crate::{value_to_string, FormStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Candidate keys for the form's monetary amount.
const AMOUNT_FIELDS: &[&str] = &["totalAmount", "total_amount", "amount"];

/// Candidate keys for the form identifier.
const ID_FIELDS: &[&str] = &["id", "formId", "form_id"];

/// Candidate keys for the originator identity.
const ORIGINATOR_ID_FIELDS: &[&str] = &[
    "originatorId",
    "originator_id",
    "createdBy",
    "created_by",
    "makerId",
];
const ORIGINATOR_NAME_FIELDS: &[&str] = &[
    "originatorName",
    "originator_name",
    "createdByName",
    "created_by_name",
    "makerName",
];

/// Candidate keys for the branch.
const BRANCH_FIELDS: &[&str] = &["branch", "branchName", "branch_name", "branchCode"];

/// A read-only snapshot of the submitted form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub id: String,
    /// Parsed status fact
    pub status: FormStatus,
    /// The status text as upstream reported it, trimmed
    pub status_text: String,
    /// Monetary amount; non-numeric upstream values become `0.0`, which
    /// deterministically excludes the threshold branch.
    pub total_amount: f64,
    pub originator_id: String,
    pub originator_name: String,
    pub branch: String,
    /// The full raw form object, kept for per-stage denormalized fallbacks.
    fields: Map<String, Value>,
}

impl FormSnapshot {
    /// Build a snapshot from an upstream JSON payload. Tolerant: a non-object
    /// payload yields an empty snapshot, absent fields become empty values,
    /// and a non-numeric amount becomes `0.0`.
    pub fn from_value(value: &Value) -> Self {
        let fields = value.as_object().cloned().unwrap_or_default();
        let status_text = first_field(&fields, &["status", "formStatus", "form_status", "state"]);
        Self {
            id: first_field(&fields, ID_FIELDS),
            status: FormStatus::parse(&status_text),
            status_text,
            total_amount: parse_amount(&fields),
            originator_id: first_field(&fields, ORIGINATOR_ID_FIELDS),
            originator_name: first_field(&fields, ORIGINATOR_NAME_FIELDS),
            branch: first_field(&fields, BRANCH_FIELDS),
            fields,
        }
    }

    /// Typed constructor for callers that already hold clean facts.
    pub fn new(id: impl Into<String>, status: FormStatus, total_amount: f64) -> Self {
        Self {
            id: id.into(),
            status,
            status_text: status.label().to_string(),
            total_amount,
            originator_id: String::new(),
            originator_name: String::new(),
            branch: String::new(),
            fields: Map::new(),
        }
    }

    pub fn with_originator(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.originator_id = id.into();
        self.originator_name = name.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Attach a denormalized fallback field (e.g. `checkerName`).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Value::String(value.into()));
        self
    }

    /// The first denormalized field among `candidates` holding a non-empty
    /// value; empty string when none does. Lookup is case-insensitive.
    pub fn first_field(&self, candidates: &[&str]) -> String {
        first_field(&self.fields, candidates)
    }
}

fn first_field(fields: &Map<String, Value>, candidates: &[&str]) -> String {
    for key in candidates {
        let found = fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| value_to_string(v))
            .unwrap_or_default();
        if !found.is_empty() {
            return found;
        }
    }
    String::new()
}

fn parse_amount(fields: &Map<String, Value>) -> f64 {
    for key in AMOUNT_FIELDS {
        let value = fields.iter().find(|(k, _)| k.eq_ignore_ascii_case(key));
        match value.map(|(_, v)| v) {
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<f64>() {
                    return parsed;
                }
                // Non-numeric amount text: documented default, not an error.
                return 0.0;
            }
            Some(_) | None => continue,
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_typed_fields() {
        let form = FormSnapshot::from_value(&json!({
            "id": "F-1",
            "status": "Checked",
            "totalAmount": 10000,
            "originator_id": "u-9",
            "originatorName": "Dana",
            "branchName": "Central"
        }));
        assert_eq!(form.id, "F-1");
        assert_eq!(form.status, FormStatus::Checked);
        assert_eq!(form.total_amount, 10000.0);
        assert_eq!(form.originator_id, "u-9");
        assert_eq!(form.originator_name, "Dana");
        assert_eq!(form.branch, "Central");
    }

    #[test]
    fn test_non_object_payload_yields_empty_snapshot() {
        let form = FormSnapshot::from_value(&json!("not a form"));
        assert_eq!(form.id, "");
        assert_eq!(form.status, FormStatus::Unknown);
        assert_eq!(form.total_amount, 0.0);
    }

    #[test]
    fn test_invalid_amount_defaults_to_zero() {
        let form = FormSnapshot::from_value(&json!({"totalAmount": "N/A"}));
        assert_eq!(form.total_amount, 0.0);

        let form = FormSnapshot::from_value(&json!({"totalAmount": null}));
        assert_eq!(form.total_amount, 0.0);
    }

    #[test]
    fn test_stringly_amount_parses() {
        let form = FormSnapshot::from_value(&json!({"total_amount": " 600000 "}));
        assert_eq!(form.total_amount, 600000.0);
    }

    #[test]
    fn test_denormalized_fallback_lookup() {
        let form = FormSnapshot::from_value(&json!({
            "status": "Checked",
            "CheckerName": "Alice"
        }));
        assert_eq!(form.first_field(&["checkerName", "checkedBy"]), "Alice");
        assert_eq!(form.first_field(&["approverName"]), "");
    }

    #[test]
    fn test_builder_fields() {
        let form = FormSnapshot::new("F-2", FormStatus::Completed, 0.0)
            .with_originator("u-1", "Omar")
            .with_field("issuerName", "Priya");
        assert_eq!(form.originator_name, "Omar");
        assert_eq!(form.first_field(&["issuerName"]), "Priya");
    }
}
