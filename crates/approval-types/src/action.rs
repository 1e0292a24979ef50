//! Raw and canonical approval action records
//!
//! Upstream action records are loosely shaped: any field may be absent,
//! differently named, or differently cased. `RawAction` keeps the record as
//! a JSON object and answers case-insensitive key lookups; the normalizer in
//! the engine crate turns it into the canonical `ApprovalAction`.

use crate::{ApprovalError, FormStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The role code families attributed to approval actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    Checker,
    BmApprover,
    OperationManager,
    AccountClerk,
    BranchAccount,
    Originator,
    /// Unrecognized code — matches no pipeline stage and no recipient rule.
    Other,
}

impl UserType {
    /// Parse an upstream user type code, case-insensitively, tolerating the
    /// known spellings. Unrecognized codes fold to `Other`.
    pub fn parse_lossy(raw: &str) -> Self {
        Self::parse_strict(raw).unwrap_or(Self::Other)
    }

    fn parse_strict(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "checker" => Some(Self::Checker),
            "bmapprover" | "branchmanager" | "bm" => Some(Self::BmApprover),
            "operationmanager" | "operationsmanager" | "opsmanager" | "om" => {
                Some(Self::OperationManager)
            }
            "accountclerk" | "clerk" => Some(Self::AccountClerk),
            "branchaccount" => Some(Self::BranchAccount),
            "originator" | "creator" | "maker" => Some(Self::Originator),
            _ => None,
        }
    }

    /// Canonical machine code for this user type
    pub fn code(&self) -> &'static str {
        match self {
            Self::Checker => "Checker",
            Self::BmApprover => "BMApprover",
            Self::OperationManager => "OperationManager",
            Self::AccountClerk => "AccountClerk",
            Self::BranchAccount => "BranchAccount",
            Self::Originator => "Originator",
            Self::Other => "Other",
        }
    }

    /// Human-readable role name for display and notification payloads
    pub fn role_name(&self) -> &'static str {
        match self {
            Self::Checker => "Checker",
            Self::BmApprover => "Branch Manager",
            Self::OperationManager => "Operation Manager",
            Self::AccountClerk => "Account Clerk",
            Self::BranchAccount => "Branch Account",
            Self::Originator => "Originator",
            Self::Other => "Unknown",
        }
    }

    /// Whether this code belongs to the merged clerk family
    /// (AccountClerk and BranchAccount act interchangeably on the
    /// acknowledgement and issue steps).
    pub fn is_clerk_family(&self) -> bool {
        matches!(self, Self::AccountClerk | Self::BranchAccount)
    }
}

impl std::str::FromStr for UserType {
    type Err = ApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s).ok_or_else(|| ApprovalError::UnknownUserType(s.to_string()))
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One loosely-shaped upstream action record.
///
/// Wraps the raw JSON object; all key lookups are case-insensitive because
/// the data sources disagree on casing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAction(Map<String, Value>);

impl RawAction {
    /// Wrap a JSON value if it is an object; anything else has no fields to
    /// offer and is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|map| Self(map.clone()))
    }

    /// Extract the action pool from an upstream payload. A non-array payload
    /// is treated as an empty pool; non-object elements are skipped.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        match value.as_array() {
            Some(items) => items.iter().filter_map(Self::from_value).collect(),
            None => Vec::new(),
        }
    }

    /// Case-insensitive field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// The first candidate key whose value renders as a non-empty string.
    pub fn first_str(&self, candidates: &[&str]) -> String {
        for key in candidates {
            let text = self.get(key).map(value_to_string).unwrap_or_default();
            if !text.is_empty() {
                return text;
            }
        }
        String::new()
    }

    /// Whether any of the candidate keys holds a truthy flag value
    /// (boolean true, nonzero number, or a "true"/"yes"/"y"/"1" string).
    pub fn any_truthy(&self, candidates: &[&str]) -> bool {
        candidates
            .iter()
            .filter_map(|key| self.get(key))
            .any(value_is_truthy)
    }
}

/// Render a scalar JSON value as display text. Strings are trimmed; numbers
/// and booleans use their JSON rendering; containers and null render empty.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let folded = s.trim().to_ascii_lowercase();
            matches!(folded.as_str(), "true" | "yes" | "y" | "1")
        }
        _ => false,
    }
}

/// The canonical, engine-owned form of one approval action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalAction {
    /// Normalized actor role code
    pub user_type: UserType,
    /// Parsed status fact
    pub status: FormStatus,
    /// The record's status text, trimmed, as upstream reported it
    pub status_text: String,
    /// Attributed actor name; empty when unresolvable
    pub actor_name: String,
    /// Display timestamp; canonicalized when recognizable, empty when absent
    pub acted_at: String,
    pub comment: String,
    pub branch: String,
    /// Whether this action is considered performed
    pub acted: bool,
}
