//! Notification fan-out outputs: transitions and recipients
//!
//! A `Transition` names a status change that already occurred; the router
//! maps it to the deduplicated set of `NotificationRecipient`s. Dispatch
//! (push, in-app, retry, read-state) belongs to an external service.

use crate::{ApprovalError, UserType};
use serde::{Deserialize, Serialize};

/// A status transition that already happened in the submission workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Create,
    Check,
    Approve,
    Acknowledge,
    Issue,
}

impl Transition {
    /// The reason code stamped on every recipient for this transition, so
    /// the dispatch layer can pick a template without re-deriving it.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Create => "form_created",
            Self::Check => "form_checked",
            Self::Approve => "form_approved",
            Self::Acknowledge => "form_acknowledged",
            Self::Issue => "form_issued",
        }
    }
}

impl std::str::FromStr for Transition {
    type Err = ApprovalError;

    /// Accepts the wire spellings, case-insensitively. `complete` is an
    /// upstream alias for the issue transition.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "check" => Ok(Self::Check),
            "approve" => Ok(Self::Approve),
            "acknowledge" => Ok(Self::Acknowledge),
            "issue" | "complete" => Ok(Self::Issue),
            _ => Err(ApprovalError::UnknownTransition(s.to_string())),
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Check => "check",
            Self::Approve => "approve",
            Self::Acknowledge => "acknowledge",
            Self::Issue => "issue",
        };
        f.write_str(name)
    }
}

/// One notification target. Unique by `id` within a computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecipient {
    pub id: String,
    pub name: String,
    pub role: String,
    pub user_type: UserType,
    /// Transition-derived reason code (see [`Transition::reason`])
    pub reason: String,
    pub branch: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_parse() {
        assert_eq!("create".parse::<Transition>().unwrap(), Transition::Create);
        assert_eq!(" APPROVE ".parse::<Transition>().unwrap(), Transition::Approve);
        assert_eq!("complete".parse::<Transition>().unwrap(), Transition::Issue);
        assert!("revert".parse::<Transition>().is_err());
    }

    #[test]
    fn test_transition_roundtrip_display() {
        for t in [
            Transition::Create,
            Transition::Check,
            Transition::Approve,
            Transition::Acknowledge,
            Transition::Issue,
        ] {
            assert_eq!(t.to_string().parse::<Transition>().unwrap(), t);
        }
    }

    #[test]
    fn test_reason_codes_are_distinct() {
        let reasons = [
            Transition::Create.reason(),
            Transition::Check.reason(),
            Transition::Approve.reason(),
            Transition::Acknowledge.reason(),
            Transition::Issue.reason(),
        ];
        let mut unique = reasons.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), reasons.len());
    }
}
