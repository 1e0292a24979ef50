//! Domain types for approval trail reconstruction
//!
//! A submitted form moves through a fixed approval pipeline: it is checked,
//! approved by a branch manager, (above a monetary threshold) approved by an
//! operations manager, acknowledged by an account clerk, and finally issued.
//! The upstream records describing who performed each step are noisy: they
//! arrive in any order, spell field names inconsistently, and are sometimes
//! missing even though the form's status proves the step happened.
//!
//! # Key Concepts
//!
//! - **FormSnapshot**: the read-only form facts (status, amount, originator)
//!   plus the raw denormalized per-stage fallback fields.
//! - **RawAction**: one loosely-shaped upstream action record, kept as JSON
//!   so any shape is tolerated.
//! - **ApprovalAction**: the canonical, normalized form of a raw record.
//! - **StageDef / standard_pipeline**: the fixed, ordered pipeline table —
//!   match rules, expected statuses, and fallback fields as data.
//! - **StatusStateMachine**: static lookup of which stages a form status
//!   implies were reached. It never executes transitions.
//! - **ApprovalStage / NotificationRecipient**: the two engine outputs,
//!   recomputed per call and never persisted.
//!
//! # Design Principles
//!
//! 1. Reconstruction is read-only. These types record what already happened;
//!    transition legality lives in the external submission workflow.
//! 2. Noisy input degrades, never fails. Absent or malformed fields become
//!    empty values and pending stages.
//! 3. Resolution policy is data. Candidate field lists, match rules, and
//!    reached-status tables are declarative and independently testable.

#![deny(unsafe_code)]

mod action;
mod errors;
mod form;
mod pipeline;
mod recipient;
mod stage;
mod status;

pub use action::*;
pub use errors::*;
pub use form::*;
pub use pipeline::*;
pub use recipient::*;
pub use stage::*;
pub use status::*;
