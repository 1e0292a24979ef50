//! Approval trail reconstruction and notification fan-out
//!
//! The upstream data sources describing who acted on a form are noisy:
//! records arrive in any order, spell field names inconsistently, omit actor
//! names or dates, or are missing entirely even though the form's status
//! proves the step happened. This crate rebuilds a canonical, ordered
//! approval trail from that input and computes the notification fan-out for
//! a transition that already occurred.
//!
//! # Components
//!
//! - [`fallback`]: first-non-empty field resolution over declarative
//!   candidate key tables.
//! - [`RecordNormalizer`]: one raw record → one canonical
//!   [`approval_types::ApprovalAction`].
//! - [`StageResolver`]: matches records to fixed pipeline slots under the
//!   consume-once and conditional-inclusion rules; degrades missing data to
//!   pending stages.
//! - [`NotificationRouter`]: transition → deduplicated recipient set.
//!
//! # Design Principles
//!
//! 1. Pure and deterministic. No I/O, no clocks, no randomness, no shared
//!    state; identical inputs produce identical outputs.
//! 2. Never panics on upstream data. Malformed input degrades to empty
//!    values and pending stages, not errors.
//! 3. This engine reconstructs what already happened. Whether a transition
//!    is legal is the external submission workflow's authority.

#![deny(unsafe_code)]

mod config;
pub mod fallback;
mod normalizer;
mod resolver;
mod router;

pub use config::*;
pub use normalizer::*;
pub use resolver::*;
pub use router::*;
