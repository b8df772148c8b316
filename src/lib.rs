//! Earned-duration analysis for project schedules.
//!
//! Compares a baseline schedule snapshot with a later update and measures
//! progress in time rather than cost: activity durations are spread over
//! calendar months, and actual progress is credited at the rate the
//! baseline planned for it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ActivityRecord`, `Snapshot`, `MonthBucket`,
//!   `TimePhasedMatrix`, `DiagnosticReport`
//! - **`phasing`**: Monthly time-phasing and gap filling
//! - **`engine`**: Normalize, match, at-completion, polarize, earned
//!   proration, KPIs
//! - **`source`**: Primavera P6 XER tables, WBS filtering, activity codes
//! - **`validation`**: Snapshot data-quality checks
//! - **`config`**: Engine options and column mapping
//!
//! # Pipeline
//!
//! ```text
//! baseline ─┐                         ┌─ baseline early/late
//!           ├─ match ─ at-completion ─┼─ update actual ─ earned
//! update ───┘          polarize       └─ update plan early/late
//! ```
//!
//! # References
//!
//! - Khamooshi & Golafshani (2014), "EDM: Earned Duration Management"
//! - Lipke (2003), "Schedule is Different"

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod phasing;
pub mod source;
pub mod validation;

pub use error::{EdmError, Result};
