//! Earned-duration engine.
//!
//! Each stage is a pure function over immutable inputs that returns fresh
//! structures; the orchestrator sequences them.
//!
//! | Stage | Function |
//! |-------|----------|
//! | Normalize actualized dates | [`normalize`] |
//! | Match baseline/update | [`match_activities`] |
//! | Baseline + at-completion durations | [`attach_baseline_durations`], [`at_completion`] |
//! | Split actual/plan | [`polarize`] |
//! | Orchestrate and prorate | [`EarnedDurationEngine`], [`prorate_earned`] |
//! | Summarize | [`EarnedDurationKpi`] |

mod at_completion;
mod earned;
mod kpi;
mod matcher;
mod normalizer;
mod polarizer;

pub use at_completion::{
    at_completion, at_completion_duration, attach_baseline_durations, repair_zero_actual,
    ScoredActivity,
};
pub use earned::{
    prorate_earned, EarnedDurationEngine, EarnedDurationReport, EarnedDurationRequest,
};
pub use kpi::EarnedDurationKpi;
pub use matcher::{match_activities, MatchResult, MatchStatus};
pub use normalizer::{normalize, normalize_activity};
pub use polarizer::{polarize, ActualRow, PlanRow};
