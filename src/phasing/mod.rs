//! Monthly time-phasing.
//!
//! Spreads date intervals over the calendar months they overlap and
//! reshapes the result onto a contiguous month axis.
//!
//! # Algorithm
//!
//! `phase` walks month windows `[first of month, first of next month)`
//! from the month containing the start to the month containing the
//! finish. Each window contributes the length of its intersection with
//! the interval, in fractional days, so a row's cells always sum to the
//! interval length.
//!
//! `fill_gaps` reindexes a matrix onto every month between its first and
//! last column, leaving unobserved months empty rather than zero.

mod gap_filler;
mod time_phaser;

pub use gap_filler::fill_gaps;
pub use time_phaser::{phase, phase_interval};
