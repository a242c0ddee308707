//! Attendance analytics for a recurring weekly football game.
//!
//! Raw per-player date lists go in; ranks, monthly buckets, anchor-day
//! streaks, buddy affinities, community summaries and a personalised quiz come
//! out. Everything here is a pure function of its inputs.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod quiz;
pub mod utils;

pub use error::{StatsError, StatsResult};
