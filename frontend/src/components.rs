pub mod stats;

pub use stats::{use_viewport_counters, StatsSection};
