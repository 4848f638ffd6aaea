use log::Level;
use serde::{Deserialize, Serialize};

use crate::counter::target::MAX_DURATION_MS;

/// Attribute on `<body>` that may carry a JSON [`CounterConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-counter-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSource {
    /// One tick per display refresh.
    AnimationFrame,
    /// One tick per `frame_interval_ms`, keeps running in background tabs.
    Timer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Visible fraction of a surface needed to start its animation.
    pub threshold: f64,
    pub duration_ms: f64,
    pub frame_interval_ms: f64,
    pub thousands_separator: String,
    pub frame_source: FrameSource,
    pub data_target_selector: String,
    pub text_target_selector: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            duration_ms: 2000.0,
            frame_interval_ms: 16.0,
            thousands_separator: ",".to_string(),
            frame_source: FrameSource::AnimationFrame,
            data_target_selector: ".stat-number".to_string(),
            text_target_selector: ".stat-percentage".to_string(),
        }
    }
}

impl CounterConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let config: CounterConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// Clamps the threshold into [0, 1] and resets timings that would stall
    /// or divide by zero.
    pub fn sanitized(mut self) -> Self {
        let defaults = CounterConfig::default();
        self.threshold = if self.threshold.is_nan() {
            defaults.threshold
        } else {
            self.threshold.clamp(0.0, 1.0)
        };
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            self.duration_ms = defaults.duration_ms;
        }
        self.duration_ms = self.duration_ms.min(MAX_DURATION_MS);
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            self.frame_interval_ms = defaults.frame_interval_ms;
        }
        self
    }

    /// Timer period for [`FrameSource::Timer`], rounded to whole milliseconds.
    pub fn frame_interval_millis(&self) -> u32 {
        self.frame_interval_ms.round().max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = CounterConfig::from_json("{}").unwrap();
        assert_eq!(config, CounterConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            CounterConfig::from_json(r#"{"duration_ms": 1200, "frame_source": "timer"}"#).unwrap();
        assert_eq!(config.duration_ms, 1200.0);
        assert_eq!(config.frame_source, FrameSource::Timer);
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.data_target_selector, ".stat-number");
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let config = CounterConfig::from_json(
            r#"{"threshold": 3.0, "duration_ms": -5, "frame_interval_ms": 0}"#,
        )
        .unwrap();
        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.duration_ms, 2000.0);
        assert_eq!(config.frame_interval_ms, 16.0);
    }

    #[test]
    fn huge_duration_is_capped() {
        let config = CounterConfig::from_json(r#"{"duration_ms": 1e300}"#).unwrap();
        assert_eq!(config.duration_ms, MAX_DURATION_MS);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(CounterConfig::from_json("{threshold:").is_err());
        assert!(CounterConfig::from_json(r#"{"frame_source": "vsync"}"#).is_err());
    }

    #[test]
    fn timer_period_never_rounds_to_zero() {
        let config = CounterConfig {
            frame_interval_ms: 0.2,
            ..CounterConfig::default()
        };
        assert_eq!(config.frame_interval_millis(), 1);
        assert_eq!(CounterConfig::default().frame_interval_millis(), 16);
    }
}
