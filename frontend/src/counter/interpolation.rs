/// Outcome of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Progress(f64),
    Complete,
}

/// Fixed-step count from zero up to a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    target: f64,
    step: f64,
    current: f64,
}

impl Interpolation {
    pub fn new(target: f64, duration_ms: f64, frame_interval_ms: f64) -> Self {
        let frames = duration_ms / frame_interval_ms;
        let step = if frames.is_finite() && frames >= 1.0 {
            target / frames
        } else {
            target
        };
        Self {
            target,
            step,
            current: 0.0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn advance(&mut self) -> Frame {
        self.current += self.step;
        if self.current < self.target {
            Frame::Progress(self.current)
        } else {
            Frame::Complete
        }
    }
}
