/// Longest frame accepted before time is dropped, so a stall never snowballs into a burst of ticks.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Converts variable frame times into a whole number of fixed ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        FixedTimestep {
            step,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds a frame and returns how many ticks are due.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return 0;
        }

        self.accumulator += frame_time.min(MAX_FRAME_TIME);

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }

        ticks
    }

    /// Fraction of a tick left over, for interpolating the drawing.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
