//! Tab stop resolution.

/// A list of explicit tab stops plus a default pitch beyond the last one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TabStops {
    stops: Vec<f32>,
    pitch: f32,
}

impl TabStops {
    /// Creates tab stops from an ascending list of explicit positions and
    /// a default pitch used past the last explicit stop.
    pub fn new(stops: Vec<f32>, pitch: f32) -> Self {
        debug_assert!(stops.windows(2).all(|w| w[0] <= w[1]));
        Self { stops, pitch }
    }

    /// The position a tab at `x` advances the cursor to: the first
    /// explicit stop strictly beyond `x`, else the next pitch multiple.
    ///
    /// With a degenerate pitch (zero or negative) and no remaining
    /// explicit stop, the cursor stays put so layout still terminates.
    pub fn next_stop(&self, x: f32) -> f32 {
        for &stop in &self.stops {
            if stop > x {
                return stop;
            }
        }
        if self.pitch <= 0.0 {
            return x;
        }
        ((x / self.pitch).floor() + 1.0) * self.pitch
    }
}
