//! Impulse-based pointer velocity estimation.
//!
//! A ring buffer of recent positions is reduced to a release velocity using
//! the kinetic-energy (impulse) strategy: each sample pair contributes the
//! work needed to reach its segment velocity, and the accumulated energy is
//! converted back to a speed.

/// Number of samples kept for velocity estimation.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped moving.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1D velocity estimator over absolute pointer positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records the pointer position at `time_ms`.
    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/second from the samples inside the horizon.
    ///
    /// Returns 0.0 with fewer than two usable samples or after a
    /// [`ASSUME_STOPPED_MS`] gap.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut cursor = self.index;
        while let Some(sample) = self.samples[cursor] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 {
                break;
            }
            if count > 0 {
                let gap = times[count - 1] - (-age);
                if gap > ASSUME_STOPPED_MS as f32 {
                    break;
                }
            }

            positions[count] = sample.position;
            times[count] = -age;
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity clamped to `±max`. Non-finite or non-positive caps yield 0.
    pub fn velocity_capped(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max, max)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse-strategy reduction. `positions`/`times` are newest-first, times in
/// milliseconds relative to the newest sample (so all non-positive).
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    debug_assert_eq!(positions.len(), times.len());
    let count = positions.len();
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let oldest = count - 1;
    let mut next_time = times[oldest];

    for i in (1..=oldest).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }
        let segment_velocity = (positions[i] - positions[i - 1]) / (current_time - next_time);
        let prior_velocity = energy_to_velocity(work);
        work += (segment_velocity - prior_velocity) * segment_velocity.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = ½mv² with m = 1, preserving direction.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
