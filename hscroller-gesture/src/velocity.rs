const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: u64 = 100;

/// A gap this long between consecutive samples means the pointer rested; older samples are
/// ignored.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sample {
    time_ms: u64,
    x: f32,
}

/// Estimates horizontal pointer velocity from recent absolute positions.
///
/// Keeps the last 20 samples in a ring. The estimate treats each segment as an impulse and sums
/// the kinetic energy it imparts, which weights the most recent motion without the noise of a
/// plain two-point slope.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time_ms: u64, x: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, x });
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }

    /// Velocity in px/s; 0 with fewer than two usable samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk back from the newest sample, collecting newest first.
        let mut usable = [Sample::default(); HISTORY_SIZE];
        let mut len = 0;
        let mut later = newest;
        let mut slot = self.newest;
        while let Some(sample) = self.samples[slot] {
            if newest.time_ms.saturating_sub(sample.time_ms) > HORIZON_MS
                || later.time_ms.saturating_sub(sample.time_ms) > ASSUME_STOPPED_MS
            {
                break;
            }
            usable[len] = sample;
            len += 1;
            if len == HISTORY_SIZE {
                break;
            }
            later = sample;
            slot = (slot + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if len < 2 {
            return 0.0;
        }
        usable[..len].reverse();
        impulse_velocity(&usable[..len]) * 1000.0
    }

    /// Like [`VelocityTracker::velocity`], clamped to `[-max, max]`. A non-positive `max` yields 0.
    pub fn velocity_with_max(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max, max)
    }
}

/// `samples` is oldest first. Returns px/ms.
fn impulse_velocity(samples: &[Sample]) -> f32 {
    let mut work = 0.0f32;
    for (i, pair) in samples.windows(2).enumerate() {
        let dt = pair[1].time_ms.saturating_sub(pair[0].time_ms);
        if dt == 0 {
            continue;
        }
        let v = (pair[1].x - pair[0].x) / dt as f32;
        let v_prev = energy_to_velocity(work);
        work += (v - v_prev) * v.abs();
        if i == 0 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

// E = v^2 / 2 with unit mass, keeping the sign.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

