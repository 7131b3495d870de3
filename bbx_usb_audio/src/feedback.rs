//! The asynchronous-endpoint feedback-rate regulator.
//!
//! A leaky integrator biased by the playback path's queue-fill error.
//! Its only output is the current accumulator, right-shifted and
//! byte-serialised at the width the negotiated USB speed dictates.

use crate::config::{EngineConfig, FEEDBACK_ACCUMULATOR_INIT, UsbSpeed};

/// The feedback-rate accumulator.
pub struct FeedbackRegulator {
    accumulator: u32,
    speed: UsbSpeed,
}

impl FeedbackRegulator {
    /// Create a regulator reset to the nominal 44.1 kHz accumulator value.
    pub fn new(speed: UsbSpeed) -> Self {
        Self {
            accumulator: FEEDBACK_ACCUMULATOR_INIT,
            speed,
        }
    }

    /// Reinitialise to the power-on state for the given configuration.
    /// Corresponds to the engine-wide `configure()` / invariant I7.
    pub fn reset(&mut self, config: &EngineConfig) {
        self.accumulator = FEEDBACK_ACCUMULATOR_INIT;
        self.speed = config.speed;
    }

    /// Apply a signed trim to the accumulator. `diff` may be negative
    /// (queue filling slower than half, device should ask for less) or
    /// positive (filling faster than half, or an underrun kick).
    pub fn apply_trim(&mut self, diff: i32) {
        self.accumulator = self.accumulator.wrapping_add(diff as u32);
    }

    /// Current raw accumulator value (for invariant checks / diagnostics).
    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    /// The value to report to the host this micro-frame: the
    /// accumulator right-shifted by the speed-dependent amount.
    pub fn reported_value(&self) -> u32 {
        self.accumulator >> self.speed.rshift()
    }

    /// Serialise [`Self::reported_value`] little-endian into a
    /// speed-sized scratch buffer (3 bytes at Full Speed, 4 at High
    /// Speed), returning the slice actually written.
    pub fn write_report<'a>(&self, scratch: &'a mut [u8; 4]) -> &'a [u8] {
        let value = self.reported_value();
        let bytes = value.to_le_bytes();
        let len = self.speed.report_len();
        scratch[..len].copy_from_slice(&bytes[..len]);
        &scratch[..len]
    }
}
