//! Engine-wide configuration.

use crate::error::{EngineError, Result};

/// Default audio-graph block size in samples (one stereo/per-channel
/// block handed to `transmit`/`receive_writable` at a time).
pub const AUDIO_BLOCK_SAMPLES: usize = 128;

/// Number of ring slots in the capture path.
pub const CAPTURE_RING_SLOTS: usize = 4;

/// Maximum channel count the capture path supports.
pub const MAX_CAPTURE_CHANNELS: usize = 8;

/// Accumulator value corresponding to a nominal 44.1 kHz feedback rate,
/// `44.1 * 2^24`. Must be preserved exactly: it is the value the
/// regulator is reset to on every `configure()`.
pub const FEEDBACK_ACCUMULATOR_INIT: u32 = 739_875_226;

/// The host-reported feedback nudge applied on an underrun that
/// coincided with at least one received packet this tick. Empirically
/// tuned against real host USB audio stacks; do not change without
/// field measurement.
pub const FEEDBACK_UNDERRUN_KICK: i32 = 3500;

/// Maximum accepted volume value (`0..=FEATURE_MAX_VOLUME`).
pub const FEATURE_MAX_VOLUME: u8 = 0xFF;

/// USB link speed, which determines the feedback endpoint's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbSpeed {
    /// 1 ms micro-frames; 3-byte, 10.10 fixed-point feedback.
    FullSpeed,
    /// 125 µs micro-frames; 4-byte, 16.16 fixed-point feedback.
    HighSpeed,
}

impl UsbSpeed {
    /// Right-shift applied to the feedback accumulator to get the
    /// reported value.
    pub const fn rshift(self) -> u32 {
        match self {
            UsbSpeed::FullSpeed => 10,
            UsbSpeed::HighSpeed => 8,
        }
    }

    /// Size in bytes of the feedback report.
    pub const fn report_len(self) -> usize {
        match self {
            UsbSpeed::FullSpeed => 3,
            UsbSpeed::HighSpeed => 4,
        }
    }
}

/// Top-level engine configuration, supplied once at `configure()` time.
///
/// Mirrors the shape of `bbx_daisy::audio::AudioConfig`: a small,
/// `Default`-able settings struct consumed by the component that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Negotiated USB link speed.
    pub speed: UsbSpeed,
    /// Number of interleaved channels the capture path carries (even, ≤ 8).
    pub capture_channels: usize,
}

impl EngineConfig {
    /// Validate `capture_channels` against the capture path's invariants.
    pub fn validate(&self) -> Result<()> {
        if self.capture_channels == 0
            || self.capture_channels > MAX_CAPTURE_CHANNELS
            || self.capture_channels % 2 != 0
        {
            return Err(EngineError::InvalidChannelCount);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed: UsbSpeed::FullSpeed,
            capture_channels: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_speed_is_10_10_3_bytes() {
        assert_eq!(UsbSpeed::FullSpeed.rshift(), 10);
        assert_eq!(UsbSpeed::FullSpeed.report_len(), 3);
    }

    #[test]
    fn high_speed_is_16_16_4_bytes() {
        assert_eq!(UsbSpeed::HighSpeed.rshift(), 8);
        assert_eq!(UsbSpeed::HighSpeed.report_len(), 4);
    }

    #[test]
    fn default_config_is_stereo_full_speed() {
        let config = EngineConfig::default();
        assert_eq!(config.speed, UsbSpeed::FullSpeed);
        assert_eq!(config.capture_channels, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn odd_channel_count_rejected() {
        let config = EngineConfig {
            capture_channels: 3,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(EngineError::InvalidChannelCount));
    }

    #[test]
    fn zero_channel_count_rejected() {
        let config = EngineConfig {
            capture_channels: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(EngineError::InvalidChannelCount));
    }

    #[test]
    fn over_max_channel_count_rejected() {
        let config = EngineConfig {
            capture_channels: 10,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(EngineError::InvalidChannelCount));
    }
}
