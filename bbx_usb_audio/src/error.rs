//! Error types for the USB Audio Class endpoint engine.
//!
//! Everything the engine does in steady state — dropping a packet on
//! allocation exhaustion, zero-filling a capture underflow, stalling an
//! unrecognised control request — is a *policy* outcome tracked by a
//! counter, not an `Err`. `EngineError` is reserved for misuse at
//! construction time, in the same spirit as `bbx_core::BbxError`.

use core::fmt;

/// Construction-time and configuration errors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The capture path was configured with a channel count that is odd,
    /// zero, or exceeds `MAX_CAPTURE_CHANNELS`.
    InvalidChannelCount,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidChannelCount => write!(f, "invalid capture channel count"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Result type alias for `bbx_usb_audio` operations.
pub type Result<T> = core::result::Result<T, EngineError>;
