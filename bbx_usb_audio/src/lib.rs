//! # BBX USB Audio
//!
//! USB Audio Class 1.0 endpoint engine bridging isochronous USB transfers
//! to the `bbx_audio` processing graph.
//!
//! This crate is the cross-domain flow-control core of a USB audio
//! interface: it couples the USB controller's interrupt-driven
//! micro-frame cadence to the audio graph's periodic block-sized
//! `update()` cadence, without itself touching USB descriptors, DMA, or
//! enumeration. Four pieces cooperate:
//!
//! - [`playback`] — host→device stereo receive path ([`playback::PlaybackPath`])
//! - [`capture`] — device→host N-channel interleave-and-transmit path ([`capture::CapturePath`])
//! - [`feedback`] — the asynchronous-endpoint sample-rate accumulator ([`feedback::FeedbackRegulator`])
//! - [`feature`] — Audio Class feature-unit control requests ([`feature::FeatureControl`])
//!
//! Everything the engine needs from the rest of the firmware — block
//! allocation, cache maintenance, a millisecond clock — is expressed as
//! a narrow trait in [`block`], [`cache`], and [`clock`], so the same
//! logic runs unmodified on a hosted target under `cargo test` and on
//! `no_std` Cortex-M firmware.
//!
//! ## Assembling the engine
//!
//! The four components are independent; an embedder wires them together
//! once per USB interface instance:
//!
//! ```ignore
//! let config = EngineConfig { speed: UsbSpeed::FullSpeed, capture_channels: 2 };
//! let mut feedback = FeedbackRegulator::new(config.speed);
//! let mut playback: PlaybackPath<MyGraph, 128> = PlaybackPath::new();
//! let mut capture: CapturePath<MyGraph, 128, 2> = CapturePath::new();
//! let mut feature = FeatureControl::new();
//! ```
//!
//! ## `no_std`
//!
//! The crate is `no_std` by default; the `std` feature (on by default in
//! this workspace checkout, so hosted tests can run) pulls in
//! `critical-section`'s `std` backend and `EngineError`'s
//! `std::error::Error` impl. Firmware builds disable default features
//! and enable `cortex-m` and/or `log` as needed.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod block;
pub mod cache;
pub mod capture;
pub mod clock;
pub mod config;
pub mod deinterleave;
pub mod error;
pub mod feature;
pub mod feedback;
pub mod playback;

pub use block::{AudioBlock, AudioGraph};
pub use cache::{AlignedBuffer, CacheMaintenance, NoCache, CACHE_LINE};
pub use capture::CapturePath;
pub use clock::{Clock, CountingClock};
pub use config::{EngineConfig, UsbSpeed, AUDIO_BLOCK_SAMPLES, CAPTURE_RING_SLOTS, MAX_CAPTURE_CHANNELS};
pub use error::{EngineError, Result};
pub use feature::{ControlRequest, FeatureControl, Unhandled};
pub use feedback::FeedbackRegulator;
pub use playback::PlaybackPath;

#[cfg(feature = "cortex-m")]
pub use cache::CortexMCache;
