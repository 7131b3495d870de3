//! GPIO abstraction.
//!
//! This module will provide convenient GPIO access for Daisy hardware,
//! including user LEDs, buttons, and general-purpose I/O.
//!
//! # Implementation Notes (Phase 4)
//!
//! GPIO features to support:
//!
//! - Digital input with optional pull-up/pull-down
//! - Digital output (push-pull or open-drain)
//! - LED control with brightness (via PWM)
//! - Button debouncing
//! - Gate input/output for eurorack modules

// Placeholder for Phase 4 implementation
