//! BBX Sandbox
//!
//! This crate is for experimenting and playing with
//! the other crates in this workspace. It is a sandbox
//! for prototyping DSP chains that may read and / or write files,
//! receive MIDI input, and so forth.

pub mod player;
pub mod signal;
