//! Audio Class 1.0 feature-unit control-request handling (mute, volume).
//!
//! Only the fields the source firmware actually inspects are modeled:
//! `bm_request_type`, `b_request`, and the control selector packed into
//! the high byte of `w_value`. Full validation of the channel selector
//! (low byte of `w_value`) and unit/terminal id (`w_index`) is
//! intentionally out of scope, mirroring the source.

use crate::config::FEATURE_MAX_VOLUME;

const REQUEST_TYPE_SET: u8 = 0x21;
const REQUEST_TYPE_GET: u8 = 0xA1;

const REQUEST_SET_CUR: u8 = 0x01;
const REQUEST_GET_CUR: u8 = 0x81;
const REQUEST_GET_MIN: u8 = 0x82;
const REQUEST_GET_MAX: u8 = 0x83;
const REQUEST_GET_RES: u8 = 0x84;

const CONTROL_SELECTOR_MUTE: u8 = 0x01;
const CONTROL_SELECTOR_VOLUME: u8 = 0x02;

/// The fields of a USB control transfer's setup packet this handler cares about.
#[derive(Debug, Clone, Copy)]
pub struct ControlRequest {
    pub bm_request_type: u8,
    pub b_request: u8,
    pub w_value: u16,
}

impl ControlRequest {
    fn control_selector(&self) -> u8 {
        (self.w_value >> 8) as u8
    }
}

/// The control pipe stalls on anything this handler doesn't recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unhandled;

/// Current mute/volume state of the feature unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureControl {
    mute: bool,
    volume: u8,
    change: bool,
}

impl FeatureControl {
    /// Unmuted, full volume, no pending change.
    pub const fn new() -> Self {
        Self {
            mute: false,
            volume: FEATURE_MAX_VOLUME,
            change: false,
        }
    }

    pub fn mute(&self) -> bool {
        self.mute
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// `true` if the host has written mute or volume since the last
    /// [`Self::clear_change`].
    pub fn changed(&self) -> bool {
        self.change
    }

    /// Clear the pending-change flag after application code has observed it.
    pub fn clear_change(&mut self) {
        self.change = false;
    }

    /// Normalized output gain: `0.0` when muted, else `volume / 255.0`.
    pub fn gain(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            self.volume as f32 / FEATURE_MAX_VOLUME as f32
        }
    }

    /// Handle a SET_CUR (host → device) control-OUT data stage.
    ///
    /// `payload` is the 1-byte data stage already read off the control
    /// endpoint. Returns `Err(Unhandled)` for any request the feature
    /// unit doesn't recognise, signalling the caller to STALL the pipe.
    pub fn handle_set(&mut self, request: ControlRequest, payload: &[u8]) -> Result<(), Unhandled> {
        if request.bm_request_type != REQUEST_TYPE_SET || request.b_request != REQUEST_SET_CUR {
            return Err(Unhandled);
        }
        let Some(&byte) = payload.first() else {
            return Err(Unhandled);
        };
        match request.control_selector() {
            CONTROL_SELECTOR_MUTE => {
                self.mute = byte != 0;
                self.change = true;
                Ok(())
            }
            CONTROL_SELECTOR_VOLUME => {
                self.volume = byte;
                self.change = true;
                Ok(())
            }
            _ => Err(Unhandled),
        }
    }

    /// Handle a GET_CUR/GET_MIN/GET_MAX/GET_RES (device → host) control-IN
    /// data stage, writing the response into `out` and returning the
    /// number of bytes written.
    pub fn handle_get(&self, request: ControlRequest, out: &mut [u8]) -> Result<usize, Unhandled> {
        if request.bm_request_type != REQUEST_TYPE_GET {
            return Err(Unhandled);
        }
        match request.control_selector() {
            CONTROL_SELECTOR_MUTE => {
                if request.b_request != REQUEST_GET_CUR {
                    return Err(Unhandled);
                }
                out[0] = self.mute as u8;
                Ok(1)
            }
            CONTROL_SELECTOR_VOLUME => {
                let value: u16 = match request.b_request {
                    REQUEST_GET_CUR => self.volume as u16,
                    REQUEST_GET_MIN => 0x0000,
                    REQUEST_GET_MAX => FEATURE_MAX_VOLUME as u16,
                    REQUEST_GET_RES => 0x0001,
                    _ => return Err(Unhandled),
                };
                out[..2].copy_from_slice(&value.to_le_bytes());
                Ok(2)
            }
            _ => Err(Unhandled),
        }
    }
}

impl Default for FeatureControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cur(cs: u8) -> ControlRequest {
        ControlRequest {
            bm_request_type: REQUEST_TYPE_SET,
            b_request: REQUEST_SET_CUR,
            w_value: (cs as u16) << 8,
        }
    }

    fn get(b_request: u8, cs: u8) -> ControlRequest {
        ControlRequest {
            bm_request_type: REQUEST_TYPE_GET,
            b_request,
            w_value: (cs as u16) << 8,
        }
    }

    #[test]
    fn set_cur_mute_updates_state_and_flags_change() {
        let mut fc = FeatureControl::new();
        assert!(!fc.mute());
        fc.handle_set(set_cur(CONTROL_SELECTOR_MUTE), &[1]).unwrap();
        assert!(fc.mute());
        assert!(fc.changed());
    }

    #[test]
    fn set_cur_volume_updates_state() {
        let mut fc = FeatureControl::new();
        fc.handle_set(set_cur(CONTROL_SELECTOR_VOLUME), &[0x40]).unwrap();
        assert_eq!(fc.volume(), 0x40);
        assert!(fc.changed());
    }

    #[test]
    fn clear_change_resets_flag() {
        let mut fc = FeatureControl::new();
        fc.handle_set(set_cur(CONTROL_SELECTOR_MUTE), &[1]).unwrap();
        fc.clear_change();
        assert!(!fc.changed());
    }

    #[test]
    fn get_cur_mute_returns_one_byte() {
        let mut fc = FeatureControl::new();
        fc.handle_set(set_cur(CONTROL_SELECTOR_MUTE), &[1]).unwrap();
        let mut out = [0u8; 2];
        let n = fc.handle_get(get(REQUEST_GET_CUR, CONTROL_SELECTOR_MUTE), &mut out).unwrap();
        assert_eq!(n, 1);
        assert_eq!(out[0], 1);
    }

    #[test]
    fn get_cur_volume_returns_little_endian_u16() {
        let mut fc = FeatureControl::new();
        fc.handle_set(set_cur(CONTROL_SELECTOR_VOLUME), &[0xAB]).unwrap();
        let mut out = [0u8; 2];
        let n = fc.handle_get(get(REQUEST_GET_CUR, CONTROL_SELECTOR_VOLUME), &mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, [0xAB, 0x00]);
    }

    #[test]
    fn get_min_max_res_volume_are_fixed() {
        let fc = FeatureControl::new();
        let mut out = [0u8; 2];

        fc.handle_get(get(REQUEST_GET_MIN, CONTROL_SELECTOR_VOLUME), &mut out).unwrap();
        assert_eq!(out, [0x00, 0x00]);

        fc.handle_get(get(REQUEST_GET_MAX, CONTROL_SELECTOR_VOLUME), &mut out).unwrap();
        assert_eq!(out, [0xFF, 0x00]);

        fc.handle_get(get(REQUEST_GET_RES, CONTROL_SELECTOR_VOLUME), &mut out).unwrap();
        assert_eq!(out, [0x01, 0x00]);
    }

    #[test]
    fn unknown_request_is_unhandled() {
        let fc = FeatureControl::new();
        let mut out = [0u8; 2];
        let bogus = get(0x99, CONTROL_SELECTOR_VOLUME);
        assert_eq!(fc.handle_get(bogus, &mut out), Err(Unhandled));
    }

    #[test]
    fn unknown_control_selector_is_unhandled() {
        let mut fc = FeatureControl::new();
        assert_eq!(fc.handle_set(set_cur(0x03), &[1]), Err(Unhandled));
    }

    #[test]
    fn gain_reflects_mute_and_volume() {
        let mut fc = FeatureControl::new();
        fc.handle_set(set_cur(CONTROL_SELECTOR_VOLUME), &[128]).unwrap();
        assert!((fc.gain() - 128.0 / 255.0).abs() < f32::EPSILON);

        fc.handle_set(set_cur(CONTROL_SELECTOR_MUTE), &[1]).unwrap();
        assert_eq!(fc.gain(), 0.0);
    }

    #[test]
    fn wrong_bm_request_type_for_set_is_unhandled() {
        let mut fc = FeatureControl::new();
        let bad = ControlRequest {
            bm_request_type: REQUEST_TYPE_GET,
            b_request: REQUEST_SET_CUR,
            w_value: (CONTROL_SELECTOR_MUTE as u16) << 8,
        };
        assert_eq!(fc.handle_set(bad, &[1]), Err(Unhandled));
    }
}
