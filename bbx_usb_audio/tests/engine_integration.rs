//! End-to-end integration tests for the USB audio endpoint engine.
//!
//! Unlike the per-module unit tests, these exercise the playback path,
//! capture path, feedback regulator, and feature control together the
//! way a real embedder would wire them: USB ISR callbacks interleaved
//! with graph-scheduler `update()` ticks, against a standalone
//! `AudioGraph` implementation built only from the crate's public API.

use std::collections::VecDeque;

use bbx_usb_audio::{
    AudioBlock, AudioGraph, CapturePath, ControlRequest, FeatureControl, FeedbackRegulator,
    PlaybackPath, UsbSpeed,
};

const N: usize = 128;

#[derive(Clone)]
struct Block {
    data: [i16; N],
}

impl Block {
    fn silent() -> Self {
        Self { data: [0; N] }
    }
}

impl AudioBlock<N> for Block {
    fn samples(&self) -> &[i16; N] {
        &self.data
    }

    fn samples_mut(&mut self) -> &mut [i16; N] {
        &mut self.data
    }
}

/// A small pool-backed graph standing in for the audio-graph scheduler:
/// unbounded allocation, per-channel transmit logs, per-channel input
/// queues the capture path drains from.
struct Graph<const C: usize> {
    transmitted: [VecDeque<Block>; C],
    pending_input: [VecDeque<Block>; C],
}

impl<const C: usize> Graph<C> {
    fn new() -> Self {
        Self {
            transmitted: core::array::from_fn(|_| VecDeque::new()),
            pending_input: core::array::from_fn(|_| VecDeque::new()),
        }
    }

    fn push_capture_input(&mut self, channel: usize, value: i16) {
        self.pending_input[channel].push_back(Block { data: [value; N] });
    }
}

impl<const C: usize> AudioGraph<N> for Graph<C> {
    type Block = Block;

    fn allocate(&mut self) -> Option<Self::Block> {
        Some(Block::silent())
    }

    fn release(&mut self, _block: Self::Block) {}

    fn transmit(&mut self, block: Self::Block, channel: usize) {
        self.transmitted[channel].push_back(block);
    }

    fn receive_writable(&mut self, channel: usize) -> Option<Self::Block> {
        self.pending_input[channel].pop_front()
    }
}

fn stereo_words(samples: &[(i16, i16)]) -> Vec<u32> {
    samples
        .iter()
        .map(|&(l, r)| (l as u16 as u32) | ((r as u16 as u32) << 16))
        .collect()
}

#[test]
fn playback_then_capture_round_trips_a_full_block_of_audio() {
    let mut graph: Graph<2> = Graph::new();
    let mut playback: PlaybackPath<Graph<2>, N> = PlaybackPath::new();
    let mut feedback = FeedbackRegulator::new(UsbSpeed::FullSpeed);

    let samples: Vec<(i16, i16)> = (0..N as i16).map(|i| (i, -i)).collect();
    playback.receive_packet(&mut graph, &stereo_words(&samples));
    playback.update(&mut graph, &mut feedback);

    assert_eq!(graph.transmitted[0].len(), 1);
    assert_eq!(graph.transmitted[1].len(), 1);
    let left = graph.transmitted[0].pop_front().unwrap();
    let right = graph.transmitted[1].pop_front().unwrap();

    // Feed the graph's playback output back in as capture input and
    // verify the capture path interleaves it back to the same samples.
    let mut capture: CapturePath<Graph<2>, N, 2> = CapturePath::new();
    graph.pending_input[0].push_back(left);
    graph.pending_input[1].push_back(right);
    capture.update(&mut graph, true);

    let mut scratch = [0u8; 45 * 2 * 2];
    let bytes = capture.fill_packet(&mut graph, &mut scratch);
    assert_eq!(bytes, 44 * 2 * 2);

    for i in 0..44 {
        let word = u32::from_le_bytes(scratch[i * 4..i * 4 + 4].try_into().unwrap());
        assert_eq!(word & 0xFFFF, samples[i].0 as u16 as u32);
        assert_eq!(word >> 16, samples[i].1 as u16 as u32);
    }
}

#[test]
fn sustained_underrun_and_overrun_both_move_the_feedback_accumulator() {
    let mut graph: Graph<2> = Graph::new();
    let mut playback: PlaybackPath<Graph<2>, N> = PlaybackPath::new();
    let mut feedback = FeedbackRegulator::new(UsbSpeed::HighSpeed);
    let initial = feedback.accumulator();

    // No packets ever arrive: every update() is a silent underrun, no kick
    // (receive_flag never set), so the accumulator should not move.
    for _ in 0..5 {
        playback.update(&mut graph, &mut feedback);
    }
    assert_eq!(feedback.accumulator(), initial);
    assert_eq!(playback.underrun_count(), 5);

    // Host now floods the path faster than the graph drains it: every
    // full block completes while the previous one is still `ready`,
    // driving repeated overruns and a growing fill-error trim.
    let full_block: Vec<u32> = stereo_words(&vec![(1, -1); N]);
    playback.receive_packet(&mut graph, &full_block);
    playback.receive_packet(&mut graph, &full_block);
    assert!(playback.overrun_count() >= 1);
}

#[test]
fn capture_overflow_then_host_catching_up_drains_cleanly() {
    let mut graph: Graph<2> = Graph::new();
    let mut capture: CapturePath<Graph<2>, N, 2> = CapturePath::new();

    // The ring holds CAPTURE_RING_SLOTS (4) slots but one is always kept
    // empty to distinguish full from empty, so the 4th enqueue with no
    // dequeues in between is the first to evict.
    for v in 0..4i16 {
        graph.push_capture_input(0, v);
        graph.push_capture_input(1, -v);
        capture.update(&mut graph, true);
    }
    assert_eq!(capture.overflow_count(), 1);

    // Host now pulls fast enough to drain the remaining slots without
    // hitting underflow until the ring is actually empty.
    let mut scratch = [0u8; 45 * 2 * 2];
    let mut total_samples = 0usize;
    let mut saw_underflow = false;
    for _ in 0..20 {
        let before = capture.underflow_count();
        let bytes = capture.fill_packet(&mut graph, &mut scratch);
        total_samples += bytes / (2 * 2);
        if capture.underflow_count() > before {
            saw_underflow = true;
        }
    }
    assert!(saw_underflow, "ring should eventually run dry once drained");
    assert!(total_samples > 0);
}

#[test]
fn feature_control_mute_and_volume_round_trip_through_the_control_surface() {
    let mut feature = FeatureControl::new();
    assert_eq!(feature.gain(), 1.0);

    let set_volume = ControlRequest {
        bm_request_type: 0x21,
        b_request: 0x01,
        w_value: 0x0200,
    };
    feature.handle_set(set_volume, &[0x7F]).unwrap();
    assert!(feature.changed());
    feature.clear_change();

    let get_volume = ControlRequest {
        bm_request_type: 0xA1,
        b_request: 0x81,
        w_value: 0x0200,
    };
    let mut out = [0u8; 2];
    let n = feature.handle_get(get_volume, &mut out).unwrap();
    assert_eq!(n, 2);
    assert_eq!(out, [0x7F, 0x00]);
    assert!((feature.gain() - 0x7F as f32 / 255.0).abs() < f32::EPSILON);

    let set_mute = ControlRequest {
        bm_request_type: 0x21,
        b_request: 0x01,
        w_value: 0x0100,
    };
    feature.handle_set(set_mute, &[1]).unwrap();
    assert_eq!(feature.gain(), 0.0, "mute silences regardless of volume");
}
