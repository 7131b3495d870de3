//! The capture path: device → host, N-channel interleaved PCM.
//!
//! The ring (`slots`/`write_index`/`read_index`/`buffer_offset`) is
//! touched by both the graph-tick [`CapturePath::update`] (foreground)
//! and the USB TX-complete [`CapturePath::fill_packet`] (ISR), so it
//! lives behind [`critical_section::Mutex`]. The 10-frame super-cycle
//! counter is exclusive to the TX-complete callback, like the playback
//! path's `incoming_count`, and is a plain field.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::block::{AudioBlock, AudioGraph};
use crate::clock::Clock;
use crate::config::CAPTURE_RING_SLOTS;
use crate::deinterleave::interleave_channels;

/// The 10-frame super-cycle starts mid-cycle by long-standing
/// convention in the source firmware; preserved exactly here.
const SUPER_CYCLE_INITIAL_COUNT: u32 = 5;

/// Diagnostic log cadence; purely informational (§7 — not part of the
/// safety-critical contract).
const DIAGNOSTIC_LOG_PERIOD_MS: u32 = 1000;

struct Ring<B, const C: usize> {
    slots: [Option<[B; C]>; CAPTURE_RING_SLOTS],
    write_index: usize,
    read_index: usize,
    buffer_offset: usize,
}

impl<B, const C: usize> Ring<B, C> {
    fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            write_index: 0,
            read_index: 0,
            buffer_offset: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.read_index == self.write_index
    }
}

/// Device→host interleave-and-forward path for `C` channels of `N`-sample blocks.
pub struct CapturePath<G: AudioGraph<N>, const N: usize, const C: usize> {
    ring: Mutex<RefCell<Ring<G::Block, C>>>,
    cycle_count: u32,
    underflow_count: u32,
    overflow_count: u32,
    last_log_ms: u32,
}

impl<G: AudioGraph<N>, const N: usize, const C: usize> CapturePath<G, N, C> {
    pub fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(Ring::new())),
            cycle_count: SUPER_CYCLE_INITIAL_COUNT,
            underflow_count: 0,
            overflow_count: 0,
            last_log_ms: 0,
        }
    }

    pub fn underflow_count(&self) -> u32 {
        self.underflow_count
    }

    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Reinitialise ring state for invariant I7. The super-cycle counter
    /// is not reset: in the source firmware it is an independent static
    /// that free-runs across reconfiguration.
    pub fn reset(&mut self, graph: &mut G) {
        self.underflow_count = 0;
        self.overflow_count = 0;
        self.drain(graph);
    }

    fn drain(&mut self, graph: &mut G) {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow(cs).borrow_mut();
            while !ring.is_empty() {
                if let Some(slot) = ring.slots[ring.read_index].take() {
                    for block in slot {
                        graph.release(block);
                    }
                }
                ring.read_index = (ring.read_index + 1) % CAPTURE_RING_SLOTS;
            }
            ring.write_index = 0;
            ring.read_index = 0;
            ring.buffer_offset = 0;
        });
    }

    /// Graph-tick handler. `streaming` reflects the host's alternate
    /// setting (`false` == alt-setting 0, "not streaming").
    pub fn update(&mut self, graph: &mut G, streaming: bool) {
        let mut taken: [Option<G::Block>; C] = core::array::from_fn(|_| None);
        let mut exhausted = false;

        for (ch, slot) in taken.iter_mut().enumerate() {
            if let Some(block) = graph.receive_writable(ch) {
                *slot = Some(block);
                continue;
            }
            match graph.allocate() {
                Some(mut silence) => {
                    silence.zeroize();
                    *slot = Some(silence);
                }
                None => {
                    exhausted = true;
                    break;
                }
            }
        }

        if exhausted {
            for block in taken.into_iter().flatten() {
                graph.release(block);
            }
            return;
        }

        if !streaming {
            for block in taken.into_iter().flatten() {
                graph.release(block);
            }
            self.drain(graph);
            return;
        }

        let blocks: [G::Block; C] = taken.map(|b| b.expect("all channels populated above"));
        let evicted = critical_section::with(|cs| {
            let mut ring = self.ring.borrow(cs).borrow_mut();
            let next_write = (ring.write_index + 1) % CAPTURE_RING_SLOTS;
            let evicted = if next_write == ring.read_index {
                let slot = ring.slots[ring.read_index].take();
                ring.read_index = (ring.read_index + 1) % CAPTURE_RING_SLOTS;
                ring.buffer_offset = 0;
                slot
            } else {
                None
            };
            ring.slots[ring.write_index] = Some(blocks);
            ring.write_index = next_write;
            evicted
        });

        if let Some(slot) = evicted {
            self.overflow_count += 1;
            for block in slot {
                graph.release(block);
            }
        }
    }

    /// The number of samples the next TX-complete packet must carry:
    /// 44 on 9 of every 10 calls, 45 on the 10th.
    fn next_target(&mut self) -> usize {
        self.cycle_count += 1;
        if self.cycle_count < 10 {
            44
        } else {
            self.cycle_count = 0;
            45
        }
    }

    /// USB TX-complete handler: fill `out` with this micro-frame's
    /// interleaved packet, little-endian, one `C/2`-word group per
    /// frame, and return the packet's byte count. `out` must hold at
    /// least `45 * 2 * C` bytes. Always returns `target * 2 * C` bytes,
    /// even when partially or fully zero-filled.
    pub fn fill_packet(&mut self, graph: &mut G, out: &mut [u8]) -> usize {
        let target = self.next_target();
        let words_per_frame = C / 2;
        let total_words = target * words_per_frame;
        let total_bytes = total_words * 4;
        debug_assert!(out.len() >= total_bytes);
        debug_assert!(C <= crate::config::MAX_CAPTURE_CHANNELS);

        // Interleaved words are assembled in a stack scratch buffer and
        // byte-serialised into `out` at the end: the ring's critical
        // section needs a `u32` destination to interleave into, while
        // `out` is the raw byte buffer the USB TX descriptor actually owns.
        let mut words = [0u32; 45 * (crate::config::MAX_CAPTURE_CHANNELS / 2)];
        let word_buf = &mut words[..total_words];

        let mut produced = 0usize;
        while produced < target {
            let remaining = target - produced;

            let release_and_advance = critical_section::with(|cs| {
                let mut ring = self.ring.borrow(cs).borrow_mut();
                if ring.is_empty() {
                    return None;
                }
                let read_index = ring.read_index;
                let buffer_offset = ring.buffer_offset;
                let avail = N - buffer_offset;
                let count = remaining.min(avail);

                // SAFETY: slot at `read_index` is occupied because the
                // ring isn't empty; we only read sample data here, no
                // aliasing with the producer side (which never touches
                // an installed slot until it's released).
                let slot = ring.slots[read_index].as_ref().unwrap();
                let channel_refs: [&[i16; N]; C] = core::array::from_fn(|ch| slot[ch].samples());
                let channel_slices: [&[i16]; C] = channel_refs.map(|s| s.as_slice());

                let dst_words = &mut word_buf[produced * words_per_frame..];
                interleave_channels::<C>(dst_words, &channel_slices, buffer_offset, count, C);

                ring.buffer_offset += count;
                let advance = ring.buffer_offset >= N;
                if advance {
                    ring.buffer_offset = 0;
                }
                Some((count, advance, read_index))
            });

            match release_and_advance {
                None => {
                    let zero_from = produced * words_per_frame;
                    word_buf[zero_from..total_words].fill(0);
                    self.underflow_count += 1;
                    produced = target;
                }
                Some((count, advance, read_index)) => {
                    produced += count;
                    if advance {
                        let released = critical_section::with(|cs| {
                            let mut ring = self.ring.borrow(cs).borrow_mut();
                            let slot = ring.slots[read_index].take();
                            ring.read_index = (ring.read_index + 1) % CAPTURE_RING_SLOTS;
                            slot
                        });
                        if let Some(slot) = released {
                            for block in slot {
                                graph.release(block);
                            }
                        }
                    }
                }
            }
        }

        for (chunk, word) in out[..total_bytes].chunks_exact_mut(4).zip(word_buf.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        total_bytes
    }

    /// Once-a-second diagnostic: logs and resets `underflow_count`/
    /// `overflow_count`. Purely informational (§7) — callers typically
    /// invoke this once per graph tick alongside [`Self::update`] and
    /// let the internal cadence decide whether anything happens.
    ///
    /// A no-op unless the crate's `log` feature is enabled, so a
    /// firmware build without a logger pays nothing for the `millis()`
    /// read beyond the comparison below.
    pub fn log_diagnostics(&mut self, clock: &impl Clock) {
        let now = clock.millis();
        if now.wrapping_sub(self.last_log_ms) < DIAGNOSTIC_LOG_PERIOD_MS {
            return;
        }
        self.last_log_ms = now;

        #[cfg(feature = "log")]
        defmt::debug!(
            "capture: underflow={} overflow={}",
            self.underflow_count,
            self.overflow_count
        );

        self.underflow_count = 0;
        self.overflow_count = 0;
    }
}

impl<G: AudioGraph<N>, const N: usize, const C: usize> Default for CapturePath<G, N, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::test_support::{TestBlock, TestGraph};

    const N: usize = 128;
    const C: usize = 2;

    fn filled_block(value: i16) -> TestBlock<N> {
        TestBlock::from_samples(&[value; N])
    }

    #[test]
    fn super_cycle_follows_the_documented_sequence() {
        let mut graph: TestGraph<N, C> = TestGraph::new();
        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        let mut scratch = [0u8; 45 * 2 * C];

        let mut sizes = Vec::new();
        let mut total = 0usize;
        for _ in 0..10 {
            let n = path.fill_packet(&mut graph, &mut scratch);
            sizes.push(n / (2 * C));
            total += n / (2 * C);
        }
        assert_eq!(sizes, vec![44, 44, 44, 44, 45, 44, 44, 44, 44, 44]);
        assert_eq!(total, 441);
    }

    #[test]
    fn four_channel_packet_returns_target_times_two_times_c() {
        // Spec §4.2/§6 state the returned byte count as the unconditional
        // `target * 4`, matching the original source's hardcoded constant
        // — but that constant is only correct for stereo (see DESIGN.md's
        // Open Question entry on `fill_packet`'s byte count). With 4
        // channels packed two per 32-bit word, a `target`-frame packet
        // needs `target * (C/2)` words, i.e. `target * 2 * C` bytes, twice
        // the literal stereo constant; anything less would silently drop
        // channels 2 and 3 out of every packet.
        const C4: usize = 4;
        let mut graph: TestGraph<N, C4> = TestGraph::new();
        graph.push_input(0, filled_block(1));
        graph.push_input(1, filled_block(2));
        graph.push_input(2, filled_block(3));
        graph.push_input(3, filled_block(4));

        let mut path: CapturePath<TestGraph<N, C4>, N, C4> = CapturePath::new();
        path.update(&mut graph, true);

        let mut scratch = [0u8; 45 * 2 * C4];
        let n = path.fill_packet(&mut graph, &mut scratch);

        assert_eq!(n, 44 * 2 * C4);
        assert_eq!(n, 44 * 4 * 2, "target * 2 * C, not the stereo-only target * 4");

        let word0 = u32::from_le_bytes(scratch[0..4].try_into().unwrap());
        let word1 = u32::from_le_bytes(scratch[4..8].try_into().unwrap());
        assert_eq!(word0 & 0xFFFF, 1);
        assert_eq!(word0 >> 16, 2);
        assert_eq!(word1 & 0xFFFF, 3);
        assert_eq!(word1 >> 16, 4);
    }

    #[test]
    fn underflow_at_start_zero_fills_and_counts() {
        let mut graph: TestGraph<N, C> = TestGraph::new();
        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        let mut scratch = [0u8; 45 * 2 * C];

        let n = path.fill_packet(&mut graph, &mut scratch);
        assert_eq!(n, 44 * 2 * C);
        assert!(scratch[..n].iter().all(|&b| b == 0));
        assert_eq!(path.underflow_count(), 1);
    }

    #[test]
    fn enqueue_then_dequeue_round_trips_samples() {
        let mut graph: TestGraph<N, C> = TestGraph::new();
        graph.push_input(0, filled_block(100));
        graph.push_input(1, filled_block(200));

        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        path.update(&mut graph, true);

        let mut scratch = [0u8; 45 * 2 * C];
        let n = path.fill_packet(&mut graph, &mut scratch);
        assert_eq!(n, 44 * 2 * C);

        let word = u32::from_le_bytes([scratch[0], scratch[1], scratch[2], scratch[3]]);
        assert_eq!(word & 0xFFFF, 100);
        assert_eq!(word >> 16, 200);
        assert_eq!(path.underflow_count(), 0);
    }

    #[test]
    fn missing_channel_is_filled_with_silence() {
        let mut graph: TestGraph<N, C> = TestGraph::new();
        graph.push_input(0, filled_block(7));
        // channel 1 left empty -> silence block allocated

        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        path.update(&mut graph, true);

        let mut scratch = [0u8; 45 * 2 * C];
        path.fill_packet(&mut graph, &mut scratch);
        let word = u32::from_le_bytes([scratch[0], scratch[1], scratch[2], scratch[3]]);
        assert_eq!(word & 0xFFFF, 7);
        assert_eq!(word >> 16, 0);
    }

    #[test]
    fn alt_setting_zero_drains_ring() {
        let mut graph: TestGraph<N, C> = TestGraph::new();
        graph.push_input(0, filled_block(1));
        graph.push_input(1, filled_block(2));

        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        path.update(&mut graph, true);
        path.update(&mut graph, false);

        let mut scratch = [0u8; 45 * 2 * C];
        let n = path.fill_packet(&mut graph, &mut scratch);
        assert!(scratch[..n].iter().all(|&b| b == 0));
        assert_eq!(path.underflow_count(), 1);
    }

    #[test]
    fn overflow_evicts_oldest_slot() {
        let mut graph: TestGraph<N, C> = TestGraph::new();
        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();

        // CAPTURE_RING_SLOTS is 4; filling it 4 times leaves it full
        // (write+1 == read on the 4th), so the 4th enqueue evicts.
        for v in 0..4 {
            graph.push_input(0, filled_block(v));
            graph.push_input(1, filled_block(v));
            path.update(&mut graph, true);
        }
        assert_eq!(path.overflow_count(), 1);
    }

    #[test]
    fn allocation_exhaustion_releases_partial_tick_and_drops_silently() {
        let mut graph: TestGraph<N, C> = TestGraph::new().exhaust_after(0);
        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        path.update(&mut graph, true);
        assert_eq!(path.overflow_count(), 0);
        assert_eq!(path.underflow_count(), 0);
    }

    #[test]
    fn diagnostics_reset_counters_once_per_second() {
        use crate::clock::CountingClock;

        let mut graph: TestGraph<N, C> = TestGraph::new();
        let mut path: CapturePath<TestGraph<N, C>, N, C> = CapturePath::new();
        let mut clock = CountingClock::new();
        let mut scratch = [0u8; 45 * 2 * C];

        path.fill_packet(&mut graph, &mut scratch);
        assert_eq!(path.underflow_count(), 1);

        path.log_diagnostics(&clock);
        assert_eq!(path.underflow_count(), 1, "under a second: no reset yet");

        clock.advance(1000);
        path.log_diagnostics(&clock);
        assert_eq!(path.underflow_count(), 0, "a full second elapsed: counters reset");
    }
}
