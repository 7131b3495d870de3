//! The playback path: host → device stereo PCM.
//!
//! `incoming_left`/`incoming_right`/`incoming_count` are exclusively
//! owned by the USB receive callback (ISR context) and are plain fields
//! on [`PlaybackPath`] — never touched by [`PlaybackPath::update`]
//! except under [`critical_section::with`]. `ready_left`/`ready_right`/
//! `receive_flag` are the one-slot handoff to the graph-update context
//! and live inside a [`critical_section::Mutex`].

use core::cell::RefCell;

use critical_section::Mutex;

use crate::block::{AudioBlock, AudioGraph};
use crate::deinterleave::deinterleave_stereo;
use crate::feedback::FeedbackRegulator;

struct Handoff<B> {
    ready_left: Option<B>,
    ready_right: Option<B>,
    receive_flag: bool,
}

impl<B> Handoff<B> {
    const fn new() -> Self {
        Self {
            ready_left: None,
            ready_right: None,
            receive_flag: false,
        }
    }
}

/// Host→device stereo deinterleave-and-forward path.
pub struct PlaybackPath<G: AudioGraph<N>, const N: usize> {
    incoming_left: Option<G::Block>,
    incoming_right: Option<G::Block>,
    incoming_count: usize,
    handoff: Mutex<RefCell<Handoff<G::Block>>>,
    underrun_count: u32,
    overrun_count: u32,
}

impl<G: AudioGraph<N>, const N: usize> PlaybackPath<G, N> {
    pub fn new() -> Self {
        Self {
            incoming_left: None,
            incoming_right: None,
            incoming_count: 0,
            handoff: Mutex::new(RefCell::new(Handoff::new())),
            underrun_count: 0,
            overrun_count: 0,
        }
    }

    pub fn underrun_count(&self) -> u32 {
        self.underrun_count
    }

    pub fn overrun_count(&self) -> u32 {
        self.overrun_count
    }

    /// Reinitialise to the power-on state. Corresponds to invariant I7;
    /// releases any blocks currently held so they return to the pool.
    pub fn reset(&mut self, graph: &mut G) {
        if let Some(block) = self.incoming_left.take() {
            graph.release(block);
        }
        if let Some(block) = self.incoming_right.take() {
            graph.release(block);
        }
        self.incoming_count = 0;
        self.underrun_count = 0;
        self.overrun_count = 0;
        critical_section::with(|cs| {
            let mut handoff = self.handoff.borrow(cs).borrow_mut();
            if let Some(block) = handoff.ready_left.take() {
                graph.release(block);
            }
            if let Some(block) = handoff.ready_right.take() {
                graph.release(block);
            }
            handoff.receive_flag = false;
        });
    }

    /// USB RX-complete handler. `words` is the packet payload, one
    /// stereo sample per 32-bit little-endian word (low = left, high =
    /// right). Consumes the entire packet; allocation failure or an
    /// overrun drops whatever input remains.
    ///
    /// `graph` allocation from this context is the one legacy exception
    /// to "only the foreground allocates" noted on [`AudioGraph`].
    pub fn receive_packet(&mut self, graph: &mut G, words: &[u32]) {
        critical_section::with(|cs| {
            self.handoff.borrow(cs).borrow_mut().receive_flag = true;
        });

        let mut offset = 0;
        while offset < words.len() {
            if self.incoming_left.is_none() {
                let left = graph.allocate();
                let right = graph.allocate();
                match (left, right) {
                    (Some(l), Some(r)) => {
                        self.incoming_left = Some(l);
                        self.incoming_right = Some(r);
                        self.incoming_count = 0;
                    }
                    (l, r) => {
                        if let Some(l) = l {
                            graph.release(l);
                        }
                        if let Some(r) = r {
                            graph.release(r);
                        }
                        return;
                    }
                }
            }

            let capacity = N - self.incoming_count;
            let take = capacity.min(words.len() - offset);
            {
                let start = self.incoming_count;
                let left = self.incoming_left.as_mut().unwrap();
                let right = self.incoming_right.as_mut().unwrap();
                deinterleave_stereo(
                    &words[offset..offset + take],
                    &mut left.samples_mut()[start..start + take],
                    &mut right.samples_mut()[start..start + take],
                );
            }
            self.incoming_count += take;
            offset += take;

            if self.incoming_count == N {
                let full_left = self.incoming_left.take().unwrap();
                let full_right = self.incoming_right.take().unwrap();
                self.incoming_count = 0;

                let rejected = critical_section::with(|cs| {
                    let mut handoff = self.handoff.borrow(cs).borrow_mut();
                    if handoff.ready_left.is_some() {
                        Some((full_left, full_right))
                    } else {
                        handoff.ready_left = Some(full_left);
                        handoff.ready_right = Some(full_right);
                        None
                    }
                });

                if let Some((left, right)) = rejected {
                    self.overrun_count += 1;
                    graph.release(left);
                    graph.release(right);
                    return;
                }
            }
        }
    }

    /// Graph-tick handler: forwards a ready pair downstream and
    /// recomputes the feedback trim.
    pub fn update(&mut self, graph: &mut G, feedback: &mut FeedbackRegulator) {
        // `incoming_count` is snapshotted inside the same masked region as
        // `ready_*`/`receive_flag`: the ISR can advance it concurrently, so
        // reading it outside the mask could pair a stale count with a newer
        // `ready_*` snapshot.
        let (ready_left, ready_right, receive_flag, incoming_count) = critical_section::with(|cs| {
            let mut handoff = self.handoff.borrow(cs).borrow_mut();
            let left = handoff.ready_left.take();
            let right = handoff.ready_right.take();
            let flag = handoff.receive_flag;
            handoff.receive_flag = false;
            (left, right, flag, self.incoming_count)
        });

        if receive_flag {
            let half = (N / 2) as i32;
            feedback.apply_trim(half - incoming_count as i32);
        }

        match (ready_left, ready_right) {
            (Some(left), Some(right)) => {
                graph.transmit(left, 0);
                graph.transmit(right, 1);
            }
            (left, right) => {
                self.underrun_count += 1;
                if receive_flag {
                    feedback.apply_trim(crate::config::FEEDBACK_UNDERRUN_KICK);
                }
                if let Some(left) = left {
                    graph.release(left);
                }
                if let Some(right) = right {
                    graph.release(right);
                }
            }
        }
    }
}

impl<G: AudioGraph<N>, const N: usize> Default for PlaybackPath<G, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::test_support::TestGraph;
    use crate::config::UsbSpeed;

    const N: usize = 128;

    fn stereo_words(count: usize, start: i16) -> Vec<u32> {
        (0..count)
            .map(|i| {
                let l = start.wrapping_add(i as i16 * 2) as u16 as u32;
                let r = start.wrapping_add(i as i16 * 2 + 1) as u16 as u32;
                l | (r << 16)
            })
            .collect()
    }

    #[test]
    fn nominal_packet_leaves_partial_fill_and_sets_receive_flag() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();

        let words = stereo_words(48, 0);
        path.receive_packet(&mut graph, &words);

        assert_eq!(path.incoming_count, 48);
        assert!(path.overrun_count() == 0 && path.underrun_count() == 0);

        let mut fr = FeedbackRegulator::new(UsbSpeed::FullSpeed);
        let before = fr.accumulator();
        path.update(&mut graph, &mut fr);
        assert_eq!(fr.accumulator(), before.wrapping_add((N as i32 / 2 - 48) as u32));
    }

    #[test]
    fn two_packets_complete_a_pair_and_start_a_new_one() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();

        path.receive_packet(&mut graph, &stereo_words(80, 0));
        assert_eq!(path.incoming_count, 80);

        path.receive_packet(&mut graph, &stereo_words(80, 160));
        assert_eq!(path.incoming_count, 32);

        let mut fr = FeedbackRegulator::new(UsbSpeed::FullSpeed);
        path.update(&mut graph, &mut fr);
        assert_eq!(graph.transmitted[0].len(), 1);
        assert_eq!(graph.transmitted[1].len(), 1);
    }

    #[test]
    fn overrun_when_ready_pair_already_full() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();

        path.receive_packet(&mut graph, &stereo_words(N, 0));
        assert_eq!(path.overrun_count(), 0);

        path.receive_packet(&mut graph, &stereo_words(64, 0));
        assert_eq!(path.incoming_count, 96);

        path.receive_packet(&mut graph, &stereo_words(64, 0));
        assert_eq!(path.overrun_count(), 1);
    }

    #[test]
    fn underrun_when_no_ready_pair_on_update() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();
        let mut fr = FeedbackRegulator::new(UsbSpeed::FullSpeed);

        path.update(&mut graph, &mut fr);
        assert_eq!(path.underrun_count(), 1);
    }

    #[test]
    fn underrun_with_activity_applies_kick() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();
        let mut fr = FeedbackRegulator::new(UsbSpeed::FullSpeed);
        let before = fr.accumulator();

        path.receive_packet(&mut graph, &stereo_words(10, 0));
        path.update(&mut graph, &mut fr);

        let expected_fill_trim = (N as i32 / 2 - 10) as u32;
        assert_eq!(
            fr.accumulator(),
            before
                .wrapping_add(expected_fill_trim)
                .wrapping_add(crate::config::FEEDBACK_UNDERRUN_KICK as u32)
        );
        assert_eq!(path.underrun_count(), 1);
    }

    #[test]
    fn allocation_exhaustion_drops_remainder_of_packet() {
        let mut graph: TestGraph<N, 2> = TestGraph::new().exhaust_after(0);
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();

        path.receive_packet(&mut graph, &stereo_words(10, 0));
        assert_eq!(path.incoming_count, 0);
    }

    #[test]
    fn reset_releases_held_blocks_and_clears_counters() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();

        path.receive_packet(&mut graph, &stereo_words(N, 0));
        path.receive_packet(&mut graph, &stereo_words(10, 0));
        path.reset(&mut graph);

        assert_eq!(path.incoming_count, 0);
        assert_eq!(path.underrun_count(), 0);
        assert_eq!(path.overrun_count(), 0);
    }

    #[test]
    fn deinterleaved_samples_round_trip_through_full_block() {
        let mut graph: TestGraph<N, 2> = TestGraph::new();
        let mut path: PlaybackPath<TestGraph<N, 2>, N> = PlaybackPath::new();
        let mut fr = FeedbackRegulator::new(UsbSpeed::FullSpeed);

        path.receive_packet(&mut graph, &stereo_words(N, 0));
        path.update(&mut graph, &mut fr);

        let left = &graph.transmitted[0][0];
        let right = &graph.transmitted[1][0];
        for i in 0..N {
            assert_eq!(left.samples()[i], (i as i16) * 2);
            assert_eq!(right.samples()[i], (i as i16) * 2 + 1);
        }
    }
}
