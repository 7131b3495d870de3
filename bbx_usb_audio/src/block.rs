//! The external audio-block and audio-graph collaborator interfaces.
//!
//! The engine never allocates or owns sample memory itself — every block
//! that flows through it comes from, and goes back to, an `AudioGraph`
//! implementation supplied by the embedder. This mirrors the source
//! firmware's `AudioStream::allocate/release/transmit/receiveWritable`
//! free functions, just expressed as a trait so the engine stays generic
//! over whatever block pool the target firmware uses.

/// A fixed-size, owned handle to `N` signed 16-bit PCM samples.
///
/// Implementors are typically a thin wrapper around a pool-allocated
/// buffer; the engine only ever holds one block at a time per slot and
/// never clones or copies a block's contents outside of `samples()`.
pub trait AudioBlock<const N: usize> {
    /// Samples as a read-only fixed-size array.
    fn samples(&self) -> &[i16; N];

    /// Samples as a mutable fixed-size array.
    fn samples_mut(&mut self) -> &mut [i16; N];

    /// Overwrite every sample with silence.
    fn zeroize(&mut self) {
        self.samples_mut().fill(0);
    }
}

/// The audio-graph memory and flow collaborator.
///
/// # ISR safety
///
/// The foreground (graph-scheduler) context may call every method here.
/// The ISR context may call only [`AudioGraph::release`] and — for the
/// playback receive path specifically, by long-standing legacy
/// contract — [`AudioGraph::allocate`]. An implementation used with
/// [`crate::playback::PlaybackPath`] must therefore make `allocate` safe
/// to call with interrupts enabled at any priority, or the receive path
/// must be fed from a bottom half instead of the raw ISR.
pub trait AudioGraph<const N: usize> {
    /// The block type flowing through this graph.
    type Block: AudioBlock<N>;

    /// Acquire a free block from the pool, or `None` if exhausted.
    fn allocate(&mut self) -> Option<Self::Block>;

    /// Return a block to the pool.
    fn release(&mut self, block: Self::Block);

    /// Hand a completed block to the graph on the given channel.
    ///
    /// Ownership of `block` transfers to the graph; the engine never
    /// touches it again.
    fn transmit(&mut self, block: Self::Block, channel: usize);

    /// Borrow (and take ownership of) the block the graph has produced
    /// for `channel` this tick, if any.
    fn receive_writable(&mut self, channel: usize) -> Option<Self::Block>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::VecDeque;

    /// A plain heap-backed block for hosted tests.
    #[derive(Clone)]
    pub struct TestBlock<const N: usize> {
        data: [i16; N],
    }

    impl<const N: usize> TestBlock<N> {
        pub fn new() -> Self {
            Self { data: [0; N] }
        }

        pub fn from_samples(samples: &[i16]) -> Self {
            let mut data = [0i16; N];
            let len = samples.len().min(N);
            data[..len].copy_from_slice(&samples[..len]);
            Self { data }
        }
    }

    impl<const N: usize> AudioBlock<N> for TestBlock<N> {
        fn samples(&self) -> &[i16; N] {
            &self.data
        }

        fn samples_mut(&mut self) -> &mut [i16; N] {
            &mut self.data
        }
    }

    /// A trivially-allocating test graph: unbounded pool, per-channel
    /// output queues that record every transmitted block, and
    /// per-channel input queues that `receive_writable` drains.
    pub struct TestGraph<const N: usize, const C: usize> {
        pub transmitted: [VecDeque<TestBlock<N>>; C],
        pub pending_input: [VecDeque<TestBlock<N>>; C],
        pub allocations_remaining: Option<usize>,
    }

    impl<const N: usize, const C: usize> TestGraph<N, C> {
        pub fn new() -> Self {
            Self {
                transmitted: core::array::from_fn(|_| VecDeque::new()),
                pending_input: core::array::from_fn(|_| VecDeque::new()),
                allocations_remaining: None,
            }
        }

        pub fn exhaust_after(mut self, n: usize) -> Self {
            self.allocations_remaining = Some(n);
            self
        }

        pub fn push_input(&mut self, channel: usize, block: TestBlock<N>) {
            self.pending_input[channel].push_back(block);
        }
    }

    impl<const N: usize, const C: usize> AudioGraph<N> for TestGraph<N, C> {
        type Block = TestBlock<N>;

        fn allocate(&mut self) -> Option<Self::Block> {
            if let Some(remaining) = self.allocations_remaining.as_mut() {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
            }
            Some(TestBlock::new())
        }

        fn release(&mut self, _block: Self::Block) {}

        fn transmit(&mut self, block: Self::Block, channel: usize) {
            self.transmitted[channel].push_back(block);
        }

        fn receive_writable(&mut self, channel: usize) -> Option<Self::Block> {
            self.pending_input[channel].pop_front()
        }
    }
}
