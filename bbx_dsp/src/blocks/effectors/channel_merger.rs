//! Channel merger block for combining individual channels into multi-channel audio.

use core::marker::PhantomData;

use crate::{
    block::{Block, MAX_BLOCK_OUTPUTS},
    channel::ChannelConfig,
    context::DspContext,
    parameter::ModulationOutput,
    sample::Sample,
};

/// Merges individual mono inputs into a multi-channel output.
///
/// Each input channel is copied to the corresponding output port,
/// combining separate mono signals into a single multi-channel stream.
///
/// # Example
/// A 4-channel merger takes 4 separate mono signals and combines them
/// into a 4-channel output that can be processed by blocks expecting
/// multi-channel input.
pub struct ChannelMergerBlock<S: Sample> {
    channel_count: usize,
    _phantom: PhantomData<S>,
}

impl<S: Sample> ChannelMergerBlock<S> {
    /// Create a new channel merger for the given number of channels.
    ///
    /// # Panics
    /// Panics if `channels` is 0 or greater than `MAX_BLOCK_OUTPUTS` (16).
    pub fn new(channels: usize) -> Self {
        assert!(channels > 0 && channels <= MAX_BLOCK_OUTPUTS);
        Self {
            channel_count: channels,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of channels this merger handles.
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }
}

impl<S: Sample> Block<S> for ChannelMergerBlock<S> {
    fn process(&mut self, inputs: &[&[S]], outputs: &mut [&mut [S]], _modulation_values: &[S], _context: &DspContext) {
        let num_channels = self.channel_count.min(inputs.len()).min(outputs.len());

        for ch in 0..num_channels {
            let input = inputs[ch];
            let output = &mut outputs[ch];
            let num_samples = input.len().min(output.len());

            output[..num_samples].copy_from_slice(&input[..num_samples]);
        }
    }

    #[inline]
    fn input_count(&self) -> usize {
        self.channel_count
    }

    #[inline]
    fn output_count(&self) -> usize {
        self.channel_count
    }

    #[inline]
    fn modulation_outputs(&self) -> &[ModulationOutput] {
        &[]
    }

    #[inline]
    fn channel_config(&self) -> ChannelConfig {
        ChannelConfig::Explicit
    }
}
