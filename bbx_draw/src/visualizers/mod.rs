//! Audio and DSP visualizers.

mod graph_topology;
mod midi_activity;
mod spectrum;
mod waveform;

pub use graph_topology::GraphTopologyVisualizer;
pub use midi_activity::MidiActivityVisualizer;
pub use spectrum::SpectrumAnalyzer;
pub use waveform::WaveformVisualizer;
