#[cfg(feature = "rodio")]
mod rodio;
#[cfg(feature = "rodio")]
pub use self::rodio::RodioBackend;

#[cfg(feature = "cpal")]
mod cpal;
#[cfg(feature = "cpal")]
pub use self::cpal::CpalBackend;
