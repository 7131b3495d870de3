//! Explicit cache maintenance around DMA-visible buffers.
//!
//! The target family's DMA controller does not participate in CPU cache
//! coherency, so every buffer a USB endpoint DMAs into or out of must be
//! flushed (CPU → memory, before a TX) or invalidated (memory → CPU,
//! before reading an RX buffer the DMA just filled) by hand. This trait
//! is the narrow seam the engine uses instead of calling
//! `arm_dcache_flush`/`arm_dcache_flush_delete`/`arm_dcache_delete`
//! directly, so the same logic runs unmodified on a hosted test target.

/// Cache-line size assumed for alignment of DMA-visible scratch buffers.
pub const CACHE_LINE: usize = 32;

/// A fixed-size byte buffer aligned to [`CACHE_LINE`].
///
/// Every buffer a USB endpoint's DMA touches — the audio RX/TX packet
/// buffers, the feedback-sync report, the capture interleave scratch —
/// must start on a cache-line boundary. The engine itself never places
/// these in memory (that's the embedder's linker script / DMA region),
/// but it hands back data through this type so callers get the
/// alignment for free rather than having to remember it.
#[repr(align(32))]
pub struct AlignedBuffer<const LEN: usize> {
    bytes: [u8; LEN],
}

impl<const LEN: usize> AlignedBuffer<LEN> {
    /// A zero-filled, cache-line-aligned buffer.
    pub const fn new() -> Self {
        Self { bytes: [0u8; LEN] }
    }

    pub fn as_bytes(&self) -> &[u8; LEN] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; LEN] {
        &mut self.bytes
    }
}

impl<const LEN: usize> Default for AlignedBuffer<LEN> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache maintenance operations around DMA-visible memory.
pub trait CacheMaintenance {
    /// Write back CPU-cached data so DMA hardware sees it (pre-TX).
    fn flush(addr: *const u8, len: usize);

    /// Write back and invalidate (pre-TX when the buffer is also reused
    /// for a subsequent RX into the same memory).
    fn flush_invalidate(addr: *const u8, len: usize);

    /// Invalidate CPU-cached data so reads see what DMA just wrote (pre-RX-read).
    fn invalidate(addr: *const u8, len: usize);
}

/// A no-op implementation for targets without a cache, and for hosted tests.
pub struct NoCache;

impl CacheMaintenance for NoCache {
    fn flush(_addr: *const u8, _len: usize) {}
    fn flush_invalidate(_addr: *const u8, _len: usize) {}
    fn invalidate(_addr: *const u8, _len: usize) {}
}

/// A [`CacheMaintenance`] backed by the Cortex-M `SCB` cache maintenance
/// instructions, for firmware targets whose data cache is enabled.
#[cfg(feature = "cortex-m")]
pub struct CortexMCache;

#[cfg(feature = "cortex-m")]
impl CacheMaintenance for CortexMCache {
    fn flush(addr: *const u8, len: usize) {
        // SAFETY: caller guarantees `addr..addr+len` is a valid, live buffer
        // for the duration of this call; no other core accesses it concurrently.
        // Stealing the peripheral is the same pattern the DMA interrupt handler
        // in bbx_daisy::audio uses around its TX/RX buffers.
        unsafe {
            cortex_m::Peripherals::steal()
                .SCB
                .clean_dcache_by_address(addr as usize, len);
        }
    }

    fn flush_invalidate(addr: *const u8, len: usize) {
        unsafe {
            cortex_m::Peripherals::steal()
                .SCB
                .clean_invalidate_dcache_by_address(addr as usize, len);
        }
    }

    fn invalidate(addr: *const u8, len: usize) {
        unsafe {
            cortex_m::Peripherals::steal()
                .SCB
                .invalidate_dcache_by_address(addr as usize, len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cache_is_inert() {
        let buf = [0u8; 32];
        NoCache::flush(buf.as_ptr(), buf.len());
        NoCache::flush_invalidate(buf.as_ptr(), buf.len());
        NoCache::invalidate(buf.as_ptr(), buf.len());
    }

    #[test]
    fn aligned_buffer_starts_on_a_cache_line() {
        let buf: AlignedBuffer<64> = AlignedBuffer::new();
        assert_eq!(buf.as_bytes().as_ptr() as usize % CACHE_LINE, 0);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }
}
