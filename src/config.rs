//! Runtime-tunable constants for the sieving engine.

use crate::bucket::BUCKET_PRIMES;
use crate::presieve::PRESIEVE_CANDIDATES;

/// `SEGMENT_BYTES`: the size, in bytes, of each sieve segment. Chosen to
/// fit comfortably in L1 cache; must be a multiple large enough that
/// `lists_alloc` stays small. 32 KiB matches the teacher's defaults.
pub const DEFAULT_SEGMENT_BYTES: u64 = 32 * 1024;

/// `SMALL_THRESHOLD_FACTOR`: fraction of `segment_bytes` below which a
/// prime is handled by the small-prime marker instead of being filed
/// into per-segment lists.
pub const DEFAULT_SMALL_THRESHOLD_FACTOR: f64 = 1.0 / 64.0;

/// Number of the default pre-sieve candidates {11,13,17,19,23,29} to
/// actually fold into the pre-sieve pattern.
pub const DEFAULT_PRESIEVE_PRIMES: usize = PRESIEVE_CANDIDATES.len();

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub segment_bytes: u64,
    /// Must equal `bucket::BUCKET_PRIMES`; bucket arrays are fixed-size
    /// at compile time, so this field exists for parity with the design
    /// but any other value is rejected by `Engine::new`.
    pub bucket_primes: usize,
    pub small_threshold_factor: f64,
    pub presieve_primes: usize,
}

impl EngineConfig {
    pub fn small_threshold(&self) -> u64 {
        (self.segment_bytes as f64 * self.small_threshold_factor) as u64
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            segment_bytes: DEFAULT_SEGMENT_BYTES,
            bucket_primes: BUCKET_PRIMES,
            small_threshold_factor: DEFAULT_SMALL_THRESHOLD_FACTOR,
            presieve_primes: DEFAULT_PRESIEVE_PRIMES,
        }
    }
}
