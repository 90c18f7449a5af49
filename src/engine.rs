//! The top-level entry point: owns the wheel tables and pre-sieve buffer
//! and exposes `count` as the sole operation the CLI layer calls.

use crate::bucket::BUCKET_PRIMES;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::interval::{self, EngineParams};
use crate::popcount::PopcountTable;
use crate::presieve::Presieve;
use crate::wheel::WheelTables;

pub struct Engine {
    wheel: WheelTables,
    presieve: Presieve,
    popcount: PopcountTable,
    params: EngineParams,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Engine, EngineError> {
        if config.bucket_primes != BUCKET_PRIMES {
            return Err(EngineError::Allocation("bucket_primes must match the compiled bucket capacity"));
        }
        let wheel = WheelTables::new();
        let presieve = Presieve::new(&wheel, config.presieve_primes)?;
        let popcount = PopcountTable::new();
        let params = EngineParams {
            segment_bytes: config.segment_bytes,
            small_threshold: config.small_threshold(),
            presieve_primes: config.presieve_primes,
        };
        Ok(Engine { wheel, presieve, popcount, params })
    }

    /// Counts the primes in `[min, max]`.
    pub fn count(&self, min: u64, max: u64) -> Result<u64, EngineError> {
        self.count_with_progress(min, max, |_, _| {})
    }

    /// Counts the primes in `[min, max]`, invoking `on_segment(done,
    /// total)` after each processed segment.
    pub fn count_with_progress(
        &self,
        min: u64,
        max: u64,
        on_segment: impl FnMut(u64, u64),
    ) -> Result<u64, EngineError> {
        if min > max {
            return Err(EngineError::InvalidRange { min, max });
        }
        if max < 30 {
            return Ok(interval::count_under_30(min, max));
        }
        Ok(interval::run(&self.wheel, &self.presieve, &self.popcount, &self.params, min, max, on_segment))
    }
}
