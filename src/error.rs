//! Error type for the sieving engine and the expression evaluator.
//!
//! Most allocation failures in Rust abort the process rather than
//! returning a `Result` (`Vec`/`Box` allocation failure is not
//! recoverable by default), so `Allocation` is reserved for the few
//! places the engine does a size-checked, fallible allocation driven by
//! user input (the pre-sieve and seed buffers) and prefers a clean error
//! over trusting the allocator to abort gracefully.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("allocation failure while initializing {0}")]
    Allocation(&'static str),

    #[error("numeric overflow while evaluating expression")]
    Overflow,

    #[error("minimum {min} is greater than maximum {max}")]
    InvalidRange { min: u64, max: u64 },
}
