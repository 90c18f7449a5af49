//! Breaks `[min, max]` into fixed-size segments, runs the seed sieve and
//! the segment sieve over them, and aggregates the total prime count.

use crate::popcount::PopcountTable;
use crate::presieve::Presieve;
use crate::primeset::{self, PrimeSet};
use crate::seed::{sieve_seed, WHEEL_PRIMES_SKIPPED};
use crate::wheel::WheelTables;

/// Number of primes `<= n` for `n` in `0..30`, used both as a fast path
/// for `max < 30` and to credit primes too small to be represented as
/// sieve bits.
const PI_UNDER_30: [u64; 30] = [
    0, 0, 1, 2, 2, 3, 3, 4, 4, 4, 4, 5, 5, 6, 6, 6, 6, 7, 7, 8, 8, 8, 8, 9, 9, 9, 9, 9, 9, 10,
];

const SMALL_PRIMES: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// The byte/bit boundaries of the requested interval within the mod-30
/// bit representation.
pub struct Interval {
    pub start_byte: u64,
    pub start_bit: u32,
    pub end_byte: u64,
    pub end_bit: u32,
}

/// Largest spoke-residue `<= r`, falling back to the previous byte's
/// last spoke when `r == 0` (0 is not representable).
fn floor_bit_abs(wheel: &WheelTables, n: u64) -> i64 {
    let q = n / 30;
    let r = (n % 30) as usize;
    if r == 0 {
        if q == 0 {
            return -1;
        }
        return (q as i64 - 1) * 8 + 7;
    }
    q as i64 * 8 + wheel.last_idx30[r] as i64
}

/// Smallest spoke-residue `>= n`.
fn ceil_bit_abs(wheel: &WheelTables, n: u64) -> i64 {
    let q = n / 30;
    let r = (n % 30) as usize;
    q as i64 * 8 + wheel.find_idx30[r] as i64
}

pub fn calculate_interval(wheel: &WheelTables, min: u64, max: u64) -> Option<Interval> {
    // Bit index 0 (byte 0, spoke 0) encodes the integer 1, which has no
    // prime factors to mark it composite, so it never gets cleared by
    // the pre-sieve or seed/segment markers. For min 0 or 1 the range
    // would otherwise start there and be counted as a spurious prime;
    // skip straight to bit index 1 instead.
    let start_abs = if min <= 1 { 1 } else { ceil_bit_abs(wheel, min) };
    let end_abs = floor_bit_abs(wheel, max);
    if end_abs < start_abs {
        return None;
    }
    Some(Interval {
        start_byte: (start_abs / 8) as u64,
        start_bit: (start_abs % 8) as u32,
        end_byte: (end_abs / 8) as u64 + 1,
        end_bit: (end_abs % 8) as u32 + 1,
    })
}

/// `seed_end_byte = ceil((isqrt(max) + 1) / 30)`, computed with the
/// `(x + 28) / 30` integer trick, and the absolute bit index up to
/// (inclusive) which a discovered prime still needs to be submitted as a
/// sieving prime.
pub fn calculate_seed_interval(wheel: &WheelTables, max: u64) -> (u64, u64) {
    let sqrt_max = isqrt(max);
    let seed_end_byte = ((sqrt_max + 1) + 28) / 30;
    let seed_end_bit_absolute = (floor_bit_abs(wheel, sqrt_max) + 1).max(0) as u64;
    (seed_end_byte.max(1), seed_end_bit_absolute)
}

fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// Credits primes that are either unrepresented in the bit encoding
/// (2, 3, 5) or pre-marked composite by the pre-sieve pattern (7 and the
/// configured pre-sieve primes), restricted to `[min, max]`.
pub fn initial_credit(min: u64, max: u64, presieve_primes: usize) -> u64 {
    let credited = (WHEEL_PRIMES_SKIPPED as usize + presieve_primes).min(SMALL_PRIMES.len());
    SMALL_PRIMES[..credited].iter().filter(|&&p| p >= min && p <= max).count() as u64
}

pub struct EngineParams {
    pub segment_bytes: u64,
    pub small_threshold: u64,
    pub presieve_primes: usize,
}

/// Runs the full pipeline for `[min, max]` with max >= 30. `on_segment`
/// is invoked once per processed segment with `(segments_done,
/// segments_total)` for progress reporting.
pub fn run(
    wheel: &WheelTables,
    presieve: &Presieve,
    popcount: &PopcountTable,
    params: &EngineParams,
    min: u64,
    max: u64,
    mut on_segment: impl FnMut(u64, u64),
) -> u64 {
    let mut count = initial_credit(min, max, params.presieve_primes);

    let interval = match calculate_interval(wheel, min, max) {
        Some(i) => i,
        None => return count,
    };

    let (seed_end_byte, seed_end_bit_absolute) = calculate_seed_interval(wheel, max);
    let lists_alloc = primeset::lists_alloc(max, params.segment_bytes);
    let mut set = PrimeSet::new(
        interval.start_byte,
        interval.end_byte,
        params.segment_bytes,
        params.small_threshold,
        lists_alloc,
    );

    sieve_seed(
        wheel,
        presieve,
        params.presieve_primes,
        seed_end_byte,
        seed_end_bit_absolute,
        params.small_threshold,
        &mut set,
    );

    let total_bytes = interval.end_byte - interval.start_byte;
    let total_segments = ((total_bytes + params.segment_bytes - 1) / params.segment_bytes).max(1);
    let mut segments_done = 0u64;

    let mut sieve = vec![0u8; params.segment_bytes as usize];
    let mut byte = interval.start_byte;
    while byte < interval.end_byte {
        let seg_end = (byte + params.segment_bytes).min(interval.end_byte);
        let seg_len = (seg_end - byte) as usize;
        let is_first = byte == interval.start_byte;
        let is_last = seg_end == interval.end_byte;
        let sb = if is_first { interval.start_bit } else { 0 };
        let eb = if is_last { interval.end_bit } else { 8 };

        count += crate::segment::sieve_segment(
            &mut sieve[..seg_len],
            byte,
            wheel,
            presieve,
            popcount,
            &mut set,
            sb,
            eb,
        );
        set.advance();

        byte = seg_end;
        segments_done += 1;
        on_segment(segments_done, total_segments);
    }

    count
}

/// Returns the count directly for `max < 30` using the tabulated values,
/// without running any part of the sieve pipeline.
pub fn count_under_30(min: u64, max: u64) -> u64 {
    let hi = PI_UNDER_30[max as usize];
    let lo = if min == 0 { 0 } else { PI_UNDER_30[(min - 1) as usize] };
    hi.saturating_sub(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_30_matches_known_counts() {
        assert_eq!(count_under_30(0, 29), 10);
        assert_eq!(count_under_30(0, 10), 4);
        assert_eq!(count_under_30(2, 2), 1);
    }

    #[test]
    fn initial_credit_counts_small_primes_in_range() {
        assert_eq!(initial_credit(0, 29, 6), 10);
        assert_eq!(initial_credit(0, 6, 6), 3); // 2, 3, 5
        // only 11 and 13 are pre-sieved with presieve_primes = 2; 17..29
        // are left for the segment sieve itself to discover.
        assert_eq!(initial_credit(11, 29, 2), 2);
    }

    #[test]
    fn calculate_interval_handles_non_spoke_bounds() {
        let wheel = WheelTables::new();
        let i = calculate_interval(&wheel, 31, 60).unwrap();
        assert_eq!(i.start_byte, 1);
        assert_eq!(i.start_bit, 0); // residue 1 at byte 1
        assert!(i.end_byte >= 2);
    }

    #[test]
    fn calculate_interval_skips_the_unrepresentable_bit_for_one() {
        let wheel = WheelTables::new();
        // min 0 and min 1 both skip byte 0's bit 0 (the bit for the
        // integer 1, which nothing ever marks composite) and land on
        // bit 1 (the integer 7) instead.
        let from_zero = calculate_interval(&wheel, 0, 30).unwrap();
        let from_one = calculate_interval(&wheel, 1, 30).unwrap();
        assert_eq!(from_zero.start_byte, 0);
        assert_eq!(from_zero.start_bit, 1);
        assert_eq!(from_one.start_byte, 0);
        assert_eq!(from_one.start_bit, 1);
    }
}
