//! The per-segment driver: pre-sieve copy, small-prime marker, large-prime
//! marker, popcount.

use crate::bucket::SievingPrime;
use crate::popcount::PopcountTable;
use crate::presieve::Presieve;
use crate::primeset::PrimeSet;
use crate::wheel::WheelTables;

/// Sieves `sieve[..end-start]` and returns the count of unset (prime)
/// bits, honoring `start_bit` on the first byte and `end_bit` on the
/// last.
pub fn sieve_segment(
    sieve: &mut [u8],
    start: u64,
    wheel: &WheelTables,
    presieve: &Presieve,
    popcount: &PopcountTable,
    set: &mut PrimeSet,
    start_bit: u32,
    end_bit: u32,
) -> u64 {
    presieve.copy(sieve, start);

    mark_small_primes(sieve, wheel, set);
    mark_large_primes(sieve, wheel, set, start);

    popcount.count(sieve, start_bit, end_bit)
}

/// Runs every small prime's wheel-30 marker to the end of the segment,
/// leaving each prime in its `small[]` slot with an updated relative
/// `next_byte` and `wheel_idx`.
fn mark_small_primes(sieve: &mut [u8], wheel: &WheelTables, set: &mut PrimeSet) {
    let len = sieve.len() as u64;
    for head in set.small_lists().iter_mut() {
        let mut bucket = head.as_deref_mut();
        while let Some(b) = bucket {
            for sp in b.as_mut_slice().iter_mut() {
                mark_one_mod30(sieve, wheel, sp, len);
            }
            bucket = b.next.as_deref_mut();
        }
    }
}

#[inline]
fn mark_one_mod30(sieve: &mut [u8], wheel: &WheelTables, sp: &mut SievingPrime, len: u64) {
    let mut byte = sp.next_byte;
    let mut wi = sp.wheel_idx as usize;
    let prime_adj = sp.prime_adj as u64;
    while byte < len {
        let e = wheel.wheel30[wi];
        sieve[byte as usize] |= e.mask;
        byte += e.delta_f as u64 * prime_adj + e.delta_c as u64;
        wi = (wi as i32 + e.next as i32) as usize;
    }
    sp.next_byte = byte - len;
    sp.wheel_idx = wi as u32;
}

/// Pops `lists[0]`, marks every large prime's mod-210 multiples to the
/// end of the segment, and files each one back into the prime set under
/// its new absolute position via `save`.
fn mark_large_primes(sieve: &mut [u8], wheel: &WheelTables, set: &mut PrimeSet, start: u64) {
    let len = sieve.len() as u64;
    let mut bucket = set.take_current();
    while let Some(mut b) = bucket {
        for sp in b.as_mut_slice().iter_mut() {
            mark_one_mod210(sieve, wheel, sp, len);
            set.save(SievingPrime { next_byte: sp.next_byte + start + len, ..*sp });
        }
        let next = b.next.take();
        set.recycle_bucket(b);
        bucket = next;
    }
}

#[inline]
fn mark_one_mod210(sieve: &mut [u8], wheel: &WheelTables, sp: &mut SievingPrime, len: u64) {
    let row = sp.wheel_idx as usize / 48;
    let row_base = row * 48;
    let mut byte = sp.next_byte;
    let mut wi = sp.wheel_idx as usize;
    let prime_adj = sp.prime_adj as u64;
    while byte < len {
        let e = wheel.wheel210[wi];
        sieve[byte as usize] |= e.mask;
        byte += e.delta_f as u64 * prime_adj + e.delta_c as u64;
        wi = row_base + ((wi - row_base) as i32 + e.next as i32).rem_euclid(48) as usize;
    }
    sp.next_byte = byte - len;
    sp.wheel_idx = wi as u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primes_up_to(limit: u64) -> Vec<u64> {
        if limit < 2 {
            return vec![];
        }
        let mut sieve = vec![true; (limit + 1) as usize];
        sieve[0] = false;
        if limit >= 1 {
            sieve[1] = false;
        }
        let mut p = 2;
        while p * p <= limit {
            if sieve[p as usize] {
                let mut m = p * p;
                while m <= limit {
                    sieve[m as usize] = false;
                    m += p;
                }
            }
            p += 1;
        }
        (0..=limit).filter(|&n| sieve[n as usize]).collect()
    }

    #[test]
    fn first_segment_matches_trial_division() {
        let wheel = WheelTables::new();
        let presieve = Presieve::new(&wheel, 6).unwrap();
        let popcount = PopcountTable::new();
        let segment_bytes = 64u64;
        let max = segment_bytes * 30;
        let mut set = PrimeSet::new(0, segment_bytes, segment_bytes, 64, 8);

        crate::seed::sieve_seed(&wheel, &presieve, 6, 4, u64::MAX, 64, &mut set);

        let mut buf = vec![0u8; segment_bytes as usize];
        let count = sieve_segment(&mut buf, 0, &wheel, &presieve, &popcount, &mut set, 0, 8);

        // Primes below 31 are excluded from the byte representation or
        // pre-marked composite by the pre-sieve pattern; the real engine
        // credits them separately (see `interval::initial_credit`).
        let expected = primes_up_to(max).into_iter().filter(|&p| p >= 31).count() as u64;
        assert_eq!(count, expected);
    }
}
