//! Wheel tables for marking multiples of a prime without touching bytes
//! that represent numbers divisible by 2, 3 or 5 (mod-30 wheel) or by
//! 2, 3, 5 or 7 (mod-210 wheel).
//!
//! Each byte of a sieve segment packs eight numbers, one per residue
//! class coprime to 30. A `WheelElem` describes, for a fixed prime and a
//! fixed "factor spoke" (the residue class of the current cofactor), how
//! far to advance to the next multiple and which bit of the destination
//! byte to set. Both wheels share the same eight prime spokes, since
//! every sieving prime is itself coprime to 30.

/// Number of residues coprime to 30 in one period: 1, 7, 11, 13, 17, 19, 23, 29.
pub const WHEEL30_SPOKES: usize = 8;
/// Number of residues coprime to 210 in one period.
pub const WHEEL210_SPOKES: usize = 48;

const OFFS30: [u8; WHEEL30_SPOKES] = [1, 7, 11, 13, 17, 19, 23, 29];

const OFFS210: [u8; WHEEL210_SPOKES] = [
    1, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101,
    103, 107, 109, 113, 121, 127, 131, 137, 139, 143, 149, 151, 157, 163, 167, 169, 173, 179, 181,
    187, 191, 193, 197, 199, 209,
];

/// A single wheel step: mark the multiple `prime * (30q + offs[factor_spoke])`
/// (or the mod-210 analogue), then move to the next factor spoke.
#[derive(Debug, Clone, Copy)]
pub struct WheelElem {
    /// Raw spoke-to-spoke cofactor advance, before folding in whole periods.
    pub delta_f: u8,
    /// Bytes the destination byte index advances by for this step.
    pub delta_c: u8,
    /// Bit to set in the destination byte.
    pub mask: u8,
    /// Row-relative offset to the next factor spoke (wraps within the row).
    pub next: i8,
}

/// Owns the mod-30 and mod-210 wheel tables plus the auxiliary lookup
/// tables used to align a starting point onto the wheel.
pub struct WheelTables {
    pub wheel30: [WheelElem; WHEEL30_SPOKES * WHEEL30_SPOKES],
    pub wheel210: [WheelElem; WHEEL30_SPOKES * WHEEL210_SPOKES],
    pub offs30: [u8; WHEEL30_SPOKES],
    pub offs210: [u8; WHEEL210_SPOKES],
    /// `last_idx30[r]` is the index `j` such that `offs30[j] == r`, for `r`
    /// itself a spoke residue. Used to find a prime's own spoke.
    pub last_idx30: [u8; 30],
    /// `find_idx30[r]` is the index of the smallest spoke `>= r`.
    pub find_idx30: [u8; 30],
    pub last_idx210: [u8; 210],
    pub find_idx210: [u8; 210],
}

/// `last_idx[r]` = index of the largest spoke `<= r`, for `r > 0`. By
/// convention `last_idx[0]` is `0` (no spoke is `<= 0`); callers that
/// need the exact spoke at `r` only ever do so for `r` already known to
/// be a spoke value, where this agrees with `offs[last_idx[r]] == r`.
fn last_idx<const M: usize>(offs: &[u8]) -> [u8; M] {
    let mut table = [0u8; M];
    for r in 1..M {
        if let Some(j) = offs.iter().rposition(|&o| o as usize <= r) {
            table[r] = j as u8;
        }
    }
    table
}

fn find_idx<const M: usize>(offs: &[u8]) -> [u8; M] {
    let mut table = [0u8; M];
    for r in 0..M {
        let j = offs.iter().position(|&o| o as usize >= r).expect("offs covers [0, modulus)");
        table[r] = j as u8;
    }
    table
}

/// Builds the wheel row for prime spoke `offs_p` (the prime's own residue
/// mod 30), against factor spokes `offs_f` wrapping at `period` (30 for
/// the mod-30 wheel, 210 for the mod-210 wheel). Byte positions are
/// always mod-30 quantities — each byte represents 30 integers
/// regardless of which wheel supplies the stride — so the floor
/// divisions that produce `delta_c` and the residue that produces `mask`
/// are always taken modulo 30, per `wheel.c`'s derivation generalized to
/// a cofactor period larger than the byte's own modulus.
fn build_row(offs_p: u32, period: u32, offs_f: &[u8], last_idx30: &[u8]) -> Vec<WheelElem> {
    let spokes = offs_f.len();
    let mut row = Vec::with_capacity(spokes);
    for j in 0..spokes {
        let f = offs_f[j] as u32;
        let next_f = if j + 1 == spokes { period + offs_f[0] as u32 } else { offs_f[j + 1] as u32 };
        let delta_c = ((offs_p * next_f) / 30) - ((offs_p * f) / 30);
        let mask = 1u8 << last_idx30[((offs_p * f) % 30) as usize];
        let next = if j + 1 == spokes { -((spokes as i32 - 1) as i8) } else { 1 };
        let delta_f = next_f - f;
        row.push(WheelElem { delta_f: delta_f as u8, delta_c: delta_c as u8, mask, next });
    }
    row
}

impl WheelTables {
    pub fn new() -> WheelTables {
        let last_idx30 = last_idx::<30>(&OFFS30);
        let find_idx30 = find_idx::<30>(&OFFS30);
        let last_idx210 = last_idx::<210>(&OFFS210);
        let find_idx210 = find_idx::<210>(&OFFS210);

        let mut wheel30 = Vec::with_capacity(WHEEL30_SPOKES * WHEEL30_SPOKES);
        for &offs_p in OFFS30.iter() {
            wheel30.extend(build_row(offs_p as u32, 30, &OFFS30, &last_idx30));
        }

        let mut wheel210 = Vec::with_capacity(WHEEL30_SPOKES * WHEEL210_SPOKES);
        for &offs_p in OFFS30.iter() {
            wheel210.extend(build_row(offs_p as u32, 210, &OFFS210, &last_idx30));
        }

        WheelTables {
            wheel30: wheel30.try_into().unwrap_or_else(|_| unreachable!()),
            wheel210: wheel210.try_into().unwrap_or_else(|_| unreachable!()),
            offs30: OFFS30,
            offs210: OFFS210,
            last_idx30,
            find_idx30,
            last_idx210,
            find_idx210,
        }
    }

    /// The mod-30 spoke index of `n`'s residue, for `n` coprime to 30.
    pub fn spoke30(&self, n: u64) -> usize {
        self.last_idx30[(n % 30) as usize] as usize
    }
}

impl Default for WheelTables {
    fn default() -> Self {
        WheelTables::new()
    }
}
