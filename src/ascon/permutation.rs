//! # ASCON permutation implementation
//!
//! The ASCON permutation operates on a 320-bit state as 5 64-bit words.
//! Three fixed-round wrappers are used by the AEAD modes: `p12` for
//! initialization and finalization, `p8` (ASCON-128a) and `p6` (ASCON-128)
//! for data processing.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Round constants for the full 12-round permutation.
///
/// `p8` runs the last 8, `p6` the last 6.
const ROUND_CONSTANTS: [u64; 12] = [
    0xf0, 0xe1, 0xd2, 0xc3, 0xb4, 0xa5, 0x96, 0x87, 0x78, 0x69, 0x5a, 0x4b,
];

/// ASCON state: 5 u64 words (320 bits).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct State {
    pub(crate) x0: u64,
    pub(crate) x1: u64,
    pub(crate) x2: u64,
    pub(crate) x3: u64,
    pub(crate) x4: u64,
}

/// One permutation round with round constant `c`.
fn round(s: &mut State, c: u64) {
    // Round constant.
    s.x2 ^= c;

    // Substitution layer, part 1.
    s.x0 ^= s.x4;
    s.x4 ^= s.x3;
    s.x2 ^= s.x1;

    // Keccak chi over the five bit-slices.
    let t0 = s.x0 ^ (!s.x1 & s.x2);
    let t1 = s.x1 ^ (!s.x2 & s.x3);
    let t2 = s.x2 ^ (!s.x3 & s.x4);
    let t3 = s.x3 ^ (!s.x4 & s.x0);
    let t4 = s.x4 ^ (!s.x0 & s.x1);

    // Substitution layer, part 2.
    let t1 = t1 ^ t0;
    let t0 = t0 ^ t4;
    let t3 = t3 ^ t2;
    let t2 = !t2;

    // Linear diffusion.
    s.x0 = t0 ^ t0.rotate_right(19) ^ t0.rotate_right(28);
    s.x1 = t1 ^ t1.rotate_right(61) ^ t1.rotate_right(39);
    s.x2 = t2 ^ t2.rotate_right(1) ^ t2.rotate_right(6);
    s.x3 = t3 ^ t3.rotate_right(10) ^ t3.rotate_right(17);
    s.x4 = t4 ^ t4.rotate_right(7) ^ t4.rotate_right(41);
}

/// Apply the 12-round permutation.
pub(crate) fn p12(s: &mut State) {
    for &c in &ROUND_CONSTANTS {
        round(s, c);
    }
}

/// Apply the 8-round permutation.
pub(crate) fn p8(s: &mut State) {
    for &c in &ROUND_CONSTANTS[4..] {
        round(s, c);
    }
}

/// Apply the 6-round permutation.
pub(crate) fn p6(s: &mut State) {
    for &c in &ROUND_CONSTANTS[6..] {
        round(s, c);
    }
}
