//! Per-round dealing seeds.
//!
//! A room stores one base seed; each round's shuffle seed is mixed from it
//! and the round number, so the record alone reproduces every deal.

/// SplitMix64 finalizer.
const fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Seed for the shuffle of round `round_no` (1-based) in a room seeded with `room_seed`.
pub fn derive_dealing_seed(room_seed: u64, round_no: u32) -> u64 {
    const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;
    mix64(room_seed.wrapping_add(GOLDEN_GAMMA.wrapping_mul(u64::from(round_no) + 1)))
}
