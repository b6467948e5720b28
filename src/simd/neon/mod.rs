pub mod byte_diff;
pub mod xor_popcnt;

use std::arch::aarch64::*;

/// Per-byte popcount of `a ^ b`.
#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
#[inline]
pub unsafe fn xor_popcnt_128(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
    vcntq_u8(veorq_u8(a, b))
}

#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
#[inline]
pub unsafe fn count_byte_diff_128(a: uint8x16_t, b: uint8x16_t) -> u32 {
    let matches = vandq_u8(vceqq_u8(a, b), vdupq_n_u8(1));
    16 - vaddvq_u8(matches) as u32
}
