pub mod byte_diff;

use std::arch::x86_64::*;

/// Number of byte positions where `a` and `b` differ.
#[target_feature(enable = "avx2")]
#[allow(clippy::missing_safety_doc)]
#[inline]
pub unsafe fn count_byte_diff_256(a: __m256i, b: __m256i) -> u32 {
    let matches = _mm256_movemask_epi8(_mm256_cmpeq_epi8(a, b)) as u32;
    32 - matches.count_ones()
}
