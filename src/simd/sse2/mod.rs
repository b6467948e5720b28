pub mod byte_diff;

use std::arch::x86_64::*;

#[target_feature(enable = "sse2")]
#[allow(clippy::missing_safety_doc)]
#[inline]
pub unsafe fn count_byte_diff_128(a: __m128i, b: __m128i) -> u32 {
    let matches = _mm_movemask_epi8(_mm_cmpeq_epi8(a, b)) as u32;
    16 - matches.count_ones()
}
