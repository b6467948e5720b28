pub mod xor_popcnt;

use std::arch::x86_64::*;

/// Per-lane popcount of `a ^ b` for one 512-bit block.
#[target_feature(enable = "avx512f,avx512vpopcntdq")]
#[allow(clippy::missing_safety_doc)]
#[inline]
pub unsafe fn xor_popcnt_512(a: __m512i, b: __m512i) -> __m512i {
    _mm512_popcnt_epi64(_mm512_xor_si512(a, b))
}
