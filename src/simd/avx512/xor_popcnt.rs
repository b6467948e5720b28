use std::arch::x86_64::*;

use super::xor_popcnt_512;
use crate::kernels::xor_popcnt_word_range;

#[target_feature(enable = "avx512f,avx512vpopcntdq")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn xor_popcnt_block_avx512(reference: &[u64; 8], candidate: &[u8]) -> u32 {
    let candidate = &candidate[..64];
    let a = _mm512_loadu_si512(reference.as_ptr() as *const __m512i);
    let b = _mm512_loadu_si512(candidate.as_ptr() as *const __m512i);
    // lanes hold at most 64 each, the reduction cannot overflow
    _mm512_reduce_add_epi64(xor_popcnt_512(a, b)) as u32
}

/// Groups of 8 words go through the vector unit, the last `nwords % 8` words
/// through the scalar loop.
#[target_feature(enable = "avx512f,avx512vpopcntdq")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn xor_popcnt_words_avx512(a: &[u8], b: &[u8], nwords: usize) -> u32 {
    let nblocks = nwords / 8;
    let a_body = &a[..nwords * 8];
    let b_body = &b[..nwords * 8];

    let mut a_ptr = a_body.as_ptr();
    let mut b_ptr = b_body.as_ptr();
    let mut sum512 = _mm512_setzero_si512();
    for _ in 0..nblocks {
        let va = _mm512_loadu_si512(a_ptr as *const __m512i);
        let vb = _mm512_loadu_si512(b_ptr as *const __m512i);
        sum512 = _mm512_add_epi64(sum512, xor_popcnt_512(va, vb));
        a_ptr = a_ptr.add(64);
        b_ptr = b_ptr.add(64);
    }

    _mm512_reduce_add_epi64(sum512) as u32 + xor_popcnt_word_range(a, b, nblocks * 8, nwords)
}
