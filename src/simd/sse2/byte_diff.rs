use std::arch::x86_64::*;

use super::count_byte_diff_128;

#[target_feature(enable = "sse2")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_16_sse2(reference: &[u8; 16], candidate: &[u8]) -> u32 {
    let candidate = &candidate[..16];
    let a = _mm_loadu_si128(reference.as_ptr() as *const __m128i);
    let b = _mm_loadu_si128(candidate.as_ptr() as *const __m128i);
    count_byte_diff_128(a, b)
}

#[target_feature(enable = "sse2")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_32_sse2(reference: &[u8; 32], candidate: &[u8]) -> u32 {
    byte_diff_blocks_sse2(reference, candidate, 1)
}

/// Same contract as the AVX2 variant, two 128-bit compares per block.
#[target_feature(enable = "sse2")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_blocks_sse2(a: &[u8], b: &[u8], nblocks: usize) -> u32 {
    let a_body = &a[..nblocks * 32];
    let b_body = &b[..nblocks * 32];

    let mut a_ptr = a_body.as_ptr() as *const __m128i;
    let mut b_ptr = b_body.as_ptr() as *const __m128i;
    let mut accu = 0;
    for _ in 0..nblocks * 2 {
        accu += count_byte_diff_128(_mm_loadu_si128(a_ptr), _mm_loadu_si128(b_ptr));
        a_ptr = a_ptr.add(1);
        b_ptr = b_ptr.add(1);
    }
    accu
}
