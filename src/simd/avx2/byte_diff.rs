use std::arch::x86_64::*;

use super::count_byte_diff_256;

#[target_feature(enable = "avx2")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_32_avx2(reference: &[u8; 32], candidate: &[u8]) -> u32 {
    let candidate = &candidate[..32];
    let a = _mm256_loadu_si256(reference.as_ptr() as *const __m256i);
    let b = _mm256_loadu_si256(candidate.as_ptr() as *const __m256i);
    count_byte_diff_256(a, b)
}

/// Differing bytes over the first `nblocks` 32-byte blocks.
#[target_feature(enable = "avx2")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_blocks_avx2(a: &[u8], b: &[u8], nblocks: usize) -> u32 {
    let a_body = &a[..nblocks * 32];
    let b_body = &b[..nblocks * 32];

    let mut a_ptr = a_body.as_ptr() as *const __m256i;
    let mut b_ptr = b_body.as_ptr() as *const __m256i;
    let mut accu = 0;
    for _ in 0..nblocks {
        accu += count_byte_diff_256(_mm256_loadu_si256(a_ptr), _mm256_loadu_si256(b_ptr));
        a_ptr = a_ptr.add(1);
        b_ptr = b_ptr.add(1);
    }
    accu
}
