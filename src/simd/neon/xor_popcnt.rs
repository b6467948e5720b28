use std::arch::aarch64::*;

use super::xor_popcnt_128;
use crate::kernels::xor_popcnt_word_range;

#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn xor_popcnt_block_neon(reference: &[u64; 8], candidate: &[u8]) -> u32 {
    let candidate = &candidate[..64];
    let a_ptr = reference.as_ptr() as *const u8;
    let b_ptr = candidate.as_ptr();

    // 4 x 8 bits at most per lane
    let mut sum = vdupq_n_u8(0);
    for i in 0..4 {
        let a = vld1q_u8(a_ptr.add(16 * i));
        let b = vld1q_u8(b_ptr.add(16 * i));
        sum = vaddq_u8(sum, xor_popcnt_128(a, b));
    }
    vaddlvq_u8(sum) as u32
}

#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn xor_popcnt_words_neon(a: &[u8], b: &[u8], nwords: usize) -> u32 {
    let nblocks = nwords / 8;
    let a_body = &a[..nwords * 8];
    let b_body = &b[..nwords * 8];

    let mut a_ptr = a_body.as_ptr();
    let mut b_ptr = b_body.as_ptr();
    let mut accu = 0u32;
    for _ in 0..nblocks {
        let mut sum = vdupq_n_u8(0);
        for _ in 0..4 {
            sum = vaddq_u8(sum, xor_popcnt_128(vld1q_u8(a_ptr), vld1q_u8(b_ptr)));
            a_ptr = a_ptr.add(16);
            b_ptr = b_ptr.add(16);
        }
        accu += vaddlvq_u8(sum) as u32;
    }

    accu + xor_popcnt_word_range(a, b, nblocks * 8, nwords)
}
