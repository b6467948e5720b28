use std::arch::aarch64::*;

use super::count_byte_diff_128;

#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_16_neon(reference: &[u8; 16], candidate: &[u8]) -> u32 {
    let candidate = &candidate[..16];
    count_byte_diff_128(vld1q_u8(reference.as_ptr()), vld1q_u8(candidate.as_ptr()))
}

#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_32_neon(reference: &[u8; 32], candidate: &[u8]) -> u32 {
    byte_diff_blocks_neon(reference, candidate, 1)
}

#[target_feature(enable = "neon")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn byte_diff_blocks_neon(a: &[u8], b: &[u8], nblocks: usize) -> u32 {
    let a_body = &a[..nblocks * 32];
    let b_body = &b[..nblocks * 32];

    let mut a_ptr = a_body.as_ptr();
    let mut b_ptr = b_body.as_ptr();
    let mut accu = 0;
    for _ in 0..nblocks * 2 {
        accu += count_byte_diff_128(vld1q_u8(a_ptr), vld1q_u8(b_ptr));
        a_ptr = a_ptr.add(16);
        b_ptr = b_ptr.add(16);
    }
    accu
}
