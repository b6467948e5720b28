//! Interchangeable implementations of the inner loops.
//!
//! `Kernels` is resolved once from the detected CPU capabilities, comparators
//! copy the function pointers they need when they are built, so the hot path
//! never tests for a feature.

use std::sync::OnceLock;

use crate::capability::{Acceleration, Capabilities};
use crate::generalized::generalized_hamming_64;
use crate::popcount::{popcount64, read_u64};
use crate::HamDist;

/// Hamming distance between a 64-byte reference and the first 64 bytes of a candidate.
pub type XorPopcntBlockFn = fn(&[u64; 8], &[u8]) -> HamDist;
/// Hamming distance over the first `nwords` 64-bit words of two codes.
pub type XorPopcntWordsFn = fn(&[u8], &[u8], usize) -> HamDist;
pub type ByteDiff16Fn = fn(&[u8; 16], &[u8]) -> HamDist;
pub type ByteDiff32Fn = fn(&[u8; 32], &[u8]) -> HamDist;
/// Differing bytes over the first `nblocks` 32-byte blocks of two codes.
pub type ByteDiffBlocksFn = fn(&[u8], &[u8], usize) -> HamDist;

const SCALAR: &str = "scalar";

#[derive(Debug, Clone, Copy)]
pub struct Kernels {
    pub(crate) xor_popcnt_block: XorPopcntBlockFn,
    pub(crate) xor_popcnt_words: XorPopcntWordsFn,
    pub(crate) byte_diff_16: ByteDiff16Fn,
    pub(crate) byte_diff_32: ByteDiff32Fn,
    pub(crate) byte_diff_blocks: ByteDiffBlocksFn,
    popcnt_isa: &'static str,
    byte_diff_isa: &'static str,
}

impl Kernels {
    /// Portable kernels, available everywhere.
    pub fn scalar() -> Kernels {
        Kernels {
            xor_popcnt_block: xor_popcnt_block_scalar,
            xor_popcnt_words: xor_popcnt_words_scalar,
            byte_diff_16: byte_diff_16_scalar,
            byte_diff_32: byte_diff_32_scalar,
            byte_diff_blocks: byte_diff_blocks_scalar,
            popcnt_isa: SCALAR,
            byte_diff_isa: SCALAR,
        }
    }

    /// Fastest kernels for the running CPU, selected once per process.
    pub fn detected() -> &'static Kernels {
        static DETECTED: OnceLock<Kernels> = OnceLock::new();
        DETECTED.get_or_init(|| {
            let kernels = Self::select(Capabilities::detected());
            tracing::debug!(
                popcnt = kernels.popcnt_isa,
                byte_diff = kernels.byte_diff_isa,
                "selected distance kernels"
            );
            kernels
        })
    }

    pub fn with_acceleration(acceleration: Acceleration) -> Kernels {
        Self::select(Capabilities::detected().allowed_by(acceleration))
    }

    /// `capabilities` must not claim anything the running CPU lacks: only
    /// detected capabilities, possibly restricted, reach this function.
    #[allow(unused_variables, unused_mut)]
    fn select(capabilities: Capabilities) -> Kernels {
        let mut kernels = Kernels::scalar();

        #[cfg(target_arch = "x86_64")]
        {
            if capabilities.avx512_vpopcntdq {
                kernels.xor_popcnt_block = x86::xor_popcnt_block_avx512;
                kernels.xor_popcnt_words = x86::xor_popcnt_words_avx512;
                kernels.popcnt_isa = "avx512_vpopcntdq";
            }
            if capabilities.sse2 {
                kernels.byte_diff_16 = x86::byte_diff_16_sse2;
                kernels.byte_diff_32 = x86::byte_diff_32_sse2;
                kernels.byte_diff_blocks = x86::byte_diff_blocks_sse2;
                kernels.byte_diff_isa = "sse2";
            }
            if capabilities.avx2 {
                kernels.byte_diff_32 = x86::byte_diff_32_avx2;
                kernels.byte_diff_blocks = x86::byte_diff_blocks_avx2;
                kernels.byte_diff_isa = "avx2";
            }
        }

        #[cfg(all(
            target_arch = "aarch64",
            target_feature = "neon",
            target_endian = "little"
        ))]
        {
            if capabilities.neon {
                kernels.xor_popcnt_block = arm::xor_popcnt_block_neon;
                kernels.xor_popcnt_words = arm::xor_popcnt_words_neon;
                kernels.popcnt_isa = "neon";
                kernels.byte_diff_16 = arm::byte_diff_16_neon;
                kernels.byte_diff_32 = arm::byte_diff_32_neon;
                kernels.byte_diff_blocks = arm::byte_diff_blocks_neon;
                kernels.byte_diff_isa = "neon";
            }
        }

        kernels
    }

    /// Instruction set behind the bit-distance kernels.
    pub fn popcnt_isa(&self) -> &'static str {
        self.popcnt_isa
    }

    /// Instruction set behind the byte-distance kernels.
    pub fn byte_diff_isa(&self) -> &'static str {
        self.byte_diff_isa
    }

    pub fn is_accelerated(&self) -> bool {
        self.popcnt_isa != SCALAR || self.byte_diff_isa != SCALAR
    }
}

pub fn xor_popcnt_block_scalar(reference: &[u64; 8], candidate: &[u8]) -> HamDist {
    let mut accu = 0;
    for (i, &word) in reference.iter().enumerate() {
        accu += popcount64(word ^ read_u64(candidate, i * 8));
    }
    accu
}

pub fn xor_popcnt_words_scalar(a: &[u8], b: &[u8], nwords: usize) -> HamDist {
    xor_popcnt_word_range(a, b, 0, nwords)
}

/// Scalar Hamming distance over words `start..end`, eight words per iteration
/// and one at a time for the rest.
#[inline]
pub(crate) fn xor_popcnt_word_range(a: &[u8], b: &[u8], start: usize, end: usize) -> HamDist {
    let a = &a[start * 8..end * 8];
    let b = &b[start * 8..end * 8];
    let mut a_blocks = a.chunks_exact(64);
    let mut b_blocks = b.chunks_exact(64);

    let mut accu = 0;
    for (x, y) in (&mut a_blocks).zip(&mut b_blocks) {
        accu += popcount64(read_u64(x, 0) ^ read_u64(y, 0))
            + popcount64(read_u64(x, 8) ^ read_u64(y, 8))
            + popcount64(read_u64(x, 16) ^ read_u64(y, 16))
            + popcount64(read_u64(x, 24) ^ read_u64(y, 24))
            + popcount64(read_u64(x, 32) ^ read_u64(y, 32))
            + popcount64(read_u64(x, 40) ^ read_u64(y, 40))
            + popcount64(read_u64(x, 48) ^ read_u64(y, 48))
            + popcount64(read_u64(x, 56) ^ read_u64(y, 56));
    }
    for (x, y) in a_blocks
        .remainder()
        .chunks_exact(8)
        .zip(b_blocks.remainder().chunks_exact(8))
    {
        accu += popcount64(read_u64(x, 0) ^ read_u64(y, 0));
    }
    accu
}

pub fn byte_diff_16_scalar(reference: &[u8; 16], candidate: &[u8]) -> HamDist {
    byte_diff_words(reference, candidate, 2)
}

pub fn byte_diff_32_scalar(reference: &[u8; 32], candidate: &[u8]) -> HamDist {
    byte_diff_words(reference, candidate, 4)
}

pub fn byte_diff_blocks_scalar(a: &[u8], b: &[u8], nblocks: usize) -> HamDist {
    byte_diff_words(a, b, nblocks * 4)
}

#[inline]
fn byte_diff_words(a: &[u8], b: &[u8], nwords: usize) -> HamDist {
    (0..nwords)
        .map(|i| generalized_hamming_64(read_u64(a, i * 8) ^ read_u64(b, i * 8)))
        .sum()
}

// Safe entry points for the vector kernels. They are only installed by
// `Kernels::select` after the matching feature was detected.

#[cfg(target_arch = "x86_64")]
mod x86 {
    use crate::simd::{avx2, avx512, sse2};
    use crate::HamDist;

    pub(super) fn xor_popcnt_block_avx512(reference: &[u64; 8], candidate: &[u8]) -> HamDist {
        unsafe { avx512::xor_popcnt::xor_popcnt_block_avx512(reference, candidate) }
    }

    pub(super) fn xor_popcnt_words_avx512(a: &[u8], b: &[u8], nwords: usize) -> HamDist {
        unsafe { avx512::xor_popcnt::xor_popcnt_words_avx512(a, b, nwords) }
    }

    pub(super) fn byte_diff_16_sse2(reference: &[u8; 16], candidate: &[u8]) -> HamDist {
        unsafe { sse2::byte_diff::byte_diff_16_sse2(reference, candidate) }
    }

    pub(super) fn byte_diff_32_sse2(reference: &[u8; 32], candidate: &[u8]) -> HamDist {
        unsafe { sse2::byte_diff::byte_diff_32_sse2(reference, candidate) }
    }

    pub(super) fn byte_diff_blocks_sse2(a: &[u8], b: &[u8], nblocks: usize) -> HamDist {
        unsafe { sse2::byte_diff::byte_diff_blocks_sse2(a, b, nblocks) }
    }

    pub(super) fn byte_diff_32_avx2(reference: &[u8; 32], candidate: &[u8]) -> HamDist {
        unsafe { avx2::byte_diff::byte_diff_32_avx2(reference, candidate) }
    }

    pub(super) fn byte_diff_blocks_avx2(a: &[u8], b: &[u8], nblocks: usize) -> HamDist {
        unsafe { avx2::byte_diff::byte_diff_blocks_avx2(a, b, nblocks) }
    }
}

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    target_endian = "little"
))]
mod arm {
    use crate::simd::neon;
    use crate::HamDist;

    pub(super) fn xor_popcnt_block_neon(reference: &[u64; 8], candidate: &[u8]) -> HamDist {
        unsafe { neon::xor_popcnt::xor_popcnt_block_neon(reference, candidate) }
    }

    pub(super) fn xor_popcnt_words_neon(a: &[u8], b: &[u8], nwords: usize) -> HamDist {
        unsafe { neon::xor_popcnt::xor_popcnt_words_neon(a, b, nwords) }
    }

    pub(super) fn byte_diff_16_neon(reference: &[u8; 16], candidate: &[u8]) -> HamDist {
        unsafe { neon::byte_diff::byte_diff_16_neon(reference, candidate) }
    }

    pub(super) fn byte_diff_32_neon(reference: &[u8; 32], candidate: &[u8]) -> HamDist {
        unsafe { neon::byte_diff::byte_diff_32_neon(reference, candidate) }
    }

    pub(super) fn byte_diff_blocks_neon(a: &[u8], b: &[u8], nblocks: usize) -> HamDist {
        unsafe { neon::byte_diff::byte_diff_blocks_neon(a, b, nblocks) }
    }
}
