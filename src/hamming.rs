//! Hamming distance over word- or byte-aligned slices with a known width.
//!
//! These are the building blocks of the comparators: the unrolled 64/128/256
//! bit forms cover the common code lengths, everything else loops.

use num_traits::{AsPrimitive, PrimInt};

use crate::popcount::{popcount64, BYTE_POPCOUNT};
use crate::HamDist;

/// Byte-level Hamming distance for widths that are not a multiple of 64 bits.
///
/// `T` is the accumulator and result type; it has to hold `NBITS`.
#[inline]
pub fn hamming_bytes<const NBITS: usize, T>(a: &[u8], b: &[u8]) -> T
where
    T: PrimInt + 'static,
    u8: AsPrimitive<T>,
{
    const { assert!(NBITS % 8 == 0) };
    let nbytes = NBITS / 8;
    let mut h = T::zero();
    for (&x, &y) in a[..nbytes].iter().zip(&b[..nbytes]) {
        h = h + BYTE_POPCOUNT[(x ^ y) as usize].as_();
    }
    h
}

#[inline(always)]
pub fn hamming_64(a: &[u64], b: &[u64]) -> HamDist {
    popcount64(a[0] ^ b[0])
}

#[inline(always)]
pub fn hamming_128(a: &[u64], b: &[u64]) -> HamDist {
    popcount64(a[0] ^ b[0]) + popcount64(a[1] ^ b[1])
}

#[inline(always)]
pub fn hamming_256(a: &[u64], b: &[u64]) -> HamDist {
    popcount64(a[0] ^ b[0])
        + popcount64(a[1] ^ b[1])
        + popcount64(a[2] ^ b[2])
        + popcount64(a[3] ^ b[3])
}

/// Hamming distance for a width that is a multiple of 64 bits.
///
/// The branch is on a constant and folds away after monomorphization.
#[inline]
pub fn hamming_bits<const NBITS: usize>(a: &[u64], b: &[u64]) -> HamDist {
    const { assert!(NBITS % 64 == 0) };
    match NBITS {
        64 => hamming_64(a, b),
        128 => hamming_128(a, b),
        256 => hamming_256(a, b),
        _ => hamming_words(a, b, NBITS / 64),
    }
}

/// Hamming distance over the first `nwords` words, for lengths only known at
/// runtime.
#[inline]
pub fn hamming_words(a: &[u64], b: &[u64], nwords: usize) -> HamDist {
    a[..nwords]
        .iter()
        .zip(&b[..nwords])
        .map(|(&x, &y)| popcount64(x ^ y))
        .sum()
}
