//! Bit-level comparators.
//!
//! The fixed-size variants keep the reference in a handful of word fields so
//! that a scan loop can hold it in registers. Sizes without a dedicated
//! variant go through `HammingComputerDefault`.

use crate::computer::HammingComputer;
use crate::hamming::{hamming_128, hamming_bits};
use crate::kernels::{Kernels, XorPopcntBlockFn, XorPopcntWordsFn};
use crate::popcount::{popcount32, popcount64, read_u32, read_u64, read_words, BYTE_POPCOUNT};
use crate::HamDist;

#[derive(Debug, Clone, Copy, Default)]
pub struct HammingComputer4 {
    a0: u32,
}

impl HammingComputer4 {
    pub const CODE_SIZE: usize = 4;
}

impl<'a> HammingComputer<'a> for HammingComputer4 {
    const NAME: &'static str = "HammingComputer4";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, _kernels: &Kernels) -> Self {
        let mut computer = Self::default();
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a0 = read_u32(code, 0);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        popcount32(read_u32(candidate, 0) ^ self.a0)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HammingComputer8 {
    a0: u64,
}

impl HammingComputer8 {
    pub const CODE_SIZE: usize = 8;
}

impl<'a> HammingComputer<'a> for HammingComputer8 {
    const NAME: &'static str = "HammingComputer8";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, _kernels: &Kernels) -> Self {
        let mut computer = Self::default();
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a0 = read_u64(code, 0);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        popcount64(read_u64(candidate, 0) ^ self.a0)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HammingComputer16 {
    a: [u64; 2],
}

impl HammingComputer16 {
    pub const CODE_SIZE: usize = 16;
}

impl<'a> HammingComputer<'a> for HammingComputer16 {
    const NAME: &'static str = "HammingComputer16";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, _kernels: &Kernels) -> Self {
        let mut computer = Self::default();
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a = read_words(code);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        hamming_bits::<128>(&self.a, &read_words::<2>(candidate))
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

/// Two full words and a trailing half word.
///
/// In a packed array of 20-byte codes half of the 64-bit loads are
/// misaligned, which costs roughly 10% against the 8/16/32/64 variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingComputer20 {
    a: [u64; 2],
    a2: u32,
}

impl HammingComputer20 {
    pub const CODE_SIZE: usize = 20;
}

impl<'a> HammingComputer<'a> for HammingComputer20 {
    const NAME: &'static str = "HammingComputer20";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, _kernels: &Kernels) -> Self {
        let mut computer = Self::default();
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a = read_words(code);
        self.a2 = read_u32(code, 16);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        hamming_128(&self.a, &read_words::<2>(candidate))
            + popcount32(read_u32(candidate, 16) ^ self.a2)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HammingComputer32 {
    a: [u64; 4],
}

impl HammingComputer32 {
    pub const CODE_SIZE: usize = 32;
}

impl<'a> HammingComputer<'a> for HammingComputer32 {
    const NAME: &'static str = "HammingComputer32";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, _kernels: &Kernels) -> Self {
        let mut computer = Self::default();
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a = read_words(code);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        hamming_bits::<256>(&self.a, &read_words::<4>(candidate))
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

/// 64-byte codes, one vector instruction per comparison when the CPU has a
/// wide popcount, eight scalar words otherwise.
#[derive(Debug, Clone, Copy)]
pub struct HammingComputer64 {
    a: [u64; 8],
    xor_popcnt_block: XorPopcntBlockFn,
}

impl HammingComputer64 {
    pub const CODE_SIZE: usize = 64;
}

impl<'a> HammingComputer<'a> for HammingComputer64 {
    const NAME: &'static str = "HammingComputer64";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, kernels: &Kernels) -> Self {
        let mut computer = Self {
            a: [0; 8],
            xor_popcnt_block: kernels.xor_popcnt_block,
        };
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a = read_words(code);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        (self.xor_popcnt_block)(&self.a, candidate)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

/// Any code size, including sizes that are not a multiple of 8.
///
/// Borrows the reference code: the caller keeps it alive for as long as the
/// comparator is in use.
#[derive(Debug, Clone, Copy)]
pub struct HammingComputerDefault<'a> {
    a: &'a [u8],
    quotient8: usize,
    remainder8: usize,
    xor_popcnt_words: XorPopcntWordsFn,
}

impl<'a> HammingComputer<'a> for HammingComputerDefault<'a> {
    const NAME: &'static str = "HammingComputerDefault";

    fn accepts(_code_size: usize) -> bool {
        true
    }

    fn with_kernels(code: &'a [u8], code_size: usize, kernels: &Kernels) -> Self {
        let mut computer = Self {
            a: &[],
            quotient8: 0,
            remainder8: 0,
            xor_popcnt_words: kernels.xor_popcnt_words,
        };
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert!(code.len() >= code_size);
        self.a = &code[..code_size];
        self.quotient8 = code_size / 8;
        self.remainder8 = code_size % 8;
    }

    fn hamming(&self, candidate: &[u8]) -> HamDist {
        let mut accu = (self.xor_popcnt_words)(self.a, candidate, self.quotient8);

        if self.remainder8 > 0 {
            let offset = self.quotient8 * 8;
            let a = &self.a[offset..];
            let b = &candidate[offset..offset + self.remainder8];
            for (&x, &y) in a.iter().zip(b) {
                accu += BYTE_POPCOUNT[(x ^ y) as usize] as HamDist;
            }
        }

        accu
    }

    fn code_size(&self) -> usize {
        self.quotient8 * 8 + self.remainder8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split() {
        let code = [0u8; 21];
        let computer = HammingComputerDefault::new(&code, 21);
        assert_eq!(computer.quotient8, 2);
        assert_eq!(computer.remainder8, 5);
        assert_eq!(computer.code_size(), 21);
    }

    #[test]
    fn test_set_replaces_reference() {
        let zeros = [0u8; 20];
        let ones = [0xFFu8; 20];
        let mut computer = HammingComputer20::new(&zeros, 20);
        assert_eq!(computer.hamming(&ones), 160);
        computer.set(&ones, 20);
        assert_eq!(computer.hamming(&ones), 0);
        assert_eq!(computer.hamming(&zeros), 160);
    }

    #[test]
    fn test_empty_default() {
        let code: [u8; 0] = [];
        let computer = HammingComputerDefault::new(&code, 0);
        assert_eq!(computer.hamming(&code), 0);
        assert_eq!(computer.code_size(), 0);
    }
}
