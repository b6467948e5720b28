//! Generalized Hamming distance: the number of bytes that differ between two
//! codes.

use crate::computer::HammingComputer;
use crate::kernels::{ByteDiff16Fn, ByteDiff32Fn, ByteDiffBlocksFn, Kernels};
use crate::popcount::{popcount64, read_u64};
use crate::HamDist;

/// Number of nonzero bytes in `a`.
///
/// Called on the XOR of two code words it counts the differing bytes. Every
/// byte is folded onto its lowest bit, then one bit per byte is kept.
#[inline(always)]
pub fn generalized_hamming_64(mut a: u64) -> HamDist {
    a |= a >> 1;
    a |= a >> 2;
    a |= a >> 4;
    a &= 0x0101_0101_0101_0101;
    popcount64(a)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenHammingComputer8 {
    a0: u64,
}

impl GenHammingComputer8 {
    pub const CODE_SIZE: usize = 8;
}

impl<'a> HammingComputer<'a> for GenHammingComputer8 {
    const NAME: &'static str = "GenHammingComputer8";

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
        generalized_hamming_64(read_u64(candidate, 0) ^ self.a0)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

/// Byte-equality mask over a 128-bit register, `16 - matches`.
#[derive(Debug, Clone, Copy)]
pub struct GenHammingComputer16 {
    a: [u8; 16],
    byte_diff: ByteDiff16Fn,
}

impl GenHammingComputer16 {
    pub const CODE_SIZE: usize = 16;
}

impl<'a> HammingComputer<'a> for GenHammingComputer16 {
    const NAME: &'static str = "GenHammingComputer16";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, kernels: &Kernels) -> Self {
        let mut computer = Self {
            a: [0; 16],
            byte_diff: kernels.byte_diff_16,
        };
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a.copy_from_slice(&code[..Self::CODE_SIZE]);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        (self.byte_diff)(&self.a, candidate)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GenHammingComputer32 {
    a: [u8; 32],
    byte_diff: ByteDiff32Fn,
}

impl GenHammingComputer32 {
    pub const CODE_SIZE: usize = 32;
}

impl<'a> HammingComputer<'a> for GenHammingComputer32 {
    const NAME: &'static str = "GenHammingComputer32";

    fn accepts(code_size: usize) -> bool {
        code_size == Self::CODE_SIZE
    }

    fn with_kernels(code: &'a [u8], code_size: usize, kernels: &Kernels) -> Self {
        let mut computer = Self {
            a: [0; 32],
            byte_diff: kernels.byte_diff_32,
        };
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size, Self::CODE_SIZE);
        self.a.copy_from_slice(&code[..Self::CODE_SIZE]);
    }

    #[inline]
    fn hamming(&self, candidate: &[u8]) -> HamDist {
        (self.byte_diff)(&self.a, candidate)
    }

    fn code_size(&self) -> usize {
        Self::CODE_SIZE
    }
}

/// Any multiple of 8 bytes: whole 32-byte blocks through the compare kernel,
/// the remaining 0-3 words one at a time.
///
/// Borrows the reference code for `'a`.
#[derive(Debug, Clone, Copy)]
pub struct GenHammingComputerM8<'a> {
    a: &'a [u8],
    n: usize,
    byte_diff_blocks: ByteDiffBlocksFn,
}

impl<'a> HammingComputer<'a> for GenHammingComputerM8<'a> {
    const NAME: &'static str = "GenHammingComputerM8";

    fn accepts(code_size: usize) -> bool {
        code_size % 8 == 0
    }

    fn with_kernels(code: &'a [u8], code_size: usize, kernels: &Kernels) -> Self {
        let mut computer = Self {
            a: &[],
            n: 0,
            byte_diff_blocks: kernels.byte_diff_blocks,
        };
        computer.set(code, code_size);
        computer
    }

    fn set(&mut self, code: &'a [u8], code_size: usize) {
        debug_assert_eq!(code_size % 8, 0);
        self.n = code_size / 8;
        self.a = &code[..self.n * 8];
    }

    fn hamming(&self, candidate: &[u8]) -> HamDist {
        let nblocks = self.n / 4;
        let mut accu = (self.byte_diff_blocks)(self.a, candidate, nblocks);
        for i in nblocks * 4..self.n {
            accu += generalized_hamming_64(read_u64(self.a, i * 8) ^ read_u64(candidate, i * 8));
        }
        accu
    }

    fn code_size(&self) -> usize {
        self.n * 8
    }
}
