use crate::error::HammingError;
use crate::kernels::Kernels;
use crate::HamDist;

/// Compares one stored reference code against many candidates.
///
/// Implementations either copy the reference (fixed sizes) or borrow it for
/// `'a` (arbitrary sizes). `with_kernels`, `new` and `set` only check the code
/// size with `debug_assert!`; use `try_new` at API boundaries.
pub trait HammingComputer<'a>: Sized {
    /// Type name reported in errors.
    const NAME: &'static str;

    /// Whether this comparator can hold codes of `code_size` bytes.
    fn accepts(code_size: usize) -> bool;

    fn with_kernels(code: &'a [u8], code_size: usize, kernels: &Kernels) -> Self;

    fn new(code: &'a [u8], code_size: usize) -> Self {
        Self::with_kernels(code, code_size, Kernels::detected())
    }

    fn try_new(code: &'a [u8], code_size: usize) -> Result<Self, HammingError> {
        Self::try_with_kernels(code, code_size, Kernels::detected())
    }

    fn try_with_kernels(
        code: &'a [u8],
        code_size: usize,
        kernels: &Kernels,
    ) -> Result<Self, HammingError> {
        if !Self::accepts(code_size) {
            return Err(HammingError::InvalidCodeSize {
                computer: Self::NAME,
                code_size,
            });
        }
        if code.len() < code_size {
            return Err(HammingError::CodeTooShort {
                expected: code_size,
                actual: code.len(),
            });
        }
        Ok(Self::with_kernels(code, code_size, kernels))
    }

    /// Replaces the reference code, keeping the kernels chosen at construction.
    fn set(&mut self, code: &'a [u8], code_size: usize);

    /// Distance between the reference and the first `code_size()` bytes of
    /// `candidate`.
    fn hamming(&self, candidate: &[u8]) -> HamDist;

    fn code_size(&self) -> usize;
}
