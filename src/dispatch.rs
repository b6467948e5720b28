//! Picks the comparator type for a code size known only at runtime.
//!
//! The match on the size happens once; the visitor then runs monomorphized
//! against the concrete comparator, so its inner loop never branches on size.

use crate::computer::HammingComputer;
use crate::error::HammingError;
use crate::generalized::{
    GenHammingComputer16, GenHammingComputer32, GenHammingComputer8, GenHammingComputerM8,
};
use crate::hamming_computer::{
    HammingComputer16, HammingComputer20, HammingComputer32, HammingComputer4,
    HammingComputer64, HammingComputer8, HammingComputerDefault,
};
use crate::kernels::Kernels;

/// Code that runs against whichever comparator the dispatcher picked.
pub trait ComputerVisitor<'a> {
    type Output;

    fn visit<C: HammingComputer<'a>>(self, computer: C) -> Self::Output;
}

/// Bit-level comparator for `code`. Never fails: sizes without a dedicated
/// variant use `HammingComputerDefault`.
pub fn dispatch_hamming<'a, V: ComputerVisitor<'a>>(
    code: &'a [u8],
    code_size: usize,
    kernels: &Kernels,
    visitor: V,
) -> V::Output {
    debug_assert!(code.len() >= code_size);
    match code_size {
        4 => visitor.visit(HammingComputer4::with_kernels(code, code_size, kernels)),
        8 => visitor.visit(HammingComputer8::with_kernels(code, code_size, kernels)),
        16 => visitor.visit(HammingComputer16::with_kernels(code, code_size, kernels)),
        20 => visitor.visit(HammingComputer20::with_kernels(code, code_size, kernels)),
        32 => visitor.visit(HammingComputer32::with_kernels(code, code_size, kernels)),
        64 => visitor.visit(HammingComputer64::with_kernels(code, code_size, kernels)),
        _ => visitor.visit(HammingComputerDefault::with_kernels(code, code_size, kernels)),
    }
}

/// Byte-level comparator for `code`. `code_size` has to be a multiple of 8.
pub fn dispatch_generalized_hamming<'a, V: ComputerVisitor<'a>>(
    code: &'a [u8],
    code_size: usize,
    kernels: &Kernels,
    visitor: V,
) -> Result<V::Output, HammingError> {
    if !GenHammingComputerM8::accepts(code_size) {
        return Err(HammingError::InvalidCodeSize {
            computer: GenHammingComputerM8::NAME,
            code_size,
        });
    }
    if code.len() < code_size {
        return Err(HammingError::CodeTooShort {
            expected: code_size,
            actual: code.len(),
        });
    }

    let output = match code_size {
        8 => visitor.visit(GenHammingComputer8::with_kernels(code, code_size, kernels)),
        16 => visitor.visit(GenHammingComputer16::with_kernels(code, code_size, kernels)),
        32 => visitor.visit(GenHammingComputer32::with_kernels(code, code_size, kernels)),
        _ => visitor.visit(GenHammingComputerM8::with_kernels(code, code_size, kernels)),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NameOf;

    impl<'a> ComputerVisitor<'a> for NameOf {
        type Output = &'static str;

        fn visit<C: HammingComputer<'a>>(self, _computer: C) -> &'static str {
            C::NAME
        }
    }

    #[test]
    fn test_dispatch_hamming_sizes() {
        let code = vec![0u8; 128];
        let kernels = Kernels::scalar();
        let expected = [
            (4, "HammingComputer4"),
            (8, "HammingComputer8"),
            (16, "HammingComputer16"),
            (20, "HammingComputer20"),
            (32, "HammingComputer32"),
            (64, "HammingComputer64"),
            (0, "HammingComputerDefault"),
            (21, "HammingComputerDefault"),
            (128, "HammingComputerDefault"),
        ];
        for (code_size, name) in expected {
            assert_eq!(dispatch_hamming(&code, code_size, &kernels, NameOf), name);
        }
    }

    #[test]
    fn test_dispatch_generalized_sizes() {
        let code = vec![0u8; 128];
        let kernels = Kernels::scalar();
        let expected = [
            (8, "GenHammingComputer8"),
            (16, "GenHammingComputer16"),
            (32, "GenHammingComputer32"),
            (24, "GenHammingComputerM8"),
            (128, "GenHammingComputerM8"),
        ];
        for (code_size, name) in expected {
            assert_eq!(
                dispatch_generalized_hamming(&code, code_size, &kernels, NameOf),
                Ok(name)
            );
        }

        assert_eq!(
            dispatch_generalized_hamming(&code, 12, &kernels, NameOf),
            Err(HammingError::InvalidCodeSize {
                computer: "GenHammingComputerM8",
                code_size: 12,
            })
        );
        assert_eq!(
            dispatch_generalized_hamming(&code[..16], 24, &kernels, NameOf),
            Err(HammingError::CodeTooShort {
                expected: 24,
                actual: 16,
            })
        );
    }
}
