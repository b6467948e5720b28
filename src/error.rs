use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HammingError {
    #[error("{computer} does not accept code size {code_size}")]
    InvalidCodeSize {
        computer: &'static str,
        code_size: usize,
    },

    #[error("Code is too short: expected at least {expected} bytes, got {actual}")]
    CodeTooShort { expected: usize, actual: usize },

    #[error("Buffer of {len} bytes is not a whole number of {code_size}-byte codes")]
    UnalignedBuffer { len: usize, code_size: usize },

    #[error("Output has {actual} slots, expected {expected}")]
    OutputLength { expected: usize, actual: usize },
}
