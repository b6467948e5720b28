//! Instruction-set specific kernels.
//!
//! Every function here is `unsafe`: callers must make sure the running CPU
//! supports the enabled target features. `Kernels` only hands them out after
//! runtime detection.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod avx512;
#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    target_endian = "little"
))]
pub mod neon;
#[cfg(target_arch = "x86_64")]
pub mod sse2;
