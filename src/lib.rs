pub mod batch;
pub mod capability;
pub mod computer;
pub mod dispatch;
pub mod error;
pub mod generalized;
pub mod hamming;
pub mod hamming_computer;
pub mod kernels;
pub mod popcount;
pub mod simd;

pub use batch::{CodeParameters, Metric};
pub use capability::{Acceleration, Capabilities};
pub use computer::HammingComputer;
pub use dispatch::{dispatch_generalized_hamming, dispatch_hamming, ComputerVisitor};
pub use error::HammingError;
pub use generalized::{
    generalized_hamming_64, GenHammingComputer16, GenHammingComputer32, GenHammingComputer8,
    GenHammingComputerM8,
};
pub use hamming_computer::{
    HammingComputer16, HammingComputer20, HammingComputer32, HammingComputer4,
    HammingComputer64, HammingComputer8, HammingComputerDefault,
};
pub use kernels::Kernels;

/// Distance between two codes: differing bits, or differing bytes for the
/// generalized family.
pub type HamDist = u32;
