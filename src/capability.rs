use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Which kernels a comparator may use.
///
/// The policy only picks an implementation; every policy returns the same
/// distances.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Acceleration {
    /// Use whatever the running CPU supports.
    #[default]
    Auto,
    /// Portable scalar kernels only.
    Scalar,
}

/// Vector instruction sets relevant to the distance kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// AVX-512F with the VPOPCNTDQ extension: 8 x 64-bit popcount per instruction.
    pub avx512_vpopcntdq: bool,
    pub avx2: bool,
    pub sse2: bool,
    pub neon: bool,
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

impl Capabilities {
    /// Capabilities of the running CPU, probed on first use.
    pub fn detected() -> Capabilities {
        *CAPABILITIES.get_or_init(|| {
            let capabilities = Self::probe();
            tracing::debug!(
                avx512_vpopcntdq = capabilities.avx512_vpopcntdq,
                avx2 = capabilities.avx2,
                sse2 = capabilities.sse2,
                neon = capabilities.neon,
                "probed cpu capabilities"
            );
            capabilities
        })
    }

    /// No vector instruction set at all.
    pub fn none() -> Capabilities {
        Capabilities::default()
    }

    #[allow(unused_mut)]
    fn probe() -> Capabilities {
        let mut capabilities = Capabilities::none();

        #[cfg(target_arch = "x86_64")]
        {
            capabilities.avx512_vpopcntdq = is_x86_feature_detected!("avx512f")
                && is_x86_feature_detected!("avx512vpopcntdq");
            capabilities.avx2 = is_x86_feature_detected!("avx2");
            capabilities.sse2 = is_x86_feature_detected!("sse2");
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            capabilities.neon = std::arch::is_aarch64_feature_detected!("neon");
        }

        capabilities
    }

    /// Restricts the capabilities to what `acceleration` allows.
    pub fn allowed_by(self, acceleration: Acceleration) -> Capabilities {
        match acceleration {
            Acceleration::Auto => self,
            Acceleration::Scalar => Capabilities::none(),
        }
    }
}
