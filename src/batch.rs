//! Distances between one or more query codes and a packed buffer of codes.
//!
//! Each query resolves its comparator once through `dispatch`; the scan over
//! the buffer then runs against the concrete comparator type.

use serde::{Deserialize, Serialize};

use crate::capability::Acceleration;
use crate::computer::HammingComputer;
use crate::dispatch::{dispatch_generalized_hamming, dispatch_hamming, ComputerVisitor};
use crate::error::HammingError;
use crate::generalized::GenHammingComputerM8;
use crate::kernels::Kernels;
use crate::HamDist;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Differing bits.
    Hamming,
    /// Differing bytes. Needs a code size that is a multiple of 8.
    GeneralizedHamming,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeParameters {
    pub code_size: usize,
    pub metric: Metric,
    #[serde(default)]
    pub acceleration: Acceleration,
}

impl CodeParameters {
    pub fn new(code_size: usize, metric: Metric) -> Self {
        Self {
            code_size,
            metric,
            acceleration: Acceleration::default(),
        }
    }

    pub fn validate(&self) -> Result<(), HammingError> {
        let accepted = match self.metric {
            Metric::Hamming => self.code_size > 0,
            Metric::GeneralizedHamming => {
                self.code_size > 0 && GenHammingComputerM8::accepts(self.code_size)
            }
        };
        if accepted {
            Ok(())
        } else {
            Err(HammingError::InvalidCodeSize {
                computer: "CodeParameters",
                code_size: self.code_size,
            })
        }
    }

    pub fn kernels(&self) -> Kernels {
        Kernels::with_acceleration(self.acceleration)
    }

    /// Number of codes packed in `buffer`.
    pub fn codes_count(&self, buffer: &[u8]) -> Result<usize, HammingError> {
        if self.code_size == 0 {
            return Err(HammingError::InvalidCodeSize {
                computer: "CodeParameters",
                code_size: 0,
            });
        }
        if buffer.len() % self.code_size != 0 {
            return Err(HammingError::UnalignedBuffer {
                len: buffer.len(),
                code_size: self.code_size,
            });
        }
        Ok(buffer.len() / self.code_size)
    }

    fn visit<'a, V: ComputerVisitor<'a>>(
        &self,
        kernels: &Kernels,
        query: &'a [u8],
        visitor: V,
    ) -> Result<V::Output, HammingError> {
        if query.len() < self.code_size {
            return Err(HammingError::CodeTooShort {
                expected: self.code_size,
                actual: query.len(),
            });
        }
        match self.metric {
            Metric::Hamming => Ok(dispatch_hamming(query, self.code_size, kernels, visitor)),
            Metric::GeneralizedHamming => {
                dispatch_generalized_hamming(query, self.code_size, kernels, visitor)
            }
        }
    }
}

struct FillDistances<'b> {
    codes: &'b [u8],
    code_size: usize,
    out: &'b mut [HamDist],
}

impl<'a> ComputerVisitor<'a> for FillDistances<'_> {
    type Output = ();

    fn visit<C: HammingComputer<'a>>(self, computer: C) {
        for (code, distance) in self.codes.chunks_exact(self.code_size).zip(self.out) {
            *distance = computer.hamming(code);
        }
    }
}

struct CountWithin<'b> {
    codes: &'b [u8],
    code_size: usize,
    threshold: HamDist,
}

impl<'a> ComputerVisitor<'a> for CountWithin<'_> {
    type Output = usize;

    fn visit<C: HammingComputer<'a>>(self, computer: C) -> usize {
        self.codes
            .chunks_exact(self.code_size)
            .filter(|code| computer.hamming(code) <= self.threshold)
            .count()
    }
}

/// `out[i]` = distance between `query` and the `i`-th code of `codes`.
pub fn distances(
    params: &CodeParameters,
    query: &[u8],
    codes: &[u8],
    out: &mut [HamDist],
) -> Result<(), HammingError> {
    params.validate()?;
    let nb = params.codes_count(codes)?;
    if out.len() != nb {
        return Err(HammingError::OutputLength {
            expected: nb,
            actual: out.len(),
        });
    }
    tracing::trace!(code_size = params.code_size, metric = ?params.metric, nb, "distances");

    let kernels = params.kernels();
    params.visit(
        &kernels,
        query,
        FillDistances {
            codes,
            code_size: params.code_size,
            out,
        },
    )
}

/// Row-major `nq x nb` table of distances between every query and every code.
pub fn distance_table(
    params: &CodeParameters,
    queries: &[u8],
    codes: &[u8],
    out: &mut [HamDist],
) -> Result<(), HammingError> {
    params.validate()?;
    let nq = params.codes_count(queries)?;
    let nb = params.codes_count(codes)?;
    if out.len() != nq * nb {
        return Err(HammingError::OutputLength {
            expected: nq * nb,
            actual: out.len(),
        });
    }
    if nb == 0 {
        return Ok(());
    }
    tracing::trace!(code_size = params.code_size, metric = ?params.metric, nq, nb, "distance table");

    let kernels = params.kernels();
    for (query, row) in queries
        .chunks_exact(params.code_size)
        .zip(out.chunks_exact_mut(nb))
    {
        params.visit(
            &kernels,
            query,
            FillDistances {
                codes,
                code_size: params.code_size,
                out: row,
            },
        )?;
    }
    Ok(())
}

/// Number of (query, code) pairs whose distance is at most `threshold`.
pub fn count_within(
    params: &CodeParameters,
    queries: &[u8],
    codes: &[u8],
    threshold: HamDist,
) -> Result<usize, HammingError> {
    params.validate()?;
    let nq = params.codes_count(queries)?;
    let nb = params.codes_count(codes)?;
    tracing::trace!(code_size = params.code_size, metric = ?params.metric, nq, nb, threshold, "count within");

    let kernels = params.kernels();
    let mut count = 0;
    for query in queries.chunks_exact(params.code_size) {
        count += params.visit(
            &kernels,
            query,
            CountWithin {
                codes,
                code_size: params.code_size,
                threshold,
            },
        )?;
    }
    Ok(count)
}
