//! Montgomery multiplication kernels.
//!
//! Three interchangeable implementations of the Montgomery product
//! $a \cdot b \cdot R^{-1} \text{ mod } n$ sit behind the
//! [`MontgomeryMultiplier`] trait:
//!
//! * [`Naive`] works on full-width integers and serves as the correctness
//!   oracle for the other two;
//! * [`Cios`] interleaves one limb of the reduction with the
//!   multiplication so no double-width intermediate is ever materialized;
//! * [`SystolicCios`] computes the same schedule cell by cell and clock by
//!   clock, as the hardware datapath would.
//!
//! The numeric result is identical across kernels for identical inputs;
//! they differ only in how the accumulation is interleaved and what
//! intermediate state is observable.

use num_bigint::BigUint;

use crate::{MontgomeryParams, Result};

pub mod gcd;
pub mod limbs;
mod montgomery;
mod cios;
mod systolic;

pub use cios::Cios;
pub use montgomery::Naive;
pub use systolic::{PipelineState, SystolicCios, SUPPORTED_LIMB_COUNTS};

/// One Montgomery product step: `a * b * R^{-1} mod n`.
///
/// Implementations require `a, b < n` (so the single final correction of
/// the interleaved kernels suffices) and return a value `< n`.
pub trait MontgomeryMultiplier {
    fn monpro(&self, a: &BigUint, b: &BigUint, params: &MontgomeryParams) -> Result<BigUint>;
}
