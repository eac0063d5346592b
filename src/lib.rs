//! RSA modular exponentiation via Montgomery multiplication, built up in
//! three stages: a schoolbook big-integer kernel, the limb-interleaved
//! CIOS algorithm, and a cycle-accurate simulation of a systolic-array
//! datapath, together with the static control-word schedule that datapath
//! replays in hardware.
//!
//! The crate performs no I/O and holds no global state: all precomputed
//! constants live in an explicit [`MontgomeryParams`] value that is
//! immutable after derivation and freely shareable between callers.

mod arithmetic;
pub use arithmetic::{
    Cios, MontgomeryMultiplier, Naive, PipelineState, SystolicCios, SUPPORTED_LIMB_COUNTS,
};
pub use arithmetic::gcd::{extended_gcd, mod_inverse};
pub use arithmetic::limbs::{carry_sum, from_limbs, to_limbs};
mod error;
pub use error::{Error, Result};
mod limb;
pub use limb::{Limb, MAX_WORD_SIZE};
mod modexp;
pub use modexp::modexp;
mod params;
pub use params::MontgomeryParams;
mod schedule;
pub use schedule::{Instruction, InstructionWord, Schedule};

/// The customary RSA public exponent `65537`, used throughout the tests.
///
/// An example recommendation is RFC 4871:
/// https://www.ietf.org/rfc/rfc4871.txt
pub const E: u32 = 0x10001;
