use thiserror::Error;

/// Failure taxonomy of the arithmetic core.
///
/// Every variant is raised at construction or boundary-validation time,
/// before any multiplication step runs. There are no transient failures
/// and nothing is ever retried.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The modulus is even, shares a factor with `R`, or the derived
    /// `n0_prime` fails its defining congruence `(n * n0' + 1) mod R == 0`.
    ///
    /// Raised only by [`MontgomeryParams::derive`](crate::MontgomeryParams::derive).
    #[error("modulus must be odd and coprime to R")]
    InvalidModulus,

    /// The systolic datapath (and its control schedule) exists only for a
    /// fixed set of limb counts.
    #[error("no systolic datapath is implemented for {s} limbs")]
    UnsupportedGeometry { s: usize },

    /// The word width does not fit the machine-word limb representation.
    #[error("word size {w} outside the supported range 1..=63")]
    UnsupportedWordSize { w: u32 },

    /// A caller-side contract breach: an operand outside the configured
    /// geometry, e.g. a message not below the modulus or a value that does
    /// not fit `s` limbs of `w` bits.
    #[error("operand out of range for the configured geometry")]
    RangeViolation,
}

/// [`Error`] or success.
pub type Result<T> = core::result::Result<T, Error>;
