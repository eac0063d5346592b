//! Precomputed Montgomery constants for one modulus and word geometry.

use log::debug;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::arithmetic::gcd::extended_gcd;
use crate::arithmetic::limbs::to_limbs;
use crate::limb::MAX_WORD_SIZE;
use crate::{Error, Limb, Result};

/// The constants every Montgomery kernel needs, derived once per
/// `(modulus, word size, limb count)` and reused for every multiplication.
///
/// The struct is immutable after [`derive`](Self::derive); it can be shared
/// read-only across any number of concurrent exponentiations over the same
/// modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MontgomeryParams {
    n: BigUint,
    w: u32,
    s: usize,
    r: BigUint,
    n0_prime: BigUint,
    r2_mod_n: BigUint,
    r_inv: BigUint,
    n_limbs: Vec<Limb>,
    n0: Limb,
}

impl MontgomeryParams {
    /// Derive the Montgomery constants for modulus `n` split into `s` limbs
    /// of `w` bits, with $R = 2^{ws}$.
    ///
    /// Runs the extended Euclidean algorithm on `(n, R)`; the Bézout
    /// coefficient `x` of `n` gives `n0' = R - x = -n^{-1} mod R`, and the
    /// coefficient of `R` gives `R^{-1} mod n`. The defining congruence
    /// `(n * n0' + 1) mod R == 0` is re-verified before the parameters are
    /// handed out.
    pub fn derive(n: BigUint, w: u32, s: usize) -> Result<Self> {
        if w == 0 || w > MAX_WORD_SIZE {
            return Err(Error::UnsupportedWordSize { w });
        }
        if s == 0 || n.bits() > s as u64 * w as u64 {
            return Err(Error::RangeViolation);
        }
        if n.is_zero() || n.is_even() {
            return Err(Error::InvalidModulus);
        }

        let k = w as u64 * s as u64;
        let r = BigUint::one() << k;
        let r_signed = BigInt::from(r.clone());
        let n_signed = BigInt::from(n.clone());

        let (g, x, y) = extended_gcd(&n_signed, &r_signed);
        if !g.is_one() {
            return Err(Error::InvalidModulus);
        }

        // n*x + R*y = 1. Both coefficients may be negative; fold them into
        // their canonical residue classes before use.
        let x = x.mod_floor(&r_signed).magnitude().clone();
        let n0_prime = (&r - x) % &r;
        let r_inv = y.mod_floor(&n_signed).magnitude().clone();

        if ((&n * &n0_prime) + 1u32) % &r != BigUint::zero() {
            return Err(Error::InvalidModulus);
        }

        let r2_mod_n = (&r * &r) % &n;

        debug!("n0' = {:x}", n0_prime);
        debug!("r2 mod n = {:x}", r2_mod_n);
        debug!("r^-1 mod n = {:x}", r_inv);

        let n_limbs = to_limbs(&n, s, w)?;
        let n0 = to_limbs(&n0_prime, s, w)?[0];

        Ok(Self { n, w, s, r, n0_prime, r2_mod_n, r_inv, n_limbs, n0 })
    }

    /// The odd modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Word width in bits.
    pub fn w(&self) -> u32 {
        self.w
    }

    /// Limb count.
    pub fn s(&self) -> usize {
        self.s
    }

    /// Total bit width `k = w * s` of the geometry.
    pub fn k(&self) -> u64 {
        self.w as u64 * self.s as u64
    }

    /// `R = 2^k`.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// `-n^{-1} mod R`, full width.
    pub fn n0_prime(&self) -> &BigUint {
        &self.n0_prime
    }

    /// Low limb of [`n0_prime`](Self::n0_prime), the single-word reduction
    /// constant the interleaved kernels use.
    pub fn n0(&self) -> Limb {
        self.n0
    }

    /// `R^2 mod n`, the Montgomery-domain unit used to map integers in.
    pub fn r2_mod_n(&self) -> &BigUint {
        &self.r2_mod_n
    }

    /// `R^{-1} mod n`. Not needed by the kernels themselves; kept so the
    /// Montgomery product can be verified against its definition.
    pub fn r_inv(&self) -> &BigUint {
        &self.r_inv
    }

    /// The modulus as a limb vector of this geometry.
    pub fn n_limbs(&self) -> &[Limb] {
        &self.n_limbs
    }
}
