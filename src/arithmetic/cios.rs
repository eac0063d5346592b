//! Coarsely Integrated Operand Scanning.

use log::debug;
use num_bigint::BigUint;

use crate::arithmetic::limbs::{carry_sum, from_limbs, to_limbs};
use crate::{MontgomeryMultiplier, MontgomeryParams, Result};

/// Limb-interleaved Montgomery product.
///
/// CIOS from [Analyzing and Comparing Montgomery Multiplication Algorithms
/// (1996)][koc-acar-kaliski]: each outer round accumulates one row of
/// partial products `a[i] * b[j]` into the running total `T` (length
/// `s + 2`), then folds in `m * n[j]` with the single-limb multiplier
/// `m = T[0] * n0' mod 2^w`, shifting `T` down one limb as it goes. The
/// low limb of `T` is zero by construction of `m`, so the shift is the
/// per-round division by `2^w` and the full product never exists in
/// memory.
///
/// After `s` rounds the total is below `2n`, so a single conditional
/// subtraction canonicalizes it.
///
/// [koc-acar-kaliski]: https://api.semanticscholar.org/CorpusID:2078015
pub struct Cios;

impl MontgomeryMultiplier for Cios {
    fn monpro(&self, a: &BigUint, b: &BigUint, params: &MontgomeryParams) -> Result<BigUint> {
        debug_assert!(a < params.n() && b < params.n());

        let w = params.w();
        let s = params.s();
        let n = params.n_limbs();
        let n0 = params.n0();
        let a = to_limbs(a, s, w)?;
        let b = to_limbs(b, s, w)?;
        debug!("cios monpro, w = {}, s = {}", w, s);

        let mut t = vec![0; s + 2];
        for i in 0..s {
            // Multiplication pass: T += a[i] * b.
            let mut c = 0;
            for j in 0..s {
                let (carry, sum) = carry_sum(t[j], a[i], b[j], c, w);
                t[j] = sum;
                c = carry;
            }
            let (carry, sum) = carry_sum(t[s], 0, 0, c, w);
            t[s] = sum;
            t[s + 1] = carry;

            // Reduction pass: T = (T + m * n) >> w.
            let (_, m) = carry_sum(0, t[0], n0, 0, w);
            let (mut c, _) = carry_sum(t[0], m, n[0], 0, w);
            for j in 1..s {
                let (carry, sum) = carry_sum(t[j], m, n[j], c, w);
                t[j - 1] = sum;
                c = carry;
            }
            let (carry, sum) = carry_sum(t[s], 0, 0, c, w);
            t[s - 1] = sum;
            t[s] = t[s + 1] + carry;
        }

        let u = from_limbs(&t[..=s], w);
        Ok(if &u >= params.n() { u - params.n() } else { u })
    }
}
