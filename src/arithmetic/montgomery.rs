//! The textbook Montgomery product on full-width integers.

use log::debug;
use num_bigint::BigUint;

use crate::{MontgomeryMultiplier, MontgomeryParams, Result};

/// Direct-arithmetic Montgomery product.
///
/// Follows the original formulation from
/// [Modular Multiplication Without Trial Division (1985)][montgomery]:
/// with `m = t * n0' mod R`, the sum `t + m*n` is divisible by `R`, so the
/// reduction is a bit shift. The shifted result lies below `2n` and needs
/// at most one subtraction.
///
/// This kernel materializes the double-width product `t = a * b`, which is
/// exactly what the interleaved kernels exist to avoid; it is kept as the
/// oracle their results are checked against.
///
/// [montgomery]: https://api.semanticscholar.org/CorpusID:119574413
pub struct Naive;

impl MontgomeryMultiplier for Naive {
    fn monpro(&self, a: &BigUint, b: &BigUint, params: &MontgomeryParams) -> Result<BigUint> {
        debug_assert!(a < params.n() && b < params.n());
        debug!("naive monpro, k = {}", params.k());

        let t = a * b;
        let m = (&t * params.n0_prime()) % params.r();
        let u = (t + m * params.n()) >> params.k();

        Ok(if &u >= params.n() { u - params.n() } else { u })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    fn lab_params() -> MontgomeryParams {
        let n = BigUint::from_bytes_be(&hex!(
            "99925173AD65686715385EA800CD28120288FC70A9BC98DD4C90D676F8FF768D"
        ));
        MontgomeryParams::derive(n, 16, 16).unwrap()
    }

    #[test]
    fn matches_the_definition() {
        let params = lab_params();

        for &(a, b) in &[(45321u64, 1234u64), (6323, 6324), (0xDEAD, 0xBEEF)] {
            let (a, b) = (BigUint::from(a), BigUint::from(b));
            let got = Naive.monpro(&a, &b, &params).unwrap();
            let expected = (&a * &b * params.r_inv()) % params.n();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn absorbs_r_squared() {
        // monpro(x, R^2 mod n) maps x into the Montgomery domain: x * R mod n.
        let params = lab_params();
        let x = BigUint::from(0x1234_5678u64);
        let x_bar = Naive.monpro(&x, params.r2_mod_n(), &params).unwrap();
        assert_eq!(x_bar, (&x * params.r()) % params.n());
        // monpro(x_bar, 1) maps it back out.
        let back = Naive
            .monpro(&x_bar, &BigUint::from(1u32), &params)
            .unwrap();
        assert_eq!(back, x);
    }
}
