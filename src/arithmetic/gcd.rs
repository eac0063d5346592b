//! Extended Euclidean algorithm and modular inversion.
//!
//! This is the one place the crate computes an inverse the slow way; it
//! runs once per modulus when deriving the precomputed constants, so the
//! $\mathcal{O}(\log^2)$ recursion is irrelevant next to the
//! exponentiation it enables.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Bézout coefficients: `(g, x, y)` with `a*x + b*y == g == gcd(a, b)`.
///
/// Recursive on `(b mod a, a)` with base case `(0, b) -> (b, 0, 1)`.
/// Inputs are expected non-negative; `a == b == 0` must not be presented.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b.clone(), BigInt::zero(), BigInt::one());
    }

    let (g, x1, y1) = extended_gcd(&(b % a), a);

    let x = &y1 - (b / a) * &x1;
    (g, x, x1)
}

/// `a^{-1} mod m`, or `None` when `gcd(a, m) != 1`.
///
/// The Bézout coefficient of `a` may come back negative; it is folded
/// into the canonical residue class `0..m` before returning.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let m_signed = BigInt::from(m.clone());
    let (g, x, _) = extended_gcd(&BigInt::from(a.clone()), &m_signed);
    if !g.is_one() {
        return None;
    }

    Some(x.mod_floor(&m_signed).magnitude().clone())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bezout_identity() {
        for &(a, b) in &[(240u32, 46u32), (17, 3120), (65537, 3120), (1, 7), (0, 5)] {
            let (a, b) = (BigInt::from(a), BigInt::from(b));
            let (g, x, y) = extended_gcd(&a, &b);
            assert_eq!(&a * &x + &b * &y, g);
        }
    }

    #[test]
    fn inverse_of_small_exponents() {
        // The 143 = 11 * 13 toy key: e = 7, d = 103, phi = 120.
        let d = mod_inverse(&BigUint::from(7u32), &BigUint::from(120u32)).unwrap();
        assert_eq!(d, BigUint::from(103u32));

        let inv = mod_inverse(&BigUint::from(3u32), &BigUint::from(7u32)).unwrap();
        assert_eq!(inv, BigUint::from(5u32));
    }

    #[test]
    fn negative_coefficient_is_normalized() {
        // gcd(3, 10): x = -3, which must come back as 7.
        let inv = mod_inverse(&BigUint::from(3u32), &BigUint::from(10u32)).unwrap();
        assert_eq!(inv, BigUint::from(7u32));
        assert!((inv * 3u32) % 10u32 == BigUint::one());
    }

    #[test]
    fn shared_factor_has_no_inverse() {
        assert!(mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32)).is_none());
    }
}
