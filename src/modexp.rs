//! Binary square-and-multiply exponentiation over a Montgomery kernel.

use log::debug;
use num_bigint::BigUint;
use num_traits::One;

use crate::{Error, MontgomeryMultiplier, MontgomeryParams, Result};

/// `m^e mod n` with every multiplication going through `kernel`.
///
/// The message is mapped into the Montgomery domain with one product
/// against `R^2 mod n`, the accumulator starts at the domain's one
/// (`monpro(1, R^2)` = `R mod n`), and the exponent is scanned
/// most-significant bit first over the full fixed width `k = w * s`.
/// Every bit costs a squaring; a set bit costs one more product, so the
/// ladder always runs `k` to `2k` multiplications. No claim of
/// constant time is made beyond that fixed step count.
///
/// `m` must be below the modulus and `e` must fit `k` bits; both are
/// checked at this boundary rather than left undefined.
pub fn modexp<K>(
    m: &BigUint,
    e: &BigUint,
    params: &MontgomeryParams,
    kernel: &K,
) -> Result<BigUint>
where
    K: MontgomeryMultiplier + ?Sized,
{
    if m >= params.n() {
        return Err(Error::RangeViolation);
    }
    let k = params.k();
    if e.bits() > k {
        return Err(Error::RangeViolation);
    }
    debug!("modexp: {} exponent bits, k = {}", e.bits(), k);

    let m_bar = kernel.monpro(m, params.r2_mod_n(), params)?;
    let mut c_bar = kernel.monpro(&BigUint::one(), params.r2_mod_n(), params)?;

    for i in (0..k).rev() {
        c_bar = kernel.monpro(&c_bar, &c_bar, params)?;
        if e.bit(i) {
            c_bar = kernel.monpro(&m_bar, &c_bar, params)?;
        }
    }

    kernel.monpro(&c_bar, &BigUint::one(), params)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arithmetic::{Cios, Naive, SystolicCios};
    use hex_literal::hex;

    fn lab_params() -> MontgomeryParams {
        let n = BigUint::from_bytes_be(&hex!(
            "99925173AD65686715385EA800CD28120288FC70A9BC98DD4C90D676F8FF768D"
        ));
        MontgomeryParams::derive(n, 16, 16).unwrap()
    }

    fn lab_message() -> BigUint {
        BigUint::from_bytes_be(&hex!(
            "0000000011111111222222223333333344444444555555556666666677777777"
        ))
    }

    fn lab_ciphertext() -> BigUint {
        BigUint::from_bytes_be(&hex!(
            "23026C469918F5EA097F843DC5D5259192F9D3510415841CE834324F4C237AC7"
        ))
    }

    fn lab_d() -> BigUint {
        BigUint::from_bytes_be(&hex!(
            "0CEA1651EF44BE1F1F1476B7539BED10D73E3AAC782BD9999A1E5A790932BFE9"
        ))
    }

    #[test]
    fn known_answer_all_kernels() {
        let params = lab_params();
        let m = lab_message();
        let e = BigUint::from(crate::E);

        let kernels: [&dyn MontgomeryMultiplier; 3] = [&Naive, &Cios, &SystolicCios];
        for kernel in kernels {
            let c = modexp(&m, &e, &params, kernel).unwrap();
            assert_eq!(c, lab_ciphertext());
        }
    }

    #[test]
    fn decryption_inverts_encryption() {
        let params = lab_params();
        let recovered = modexp(&lab_ciphertext(), &lab_d(), &params, &Cios).unwrap();
        assert_eq!(recovered, lab_message());
    }

    #[test]
    fn toy_key_round_trip() {
        // n = 143 = 11 * 13, e = 7, d = 103, from the early prototype.
        let params = MontgomeryParams::derive(BigUint::from(143u32), 16, 1).unwrap();
        let m = BigUint::from(130u32);

        let c = modexp(&m, &BigUint::from(7u32), &params, &Naive).unwrap();
        assert_eq!(c, BigUint::from(130u64.pow(7) % 143));
        let back = modexp(&c, &BigUint::from(103u32), &params, &Naive).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn fixed_points() {
        let params = lab_params();
        let e = BigUint::from(crate::E);

        let zero = BigUint::from(0u32);
        let one = BigUint::from(1u32);
        for kernel in [&Cios as &dyn MontgomeryMultiplier, &SystolicCios] {
            assert_eq!(modexp(&zero, &e, &params, kernel).unwrap(), zero);
            assert_eq!(modexp(&one, &e, &params, kernel).unwrap(), one);
        }
    }

    #[test]
    fn out_of_range_message_is_rejected() {
        let params = lab_params();
        let m = params.n() + 1u32;
        assert_eq!(
            modexp(&m, &BigUint::from(crate::E), &params, &Naive),
            Err(Error::RangeViolation)
        );
    }

    #[test]
    fn oversized_exponent_is_rejected() {
        let params = lab_params();
        let e = BigUint::from(1u32) << 257u32;
        assert_eq!(
            modexp(&lab_message(), &e, &params, &Naive),
            Err(Error::RangeViolation)
        );
    }
}
