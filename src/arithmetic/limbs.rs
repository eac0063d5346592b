//! Conversion between big integers and fixed-width limb vectors, plus the
//! carry-save primitive every kernel is built from.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::limb::{word_mask, DoubleLimb};
use crate::{Error, Limb, Result};

/// Split of `acc + x * y + carry` at the `w`-bit word boundary.
///
/// Returns `(carry, sum)` with `sum < 2^w`. This is the single arithmetic
/// step a datapath cell performs; all three kernels express themselves in
/// terms of it.
pub fn carry_sum(acc: Limb, x: Limb, y: Limb, carry: Limb, w: u32) -> (Limb, Limb) {
    let t = acc as DoubleLimb + x as DoubleLimb * y as DoubleLimb + carry as DoubleLimb;

    ((t >> w) as Limb, t as Limb & word_mask(w))
}

/// Split `x` into exactly `s` limbs of `w` bits, least-significant first.
///
/// Values that do not fit `s * w` bits are rejected rather than silently
/// truncated.
pub fn to_limbs(x: &BigUint, s: usize, w: u32) -> Result<Vec<Limb>> {
    if x.bits() > s as u64 * w as u64 {
        return Err(Error::RangeViolation);
    }

    let words = x.to_u64_digits();
    let mask = word_mask(w);

    let mut limbs = vec![0 as Limb; s];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let bit = i as u64 * w as u64;
        let word = (bit / 64) as usize;
        let shift = (bit % 64) as u32;

        let mut v = words.get(word).map_or(0, |&lo| lo >> shift);
        if shift != 0 {
            if let Some(&hi) = words.get(word + 1) {
                v |= hi << (64 - shift);
            }
        }
        *limb = v & mask;
    }

    Ok(limbs)
}

/// Reassemble a little-endian limb vector into an integer:
/// `acc = acc << w | limb`, folded from the most-significant limb down.
pub fn from_limbs(limbs: &[Limb], w: u32) -> BigUint {
    let mut acc = BigUint::zero();
    for &limb in limbs.iter().rev() {
        acc = (acc << w) | BigUint::from(limb);
    }
    acc
}
