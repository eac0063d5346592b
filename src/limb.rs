/// One word of a limb vector. Multi-precision values move through the
/// kernels as little-endian sequences of limbs.
///
/// The word width `w` of a geometry is a runtime value; a limb always
/// occupies a `u64` with the upper `64 - w` bits clear.
pub type Limb = u64;

/// Unsigned type with twice as many bits as [`Limb`].
///
/// `carry_sum` accumulates `acc + x * y + carry` here before splitting it
/// at the word boundary; with `w <= MAX_WORD_SIZE` this cannot overflow.
pub(crate) type DoubleLimb = u128;

/// Largest supported word width in bits.
///
/// A `w`-bit partial product plus two `w`-bit addends must fit a
/// [`DoubleLimb`], and a reduction carry must fit a [`Limb`], which caps
/// `w` one bit below the machine word.
pub const MAX_WORD_SIZE: u32 = 63;

/// Bitmask selecting the low `w` bits of a limb.
pub(crate) fn word_mask(w: u32) -> Limb {
    (((1 as DoubleLimb) << w) - 1) as Limb
}
