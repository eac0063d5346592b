//! Cycle-accurate model of the systolic CIOS datapath.
//!
//! The hardware computes one CIOS outer round per pipeline pass. Three
//! cell families cooperate:
//!
//! * **alpha** cells accumulate the partial products `a[i] * b[j]` on top
//!   of the retired total from the previous round, one column per clock,
//!   chaining their carry;
//! * the single **beta** cell watches the first alpha output and derives
//!   the round's reduction multiplier `m = T[0] * n0' mod 2^w` (its sum
//!   output is zero by construction, only the carry survives);
//! * **gamma** cells fold `m * n[j]` into the alpha outputs one clock
//!   behind the alpha wavefront, writing the retired total shifted down
//!   one limb, which realizes the per-round division by `2^w`.
//!
//! A round occupies `s + 2` clock columns; `s` rounds complete one
//! Montgomery product. All cells within a clock act simultaneously: the
//! model reads only registers committed at the previous clock edge and
//! commits its own writes at the end of the cycle, so evaluation order
//! within a cycle cannot matter.
//!
//! This kernel is not here for software speed. It is the bit-for-bit
//! reference the control-word schedule in [`crate::schedule`] must
//! replay; any divergence from [`Cios`](crate::Cios) is a modeling bug.

use log::trace;
use num_bigint::BigUint;

use crate::arithmetic::limbs::{carry_sum, from_limbs, to_limbs};
use crate::{Error, Limb, MontgomeryMultiplier, MontgomeryParams, Result};

/// Limb counts the datapath (and its control schedule) is implemented for.
pub const SUPPORTED_LIMB_COUNTS: [usize; 2] = [8, 16];

/// Alpha cell: one partial-product accumulation step.
fn alpha(a: Limb, b: Limb, c_in: Limb, s_in: Limb, w: u32) -> (Limb, Limb) {
    carry_sum(s_in, a, b, c_in, w)
}

/// Beta cell: derives the reduction multiplier `m` from the low limb of
/// the running total and absorbs the zero limb `T[0] + m * n[0]`, keeping
/// only the carry.
fn beta(s_in: Limb, n_0: Limb, n0_prime_0: Limb, w: u32) -> (Limb, Limb) {
    let (_, m) = carry_sum(0, s_in, n0_prime_0, 0, w);
    let (c, _) = carry_sum(s_in, n_0, m, 0, w);

    (c, m)
}

/// Gamma cell: folds `m * n[j]` into an alpha output.
fn gamma(n_j: Limb, m: Limb, c_in: Limb, s_in: Limb, w: u32) -> (Limb, Limb) {
    carry_sum(s_in, n_j, m, c_in, w)
}

/// Final alpha cell: drains the multiplication-pass carry into the two
/// top limbs of the row.
fn alpha_final(c_in: Limb, s_in: Limb, w: u32) -> (Limb, Limb) {
    carry_sum(s_in, 0, 0, c_in, w)
}

/// Final gamma cell: drains the reduction-pass carry into the two top
/// limbs of the retired total.
fn gamma_final(c_in: Limb, s1_in: Limb, s2_in: Limb, w: u32) -> (Limb, Limb) {
    let (s2, s1) = carry_sum(s1_in, 0, 0, c_in, w);

    (s1, s2 + s2_in)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Registers {
    alpha_carry: Limb,
    alpha_sum: Vec<Limb>,
    beta_carry: Limb,
    m: Limb,
    gamma_carry: Limb,
    retired: Vec<Limb>,
}

impl Registers {
    fn new(s: usize) -> Self {
        Self {
            alpha_sum: vec![0; s + 2],
            retired: vec![0; s + 1],
            ..Self::default()
        }
    }
}

/// Double-buffered register file of the datapath.
///
/// [`step`](Self::step) reads the state committed at the previous clock
/// edge and writes a staging copy; [`commit`](Self::commit) flips the
/// staging copy in at the cycle boundary. In-place mutation would make
/// the result depend on the order cells are evaluated in within a cycle.
#[derive(Clone, Debug)]
pub struct PipelineState {
    committed: Registers,
    staging: Registers,
}

impl PipelineState {
    pub fn new(s: usize) -> Self {
        Self {
            committed: Registers::new(s),
            staging: Registers::new(s),
        }
    }

    /// Clear the carry and sum registers for a fresh outer round. The
    /// retired row is left alone; it is the next round's running total.
    pub fn reset_row(&mut self) {
        for regs in [&mut self.committed, &mut self.staging] {
            regs.alpha_carry = 0;
            regs.beta_carry = 0;
            regs.m = 0;
            regs.gamma_carry = 0;
            for limb in regs.alpha_sum.iter_mut() {
                *limb = 0;
            }
        }
    }

    /// Advance every active cell by one clock column.
    ///
    /// `t` is the column index within the round (`0..s + 2`), `a_i` the
    /// round's `a` limb, `row_in` the previous round's retired total
    /// (`s + 1` limbs).
    pub fn step(
        &mut self,
        t: usize,
        a_i: Limb,
        b: &[Limb],
        n: &[Limb],
        n0_prime_0: Limb,
        row_in: &[Limb],
        w: u32,
    ) {
        let s = b.len();
        let prev = &self.committed;
        self.staging.clone_from(prev);
        let next = &mut self.staging;

        // Alpha wavefront: column t of the multiplication pass.
        if t < s {
            let (c, sum) = alpha(a_i, b[t], prev.alpha_carry, row_in[t], w);
            next.alpha_carry = c;
            next.alpha_sum[t] = sum;
        } else if t == s {
            let (c, sum) = alpha_final(prev.alpha_carry, row_in[s], w);
            next.alpha_sum[s] = sum;
            next.alpha_sum[s + 1] = c;
        }

        // Beta fires once, one clock behind the first alpha column.
        if t == 1 {
            let (c, m) = beta(prev.alpha_sum[0], n[0], n0_prime_0, w);
            next.beta_carry = c;
            next.m = m;
        }

        // Gamma wavefront: column t - 1 of the reduction pass, retiring
        // each limb one position down.
        if (2..=s).contains(&t) {
            let j = t - 1;
            let c_in = if t == 2 { prev.beta_carry } else { prev.gamma_carry };
            let (c, sum) = gamma(n[j], prev.m, c_in, prev.alpha_sum[j], w);
            next.gamma_carry = c;
            next.retired[j - 1] = sum;
        } else if t == s + 1 {
            let (s1, s2) = gamma_final(
                prev.gamma_carry,
                prev.alpha_sum[s],
                prev.alpha_sum[s + 1],
                w,
            );
            next.retired[s - 1] = s1;
            next.retired[s] = s2;
        }
    }

    /// Clock edge: make the staged writes visible.
    pub fn commit(&mut self) {
        core::mem::swap(&mut self.committed, &mut self.staging);
    }

    /// The retired running total, valid after the last column of a round
    /// has committed.
    pub fn retired(&self) -> &[Limb] {
        &self.committed.retired
    }
}

/// Cycle-by-cycle systolic realization of [`Cios`](crate::Cios).
pub struct SystolicCios;

impl MontgomeryMultiplier for SystolicCios {
    fn monpro(&self, a: &BigUint, b: &BigUint, params: &MontgomeryParams) -> Result<BigUint> {
        debug_assert!(a < params.n() && b < params.n());

        let w = params.w();
        let s = params.s();
        if !SUPPORTED_LIMB_COUNTS.contains(&s) {
            return Err(Error::UnsupportedGeometry { s });
        }

        let a = to_limbs(a, s, w)?;
        let b = to_limbs(b, s, w)?;
        let n = params.n_limbs();
        let n0_prime_0 = params.n0();

        let mut pipe = PipelineState::new(s);
        let mut row_in = vec![0; s + 1];

        for i in 0..s {
            pipe.reset_row();
            for t in 0..s + 2 {
                pipe.step(t, a[i], &b, n, n0_prime_0, &row_in, w);
                pipe.commit();
            }
            row_in.clone_from_slice(pipe.retired());
            trace!("row {:2}: retired = {:x?}", i, row_in);
        }

        let u = from_limbs(&row_in, w);
        Ok(if &u >= params.n() { u - params.n() } else { u })
    }
}
