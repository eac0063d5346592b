//! Static control-word schedule for the systolic datapath.
//!
//! The hardware control unit does not compute anything per se: it replays
//! a fixed sequence of mux selections, one instruction word per clock
//! cycle, that routes operands between the alpha, beta and gamma cells of
//! [`crate::arithmetic`]'s systolic model. That sequence depends only on
//! the `(w, s)` topology, never on the numeric inputs, so it is generated
//! once here and burned into a read-only control table.
//!
//! A cycle's role follows from its phase within the `s + 2`-column row
//! period: phase 0 shifts in the next `a` limb and starts the alpha
//! wavefront, phase 1 fires the beta cell, phases 2 through `s` drive the
//! gamma wavefront (the first of them taking its carry from beta), and
//! the last two phases drain the alpha and gamma carries into the top
//! limbs of the retired row.

use crate::arithmetic::SUPPORTED_LIMB_COUNTS;
use crate::limb::MAX_WORD_SIZE;
use crate::{Error, Result};
use core::fmt;

/// Source selection for the `a`-operand shift register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ASel {
    Hold = 0,
    NextLimb = 1,
}

/// Sum-input source of a regular alpha cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AlphaSum {
    Zero = 0,
    Row = 1,
    Hold = 2,
}

/// Carry-input source of a regular alpha cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AlphaCarry {
    Chain = 0,
    Zero = 1,
}

/// Carry-input source of a regular gamma cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GammaCarry {
    Chain = 0,
    Beta = 1,
}

/// One mux selector field, rendered as a fixed-width group of bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    value: u8,
    width: u32,
}

impl Instruction {
    fn new(value: u8, width: u32) -> Self {
        debug_assert!(u32::from(value) < (1 << width));
        Self { value, width }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width as usize)
    }
}

/// All selector fields of one clock cycle, concatenated most-significant
/// field first: `a` selector, then the gamma column (drain cell first),
/// the beta enable, and the alpha column (drain cell first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionWord {
    fields: Vec<Instruction>,
}

impl InstructionWord {
    /// Fixed-width bit-string encoding, `0`/`1` characters only.
    pub fn encode(&self) -> String {
        self.fields.iter().map(Instruction::to_string).collect()
    }
}

impl fmt::Display for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// The complete control table for one Montgomery product on a given
/// topology: `s * (s + 2)` instruction words of `5s + 3` bits each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    w: u32,
    s: usize,
    words: Vec<InstructionWord>,
}

impl Schedule {
    /// Enumerate every cycle of every outer row for the `(w, s)` topology.
    ///
    /// Purely combinatorial over the cycle index; two invocations with the
    /// same geometry produce byte-identical tables.
    pub fn generate(w: u32, s: usize) -> Result<Self> {
        if w == 0 || w > MAX_WORD_SIZE {
            return Err(Error::UnsupportedWordSize { w });
        }
        if !SUPPORTED_LIMB_COUNTS.contains(&s) {
            return Err(Error::UnsupportedGeometry { s });
        }

        let period = s + 2;
        let words = (0..s * period)
            .map(|cycle| {
                let phase = cycle % period;
                let row = cycle / period;
                Self::word(phase, row, s)
            })
            .collect();

        Ok(Self { w, s, words })
    }

    fn word(phase: usize, row: usize, s: usize) -> InstructionWord {
        let mut fields = Vec::with_capacity(2 * s + 3);

        let a_sel = if phase == 0 { ASel::NextLimb } else { ASel::Hold };
        fields.push(Instruction::new(a_sel as u8, 2));

        // Gamma drain cell, then the regular gamma cells high to low.
        fields.push(Instruction::new((phase == s + 1) as u8, 1));
        for j in (1..s).rev() {
            let active = phase == j + 1;
            fields.push(Instruction::new(active as u8, 1));
            let carry = if active && j == 1 {
                GammaCarry::Beta
            } else {
                GammaCarry::Chain
            };
            fields.push(Instruction::new(carry as u8, 1));
        }

        fields.push(Instruction::new((phase == 1) as u8, 1));

        // Alpha drain cell, then the regular alpha cells high to low.
        fields.push(Instruction::new((phase == s) as u8, 1));
        for j in (0..s).rev() {
            let sum = if phase != j {
                AlphaSum::Hold
            } else if row == 0 {
                // The first row accumulates onto nothing; later rows read
                // the retired total back in.
                AlphaSum::Zero
            } else {
                AlphaSum::Row
            };
            fields.push(Instruction::new(sum as u8, 2));
            let carry = if phase == j && j == 0 {
                AlphaCarry::Zero
            } else {
                AlphaCarry::Chain
            };
            fields.push(Instruction::new(carry as u8, 1));
        }

        InstructionWord { fields }
    }

    /// Clock cycles in one full Montgomery product.
    pub fn cycles(&self) -> usize {
        self.words.len()
    }

    /// Bits per instruction word.
    pub fn word_width(&self) -> usize {
        2 + 1 + 2 * (self.s - 1) + 1 + 1 + 3 * self.s
    }

    /// Word width of the datapath this table drives.
    pub fn word_size(&self) -> u32 {
        self.w
    }

    /// Limb count of the datapath this table drives.
    pub fn limb_count(&self) -> usize {
        self.s
    }

    /// The instruction words in cycle order.
    pub fn words(&self) -> &[InstructionWord] {
        &self.words
    }

    /// Render the table as a VHDL package holding a read-only constant,
    /// ready to be compiled into the control unit.
    pub fn vhdl_package(&self, name: &str) -> String {
        let mut out = format!(
            "-- This file has been generated, please do not modify it directly.\n\
             \n\
             library ieee;\n\
             use ieee.std_logic_1164.all;\n\
             use ieee.numeric_std.all;\n\
             \n\
             package {name} is\n\
             \n\
             \x20   constant C_NUMBER_OF_INSTRUCTIONS : integer := {count};\n\
             \x20   constant C_INSTRUCTION_LENGTH : integer := {length};\n\
             \n\
             \x20   type T_INSTRUCTION_SET is array(0 to C_NUMBER_OF_INSTRUCTIONS - 1) \
             of std_logic_vector(C_INSTRUCTION_LENGTH - 1 downto 0);\n\
             \n\
             \x20   constant C_INSTRUCTION_SET : T_INSTRUCTION_SET := (\n",
            name = name,
            count = self.cycles(),
            length = self.word_width(),
        );

        for (i, word) in self.words.iter().enumerate() {
            let terminator = if i + 1 == self.words.len() { "\n" } else { ",\n" };
            out.push_str(&format!("        b\"{}\"{}", word, terminator));
        }

        out.push_str(&format!(
            "    );\n\
             \n\
             end package {name};\n\
             \n\
             package body {name} is\n\
             end package body {name};\n",
            name = name,
        ));

        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deterministic_and_sized() {
        for &s in SUPPORTED_LIMB_COUNTS.iter() {
            let first = Schedule::generate(16, s).unwrap();
            let second = Schedule::generate(16, s).unwrap();
            assert_eq!(first, second);

            assert_eq!(first.cycles(), s * (s + 2));
            assert_eq!(first.word_width(), 5 * s + 3);
            for word in first.words() {
                let encoded = word.encode();
                assert_eq!(encoded.len(), first.word_width());
                assert!(encoded.chars().all(|c| c == '0' || c == '1'));
            }
        }
    }

    #[test]
    fn rejects_unknown_topologies() {
        assert_eq!(
            Schedule::generate(16, 4).unwrap_err(),
            Error::UnsupportedGeometry { s: 4 }
        );
        assert_eq!(
            Schedule::generate(0, 8).unwrap_err(),
            Error::UnsupportedWordSize { w: 0 }
        );
    }

    #[test]
    fn phase_zero_loads_the_next_a_limb() {
        let schedule = Schedule::generate(16, 8).unwrap();
        let period = 8 + 2;
        for (cycle, word) in schedule.words().iter().enumerate() {
            let a_bits = &word.encode()[..2];
            if cycle % period == 0 {
                assert_eq!(a_bits, "01");
            } else {
                assert_eq!(a_bits, "00");
            }
        }
    }

    #[test]
    fn beta_fires_once_per_row() {
        let schedule = Schedule::generate(16, 8).unwrap();
        let s = 8;
        // Beta enable sits right after the a field and the gamma column.
        let beta_index = 2 + 1 + 2 * (s - 1);
        let fired: usize = schedule
            .words()
            .iter()
            .filter(|word| word.encode().as_bytes()[beta_index] == b'1')
            .count();
        assert_eq!(fired, s);
    }

    #[test]
    fn vhdl_rendering() {
        let schedule = Schedule::generate(16, 8).unwrap();
        let vhdl = schedule.vhdl_package("instruction_pkg");

        assert!(vhdl.contains("package instruction_pkg is"));
        assert!(vhdl.contains("constant C_NUMBER_OF_INSTRUCTIONS : integer := 80;"));
        assert!(vhdl.contains("constant C_INSTRUCTION_LENGTH : integer := 43;"));
        assert!(vhdl.contains("end package body instruction_pkg;"));
        assert_eq!(vhdl.matches("b\"").count(), schedule.cycles());
    }
}
