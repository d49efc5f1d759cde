//! The sixteen panel opcodes.
//!
//! The four opcode switches select one of sixteen operations.  The
//! encodings and mnemonics follow the ARM data-processing
//! instructions the board was modelled on, which is why subtraction
//! has a reversed twin and why multiply-accumulate and CLZ are in
//! the table at all.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::panel::SwitchState;

/// One of the sixteen operations the opcode switches can select.
///
/// Every four-bit encoding is assigned, so decoding the switch field
/// cannot fail and there is no undefined-opcode case.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize)]
pub enum Opcode {
    /// Solution = op1 + op2.
    Add,
    /// Solution = op1 - op2.
    Sub,
    /// Solution = op2 - op1.
    Rsb,
    /// Solution = op1 * op2.
    Mul,
    /// Solution = op1 * op2 + store.
    Mla,
    /// Solution = 1 if op1 == op2, else 0.
    Teq,
    /// Solution = op1 << op2.
    Lsl,
    /// Solution = op1 >> op2.
    Lsr,
    /// Solution = op1 & op2.
    And,
    /// Solution = op1 | op2.
    Orr,
    /// Solution = op1 ^ op2.
    Eor,
    /// Solution = op1 & !op2 (bit clear).
    Bic,
    /// Solution = !op1; op2 is unused.
    Mvn,
    /// Solution = the number of leading zero bits in op1; both
    /// operands otherwise unused.
    Clz,
    /// Store = solution; the solution register is left untouched.
    Str,
    /// Solution = store.
    Ldr,
}

impl Opcode {
    /// Decodes the opcode field of the switch bank.
    #[must_use]
    pub fn from_switches(switches: SwitchState) -> Opcode {
        Opcode::from_code(switches.opcode_field())
    }

    /// Decodes a four-bit opcode value.  Bits above the field are
    /// masked off, as they would be by the switch wiring.
    #[must_use]
    pub fn from_code(code: u8) -> Opcode {
        match code & 0b1111 {
            0b0000 => Opcode::Add,
            0b0001 => Opcode::Sub,
            0b0010 => Opcode::Rsb,
            0b0011 => Opcode::Mul,
            0b0100 => Opcode::Mla,
            0b0101 => Opcode::Teq,
            0b0110 => Opcode::Lsl,
            0b0111 => Opcode::Lsr,
            0b1000 => Opcode::And,
            0b1001 => Opcode::Orr,
            0b1010 => Opcode::Eor,
            0b1011 => Opcode::Bic,
            0b1100 => Opcode::Mvn,
            0b1101 => Opcode::Clz,
            0b1110 => Opcode::Str,
            0b1111 => Opcode::Ldr,
            _ => unreachable!(),
        }
    }

    /// The four-bit encoding of this opcode.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Opcode::Add => 0b0000,
            Opcode::Sub => 0b0001,
            Opcode::Rsb => 0b0010,
            Opcode::Mul => 0b0011,
            Opcode::Mla => 0b0100,
            Opcode::Teq => 0b0101,
            Opcode::Lsl => 0b0110,
            Opcode::Lsr => 0b0111,
            Opcode::And => 0b1000,
            Opcode::Orr => 0b1001,
            Opcode::Eor => 0b1010,
            Opcode::Bic => 0b1011,
            Opcode::Mvn => 0b1100,
            Opcode::Clz => 0b1101,
            Opcode::Str => 0b1110,
            Opcode::Ldr => 0b1111,
        }
    }

    #[must_use]
    pub const fn all_opcodes() -> [Opcode; 16] {
        [
            Opcode::Add,
            Opcode::Sub,
            Opcode::Rsb,
            Opcode::Mul,
            Opcode::Mla,
            Opcode::Teq,
            Opcode::Lsl,
            Opcode::Lsr,
            Opcode::And,
            Opcode::Orr,
            Opcode::Eor,
            Opcode::Bic,
            Opcode::Mvn,
            Opcode::Clz,
            Opcode::Str,
            Opcode::Ldr,
        ]
    }

    /// A one-line description, for help output.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "subtract",
            Opcode::Rsb => "reverse subtract",
            Opcode::Mul => "multiply",
            Opcode::Mla => "multiply, then accumulate the store register",
            Opcode::Teq => "test equivalence (1 when equal, else 0)",
            Opcode::Lsl => "logical shift left",
            Opcode::Lsr => "logical shift right",
            Opcode::And => "bitwise AND",
            Opcode::Orr => "bitwise OR",
            Opcode::Eor => "bitwise exclusive OR",
            Opcode::Bic => "bit clear (AND with complement)",
            Opcode::Mvn => "bitwise NOT of the first operand",
            Opcode::Clz => "count leading zeroes of the first operand",
            Opcode::Str => "write the solution to the store register",
            Opcode::Ldr => "load the solution from the store register",
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Rsb => "RSB",
            Opcode::Mul => "MUL",
            Opcode::Mla => "MLA",
            Opcode::Teq => "TEQ",
            Opcode::Lsl => "LSL",
            Opcode::Lsr => "LSR",
            Opcode::And => "AND",
            Opcode::Orr => "ORR",
            Opcode::Eor => "EOR",
            Opcode::Bic => "BIC",
            Opcode::Mvn => "MVN",
            Opcode::Clz => "CLZ",
            Opcode::Str => "STR",
            Opcode::Ldr => "LDR",
        })
    }
}

#[derive(Debug)]
pub struct UnknownMnemonic(String);

impl Display for UnknownMnemonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "unknown opcode mnemonic '{}'", self.0)
    }
}

impl Error for UnknownMnemonic {}

impl TryFrom<&str> for Opcode {
    type Error = UnknownMnemonic;
    fn try_from(s: &str) -> Result<Opcode, UnknownMnemonic> {
        match s {
            "ADD" => Ok(Opcode::Add),
            "SUB" => Ok(Opcode::Sub),
            "RSB" => Ok(Opcode::Rsb),
            "MUL" => Ok(Opcode::Mul),
            "MLA" => Ok(Opcode::Mla),
            "TEQ" => Ok(Opcode::Teq),
            "LSL" => Ok(Opcode::Lsl),
            "LSR" => Ok(Opcode::Lsr),
            "AND" => Ok(Opcode::And),
            "ORR" => Ok(Opcode::Orr),
            "EOR" => Ok(Opcode::Eor),
            "BIC" => Ok(Opcode::Bic),
            "MVN" => Ok(Opcode::Mvn),
            "CLZ" => Ok(Opcode::Clz),
            "STR" => Ok(Opcode::Str),
            "LDR" => Ok(Opcode::Ldr),
            _ => Err(UnknownMnemonic(s.to_owned())),
        }
    }
}
