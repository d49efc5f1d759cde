//! Numeric entry and display modes.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

#[cfg(test)]
use test_strategy::Arbitrary;

use crate::panel::SwitchState;
use crate::Word;

/// The numeric base governing digit entry and display.  The mode also
/// fixes how many values fit in the four-character display window,
/// and hence the largest solution that can be shown without a
/// warning.
///
/// A mode is selected once per calculation cycle and is immutable for
/// the rest of that cycle; see [`Mode::from_switches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Mode {
    /// Four hexadecimal digits; values 0..=0xFFFF.
    Hexadecimal,
    /// Four decimal digits; values 0..=9999.
    Decimal,
    /// Four binary digits; values 0..=0b1111.
    RawBinary,
}

impl Mode {
    /// Selects the mode from the switch bank.  The binary-override
    /// switch wins unconditionally; otherwise the decimal-select
    /// switch chooses between decimal and hexadecimal.
    #[must_use]
    pub fn from_switches(switches: SwitchState) -> Mode {
        if switches.binary_override() {
            Mode::RawBinary
        } else if switches.decimal_selected() {
            Mode::Decimal
        } else {
            Mode::Hexadecimal
        }
    }

    /// The radix each new digit is shifted in by.
    #[must_use]
    pub const fn radix(&self) -> Word {
        match self {
            Mode::Hexadecimal => 16,
            Mode::Decimal => 10,
            Mode::RawBinary => 2,
        }
    }

    /// One past the largest value the four-digit window can hold;
    /// digit accumulation reduces modulo this.
    #[must_use]
    pub const fn modulus(&self) -> Word {
        match self {
            Mode::Hexadecimal => 0x10000,
            Mode::Decimal => 10_000,
            Mode::RawBinary => 0b10000,
        }
    }

    /// The largest value the display can show in this mode.
    #[must_use]
    pub const fn display_max(&self) -> Word {
        self.modulus() - 1
    }

    /// Renders `value` as the four characters the segmented display
    /// would show.  Values beyond the window come out truncated to
    /// their low four digits, matching the hardware's best-effort
    /// display of an oversized solution.
    #[must_use]
    pub fn display_window(&self, value: Word) -> String {
        let shown = value % self.modulus();
        match self {
            Mode::Hexadecimal => format!("{shown:04X}"),
            Mode::Decimal => format!("{shown:04}"),
            Mode::RawBinary => format!("{shown:04b}"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Mode::Hexadecimal => "hexadecimal",
            Mode::Decimal => "decimal",
            Mode::RawBinary => "raw binary",
        })
    }
}
