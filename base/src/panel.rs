//! Raw panel input state: the switch bank, the confirmation
//! pushbuttons and the matrix keypad.
//!
//! Switch bit assignments follow the board layout:
//!
//! | Bits   | Meaning                     |
//! | ------ | --------------------------- |
//! | 0..=3  | opcode field                |
//! | 10     | binary-override             |
//! | 11     | decimal-select              |
//!
//! The remaining switch positions are unassigned and ignored.

use std::fmt::{self, Display, Formatter};

use crate::Word;

/// Switch bits 0..=3 hold the opcode field.
pub const OPCODE_FIELD_MASK: u16 = 0b1111;

/// When set, digit entry uses raw binary regardless of the
/// decimal-select switch.
pub const BINARY_OVERRIDE_BIT: u16 = 1 << 10;

/// When set (and binary-override is not), digit entry is decimal;
/// when clear, hexadecimal.
pub const DECIMAL_SELECT_BIT: u16 = 1 << 11;

/// The state of the whole switch bank, one bit per switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchState(u16);

impl SwitchState {
    #[must_use]
    pub const fn new(bits: u16) -> SwitchState {
        SwitchState(bits)
    }

    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// The low four switches, read as the opcode field.
    #[must_use]
    pub const fn opcode_field(&self) -> u8 {
        (self.0 & OPCODE_FIELD_MASK) as u8
    }

    #[must_use]
    pub const fn binary_override(&self) -> bool {
        self.0 & BINARY_OVERRIDE_BIT != 0
    }

    #[must_use]
    pub const fn decimal_selected(&self) -> bool {
        self.0 & DECIMAL_SELECT_BIT != 0
    }

    /// Sets the low four switches.  Bits above the opcode field in
    /// `code` are ignored, as the bank has only four opcode switches.
    pub fn set_opcode_field(&mut self, code: u8) {
        self.0 = (self.0 & !OPCODE_FIELD_MASK) | u16::from(code) & OPCODE_FIELD_MASK;
    }

    pub fn set_binary_override(&mut self, on: bool) {
        if on {
            self.0 |= BINARY_OVERRIDE_BIT;
        } else {
            self.0 &= !BINARY_OVERRIDE_BIT;
        }
    }

    pub fn set_decimal_select(&mut self, on: bool) {
        if on {
            self.0 |= DECIMAL_SELECT_BIT;
        } else {
            self.0 &= !DECIMAL_SELECT_BIT;
        }
    }
}

/// The state of the confirmation pushbuttons, one bit per button.
/// Pressing any of them confirms whatever is being entered; the code
/// never cares which one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState(u8);

impl ButtonState {
    /// No button is held.
    pub const NONE: ButtonState = ButtonState(0);

    #[must_use]
    pub const fn pressed(bits: u8) -> ButtonState {
        ButtonState(bits)
    }

    #[must_use]
    pub const fn any_pressed(&self) -> bool {
        self.0 != 0
    }
}

/// A single keypad key.  The matrix keypad has sixteen keys labelled
/// 0 through F; which of them are meaningful depends on the active
/// mode, but the keypad itself has no notion of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(u8);

impl Key {
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// The key whose label is the given hexadecimal digit character,
    /// upper or lower case.
    #[must_use]
    pub fn from_hex_char(ch: char) -> Option<Key> {
        ch.to_digit(16).map(|d| Key(d as u8))
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{:X}", self.0)
    }
}

impl From<Key> for Word {
    fn from(key: Key) -> Word {
        Word::from(key.0)
    }
}

#[derive(Debug)]
pub struct KeyRangeError(pub u8);

impl Display for KeyRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "keypad value {} is out of range (0..=15)", self.0)
    }
}

impl std::error::Error for KeyRangeError {}

impl TryFrom<u8> for Key {
    type Error = KeyRangeError;
    fn try_from(value: u8) -> Result<Key, KeyRangeError> {
        if value < 16 {
            Ok(Key(value))
        } else {
            Err(KeyRangeError(value))
        }
    }
}
