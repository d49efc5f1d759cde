//! The `base` crate defines the panel-related things which are useful
//! in both the calculator core and other associated tools.  The idea
//! is that if you want to write a front-end (a terminal board, say,
//! or a real GPIO backend), it would depend on the base crate but
//! would not need to depend on the calculator library itself.

mod mode;
mod opcode;
mod panel;

pub use crate::mode::Mode;
pub use crate::opcode::{Opcode, UnknownMnemonic};
pub use crate::panel::{
    ButtonState, Key, KeyRangeError, SwitchState, BINARY_OVERRIDE_BIT, DECIMAL_SELECT_BIT,
    OPCODE_FIELD_MASK,
};

/// The machine word the board computes in.  Operands occupy at most
/// 16 bits of it, but solutions can use all 32 (a multiply of two
/// four-digit hexadecimal operands, for instance).
pub type Word = u32;
