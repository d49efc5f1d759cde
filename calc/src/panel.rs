//! The hardware abstraction boundary between the calculator core and
//! a real or simulated board.
//!
//! The core is the only reader of switch, button and keypad state and
//! the only writer of the display and the indicator LEDs while it
//! runs, so no locking discipline is needed anywhere behind this
//! trait.

use std::fmt::{self, Display, Formatter};
use std::io;
use std::time::Duration;

use serde::Serialize;

use base::{ButtonState, Key, Mode, SwitchState, Word};

/// Cadence of the wait-for-hardware polling loops.  This is a
/// debounce and power measure, not a scheduling primitive; nothing
/// depends on its exact length.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Content for the four-character segmented display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayContent {
    /// A numeric value, rendered in the given mode's radix.
    Value { value: Word, mode: Mode },
    /// One of the fixed status texts.
    Status(StatusMessage),
}

/// The fixed status texts the display can show between numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusMessage {
    /// Shown once when the board powers on.
    PowerOn,
    /// Shown when a new entry cycle has been armed.
    EntryArmed,
    /// Shown when an operand has just been confirmed.
    EntryComplete,
}

impl StatusMessage {
    /// The literal four characters sent to the display.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            StatusMessage::PowerOn => "TYPE",
            StatusMessage::EntryArmed => "____",
            StatusMessage::EntryComplete => "----",
        }
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.text())
    }
}

/// State of the indicator LED bank, one bit per LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicators(u16);

impl Indicators {
    /// All indicators off.
    pub const CLEAR: Indicators = Indicators(0);

    /// The nine-LED all-on pattern shown when a solution exceeds the
    /// active mode's display range.
    pub const WARNING: Indicators = Indicators(0b1_1111_1111);

    /// Mirrors the opcode field of the switches.  Shown while waiting
    /// for keypad input, as a live preview of the operation currently
    /// selected; the dispatcher does not read it back.
    #[must_use]
    pub fn opcode_preview(switches: SwitchState) -> Indicators {
        Indicators(u16::from(switches.opcode_field()))
    }

    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.0
    }
}

/// Failures at the panel boundary.  The board itself has no failure
/// modes at all, since every switch, button and keypad state is
/// structurally valid; these can only arise from whatever stands in
/// for the board.
#[derive(Debug)]
pub enum PanelError {
    /// The operator powered the board off, or a simulated panel ran
    /// out of stimuli.  This is the orderly way out of the run loop.
    PowerOff,
    /// The panel's input or output stream failed.
    Input(io::Error),
}

impl Display for PanelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            PanelError::PowerOff => f.write_str("panel powered off"),
            PanelError::Input(e) => write!(f, "panel input/output failed: {e}"),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::PowerOff => None,
            PanelError::Input(e) => Some(e),
        }
    }
}

impl From<io::Error> for PanelError {
    fn from(e: io::Error) -> PanelError {
        PanelError::Input(e)
    }
}

/// The fixed hardware surface the core polls and drives.
pub trait Panel {
    /// Current state of the whole switch bank.
    fn read_switches(&mut self) -> Result<SwitchState, PanelError>;

    /// Nonzero while any confirmation pushbutton is held.
    fn read_buttons(&mut self) -> Result<ButtonState, PanelError>;

    /// The currently pressed keypad key, if any.
    fn read_keypad(&mut self) -> Result<Option<Key>, PanelError>;

    fn write_display(&mut self, content: DisplayContent) -> Result<(), PanelError>;

    fn write_indicators(&mut self, indicators: Indicators) -> Result<(), PanelError>;

    /// Blocks for one polling interval.  A simulated board uses this
    /// as its opportunity to advance its own state.
    fn idle(&mut self, interval: Duration) -> Result<(), PanelError>;
}
