//! Operand entry: the digit-accumulation state machine, and the
//! polling loop that feeds it events from the panel.

use tracing::{event, Level};

use base::{Key, Mode, Word};

use crate::panel::{
    DisplayContent, Indicators, Panel, PanelError, StatusMessage, POLL_INTERVAL,
};

/// One input event during operand entry.  Any event is either a digit
/// or a confirmation; the panel cannot produce anything else, so
/// entry has no failure states of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEvent {
    /// A keypad key.  Keys at or above the active radix are not
    /// rejected; the modulo step folds them in just as the adder on
    /// the board did.
    Digit(Key),
    /// Any confirmation pushbutton.
    Confirm,
}

/// What an [`OperandEntry`] reports after each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Still accumulating; carries the value entered so far.
    Accumulating(Word),
    /// Entry is complete; carries the final operand value.
    Confirmed(Word),
}

/// The accumulation state machine.  It performs no I/O at all, so its
/// transitions can be driven deterministically in tests; the polling
/// side lives in [`acquire_operand`].
#[derive(Debug)]
pub struct OperandEntry {
    mode: Mode,
    value: Word,
}

impl OperandEntry {
    /// A fresh entry always starts from zero.
    #[must_use]
    pub fn new(mode: Mode) -> OperandEntry {
        OperandEntry { mode, value: 0 }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn value(&self) -> Word {
        self.value
    }

    /// Applies one event.  A digit shifts the accumulated value one
    /// position left in the active radix and appends itself, with the
    /// result reduced modulo the four-digit window; digits older than
    /// the window fall off the top silently.  The value is in range
    /// for the mode after every step, whatever keys were pressed.
    pub fn apply(&mut self, entry_event: EntryEvent) -> EntryStatus {
        match entry_event {
            EntryEvent::Digit(key) => {
                self.value =
                    (self.value * self.mode.radix() + Word::from(key)) % self.mode.modulus();
                EntryStatus::Accumulating(self.value)
            }
            EntryEvent::Confirm => EntryStatus::Confirmed(self.value),
        }
    }
}

/// Waits for the next keypad digit or confirmation press.  While
/// idle, the opcode field of the switches is mirrored onto the
/// indicator LEDs so the operator can see which operation is
/// currently selected.  A digit is reported only after the key has
/// been released again (debounce).
fn next_event<P: Panel>(panel: &mut P) -> Result<EntryEvent, PanelError> {
    loop {
        if let Some(key) = panel.read_keypad()? {
            while panel.read_keypad()?.is_some() {
                panel.idle(POLL_INTERVAL)?;
            }
            return Ok(EntryEvent::Digit(key));
        }
        if panel.read_buttons()?.any_pressed() {
            return Ok(EntryEvent::Confirm);
        }
        let switches = panel.read_switches()?;
        panel.write_indicators(Indicators::opcode_preview(switches))?;
        panel.idle(POLL_INTERVAL)?;
    }
}

/// Blocks until every confirmation pushbutton has been released.
pub(crate) fn wait_for_release<P: Panel>(panel: &mut P) -> Result<(), PanelError> {
    while panel.read_buttons()?.any_pressed() {
        panel.idle(POLL_INTERVAL)?;
    }
    Ok(())
}

/// Runs one operand entry to completion: takes panel events,
/// refreshes the display after each digit, and returns the
/// accumulated value once a confirmation arrives and its button has
/// been released.
pub fn acquire_operand<P: Panel>(panel: &mut P, mode: Mode) -> Result<Word, PanelError> {
    let mut operand_entry = OperandEntry::new(mode);
    loop {
        match operand_entry.apply(next_event(panel)?) {
            EntryStatus::Accumulating(value) => {
                event!(Level::TRACE, value, "accumulated a digit");
                panel.write_display(DisplayContent::Value { value, mode })?;
            }
            EntryStatus::Confirmed(value) => {
                event!(Level::DEBUG, value, %mode, "operand confirmed");
                // The board refreshed the numeric display one last
                // time before switching to the confirmation text.
                panel.write_display(DisplayContent::Value { value, mode })?;
                panel.write_display(DisplayContent::Status(StatusMessage::EntryComplete))?;
                wait_for_release(panel)?;
                return Ok(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::sample::select;
    use test_strategy::proptest;

    fn key(value: u8) -> Key {
        Key::try_from(value).expect("test keys should be in range")
    }

    fn accumulate(mode: Mode, digits: &[u8]) -> Word {
        let mut operand_entry = OperandEntry::new(mode);
        for &digit in digits {
            operand_entry.apply(EntryEvent::Digit(key(digit)));
        }
        match operand_entry.apply(EntryEvent::Confirm) {
            EntryStatus::Confirmed(value) => value,
            EntryStatus::Accumulating(_) => unreachable!(),
        }
    }

    fn modes() -> Vec<Mode> {
        vec![Mode::Hexadecimal, Mode::Decimal, Mode::RawBinary]
    }

    #[test]
    fn test_entry_starts_at_zero() {
        for mode in modes() {
            assert_eq!(accumulate(mode, &[]), 0);
        }
    }

    #[test]
    fn test_decimal_window_evicts_the_oldest_digit() {
        assert_eq!(accumulate(Mode::Decimal, &[1, 2, 3, 4, 5]), 2345);
    }

    #[test]
    fn test_hexadecimal_entry() {
        assert_eq!(accumulate(Mode::Hexadecimal, &[0xA, 0xB, 0xC, 0xD]), 0xABCD);
    }

    #[test]
    fn test_binary_entry_keeps_the_low_four_bits() {
        assert_eq!(accumulate(Mode::RawBinary, &[1, 0, 1, 1, 0]), 0b0110);
    }

    #[test]
    fn test_over_radix_digits_are_folded_not_rejected() {
        assert_eq!(accumulate(Mode::Decimal, &[15]), 15);
        assert_eq!(accumulate(Mode::Decimal, &[9, 15]), 105);
        assert_eq!(accumulate(Mode::RawBinary, &[15]), 15);
    }

    #[test]
    fn test_leading_zeroes_are_harmless() {
        assert_eq!(accumulate(Mode::Decimal, &[0, 0, 0, 4, 2]), 42);
    }

    #[proptest]
    fn prop_value_matches_the_positional_sum(
        #[strategy(select(modes()))] mode: Mode,
        #[strategy(vec(0u8..16, 0..12))] digits: Vec<u8>,
    ) {
        // Closed form from first principles: the full positional sum
        // of every digit pressed, reduced modulo the window.  Weights
        // of digits older than the window are multiples of the
        // modulus, so only the last four digits can contribute.
        let full_sum = digits
            .iter()
            .fold(0u64, |acc, &d| acc * u64::from(mode.radix()) + u64::from(d));
        let expected = full_sum % u64::from(mode.modulus());
        assert_eq!(u64::from(accumulate(mode, &digits)), expected);
    }

    #[proptest]
    fn prop_raw_binary_never_leaves_the_window(
        #[strategy(vec(0u8..16, 0..32))] digits: Vec<u8>,
    ) {
        let mut operand_entry = OperandEntry::new(Mode::RawBinary);
        for &digit in &digits {
            operand_entry.apply(EntryEvent::Digit(key(digit)));
            assert!(operand_entry.value() <= 0b1111);
        }
    }

    #[proptest]
    fn prop_value_is_in_range_after_every_step(
        #[strategy(select(modes()))] mode: Mode,
        #[strategy(vec(0u8..16, 0..16))] digits: Vec<u8>,
    ) {
        let mut operand_entry = OperandEntry::new(mode);
        for &digit in &digits {
            operand_entry.apply(EntryEvent::Digit(key(digit)));
            assert!(operand_entry.value() <= mode.display_max());
        }
    }
}
