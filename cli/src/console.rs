//! A line-oriented board simulator.  Each input line is one stimulus
//! to the panel: a keypad press, a pushbutton pulse, or a switch
//! change.  See the command-line help for the stimulus grammar.

use std::collections::VecDeque;
use std::io::BufRead;
use std::time::Duration;

use tracing::{event, Level};

use base::{ButtonState, Key, Opcode, SwitchState};
use calc::{DisplayContent, Indicators, Panel, PanelError};

use crate::lamps::LampWriter;

pub struct ConsolePanel {
    source: Box<dyn BufRead>,
    switches: SwitchState,
    /// Keys from a multi-digit stimulus line, pressed one per poll.
    pending_keys: VecDeque<Key>,
    /// A pressed key reads as down once and as released afterwards.
    key_down: Option<Key>,
    button_down: bool,
    lamps: LampWriter,
}

impl ConsolePanel {
    pub fn new(source: Box<dyn BufRead>) -> ConsolePanel {
        ConsolePanel {
            source,
            switches: SwitchState::default(),
            pending_keys: VecDeque::new(),
            key_down: None,
            button_down: false,
            lamps: LampWriter::new(),
        }
    }

    /// Latches the next stimulus when nothing is currently pressed.
    /// Blocks on the input stream, which is this board's equivalent
    /// of waiting for the operator's hand.
    fn advance(&mut self) -> Result<(), PanelError> {
        if self.key_down.is_some() || self.button_down {
            return Ok(());
        }
        if let Some(key) = self.pending_keys.pop_front() {
            self.key_down = Some(key);
            return Ok(());
        }
        let mut line = String::new();
        if self.source.read_line(&mut line)? == 0 {
            return Err(PanelError::PowerOff);
        }
        self.apply_line(line.trim())
    }

    fn apply_line(&mut self, line: &str) -> Result<(), PanelError> {
        if line.is_empty() || line.eq_ignore_ascii_case("go") {
            self.button_down = true;
            return Ok(());
        }
        let lowered = line.to_ascii_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        match tokens.as_slice() {
            ["quit"] | ["off"] => {
                return Err(PanelError::PowerOff);
            }
            ["op", arg] => {
                self.set_opcode_switches(arg);
            }
            ["mode", arg] => {
                self.set_mode_switches(arg);
            }
            [digits] if digits.chars().all(|ch| ch.is_ascii_hexdigit()) => {
                self.pending_keys
                    .extend(digits.chars().filter_map(Key::from_hex_char));
                if let Some(key) = self.pending_keys.pop_front() {
                    self.key_down = Some(key);
                }
            }
            _ => {
                event!(Level::WARN, line, "unrecognised stimulus, ignored");
            }
        }
        Ok(())
    }

    /// `op` takes either a mnemonic (`op MUL`) or the raw switch
    /// positions (`op 0011`).
    fn set_opcode_switches(&mut self, arg: &str) {
        let code = if !arg.is_empty() && arg.chars().all(|ch| ch == '0' || ch == '1') {
            u8::from_str_radix(arg, 2).ok()
        } else {
            Opcode::try_from(arg.to_ascii_uppercase().as_str())
                .ok()
                .map(|opcode| opcode.code())
        };
        match code {
            Some(code) => {
                self.switches.set_opcode_field(code);
                event!(
                    Level::DEBUG,
                    opcode = %Opcode::from_switches(self.switches),
                    "opcode switches set"
                );
            }
            None => {
                event!(Level::WARN, arg, "not an opcode mnemonic or bit pattern");
            }
        }
    }

    fn set_mode_switches(&mut self, arg: &str) {
        match arg.to_ascii_lowercase().as_str() {
            "hex" => {
                self.switches.set_binary_override(false);
                self.switches.set_decimal_select(false);
            }
            "dec" => {
                self.switches.set_binary_override(false);
                self.switches.set_decimal_select(true);
            }
            "bin" => {
                self.switches.set_binary_override(true);
            }
            _ => {
                event!(Level::WARN, arg, "not a mode (expected hex, dec or bin)");
            }
        }
    }
}

impl Panel for ConsolePanel {
    fn read_switches(&mut self) -> Result<SwitchState, PanelError> {
        Ok(self.switches)
    }

    fn read_buttons(&mut self) -> Result<ButtonState, PanelError> {
        if self.button_down {
            self.button_down = false;
            Ok(ButtonState::pressed(0b0001))
        } else {
            Ok(ButtonState::NONE)
        }
    }

    fn read_keypad(&mut self) -> Result<Option<Key>, PanelError> {
        Ok(self.key_down.take())
    }

    fn write_display(&mut self, content: DisplayContent) -> Result<(), PanelError> {
        let text = match content {
            DisplayContent::Value { value, mode } => mode.display_window(value),
            DisplayContent::Status(status) => status.text().to_string(),
        };
        self.lamps.show_display(&text)?;
        Ok(())
    }

    fn write_indicators(&mut self, indicators: Indicators) -> Result<(), PanelError> {
        self.lamps.show_indicators(indicators.bits())?;
        Ok(())
    }

    fn idle(&mut self, _interval: Duration) -> Result<(), PanelError> {
        // No need to actually sleep: the input stream blocks until
        // the operator (or the script) provides the next stimulus.
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc::Calculator;
    use std::io::Cursor;

    fn panel_for(script: &str) -> ConsolePanel {
        ConsolePanel::new(Box::new(Cursor::new(script.to_string())))
    }

    #[test]
    fn test_opcode_switches_accept_mnemonics_and_bits() {
        let mut panel = panel_for("");
        panel.set_opcode_switches("mul");
        assert_eq!(panel.switches.opcode_field(), 0b0011);
        panel.set_opcode_switches("1101");
        assert_eq!(panel.switches.opcode_field(), 0b1101);
        panel.set_opcode_switches("nonsense");
        assert_eq!(panel.switches.opcode_field(), 0b1101, "bad input is ignored");
    }

    #[test]
    fn test_mode_switches() {
        let mut panel = panel_for("");
        panel.set_mode_switches("dec");
        assert!(panel.switches.decimal_selected());
        assert!(!panel.switches.binary_override());
        panel.set_mode_switches("bin");
        assert!(panel.switches.binary_override());
        panel.set_mode_switches("hex");
        assert!(!panel.switches.decimal_selected());
        assert!(!panel.switches.binary_override());
    }

    #[test]
    fn test_digit_line_queues_each_key() {
        let mut panel = panel_for("");
        panel.apply_line("1a3").expect("digits are a valid stimulus");
        assert_eq!(panel.key_down.map(|k| k.value()), Some(1));
        panel.key_down = None;
        assert_eq!(
            panel.pending_keys.iter().map(|k| k.value()).collect::<Vec<u8>>(),
            vec![0xA, 3]
        );
    }

    #[test]
    fn test_scripted_session_end_to_end() {
        let script = "mode dec\nop ADD\ngo\n12\ngo\n34\ngo\nquit\n";
        let mut panel = panel_for(script);
        let mut calculator = Calculator::new();
        match calculator.run(&mut panel) {
            Err(PanelError::PowerOff) => (),
            other => panic!("expected the session to end with PowerOff, got {other:?}"),
        }
        assert_eq!(calculator.solution(), 46);
    }
}
