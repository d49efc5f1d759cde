//! Terminal rendering of the four-character segmented display and the
//! indicator LED bank.

use std::io::{self, Write};

use termcolor::{self, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How many LEDs the indicator bank has.  The warning pattern lights
/// all nine.
const LED_COUNT: u16 = 9;

fn get_colour_choice() -> termcolor::ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Draws the display window and the LED bank, redrawing only when
/// something actually changed, the way the real lamps only change
/// when rewritten.
pub struct LampWriter {
    stream: StandardStream,
    shown: Option<String>,
    indicators: Option<u16>,
}

impl LampWriter {
    pub fn new() -> LampWriter {
        LampWriter {
            stream: StandardStream::stdout(get_colour_choice()),
            shown: None,
            indicators: None,
        }
    }

    /// Redraws the display window if its text changed.
    pub fn show_display(&mut self, text: &str) -> Result<(), io::Error> {
        if self.shown.as_deref() == Some(text) {
            return Ok(());
        }
        self.shown = Some(text.to_string());
        write!(self.stream, "display [")?;
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(self.stream, "{text:>4}")?;
        self.stream.reset()?;
        writeln!(self.stream, "]")
    }

    /// Redraws the LED bank if any LED changed.  The most significant
    /// LED comes first.
    pub fn show_indicators(&mut self, bits: u16) -> Result<(), io::Error> {
        if self.indicators == Some(bits) {
            return Ok(());
        }
        self.indicators = Some(bits);
        write!(self.stream, "leds    ")?;
        for led in (0..LED_COUNT).rev() {
            if bits >> led & 1 == 1 {
                self.stream
                    .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(self.stream, "*")?;
                self.stream.reset()?;
            } else {
                write!(self.stream, ".")?;
            }
        }
        writeln!(self.stream)
    }
}

impl Default for LampWriter {
    /// We're implementing this mainly to keep clippy happy.
    fn default() -> LampWriter {
        Self::new()
    }
}
