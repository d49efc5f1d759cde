//! The sequencing loop: ties mode selection, operand entry and
//! dispatch together into the board's unbounded calculation cycle.

use tracing::{event, Level};

use base::{Mode, Opcode, Word};

use crate::alu;
use crate::entry;
use crate::panel::{
    DisplayContent, Indicators, Panel, PanelError, StatusMessage, POLL_INTERVAL,
};

/// The calculator's registers.  The store register is the only state
/// that outlives a calculation cycle; the solution register is
/// overwritten by every dispatch except `STR`, and the operands are
/// purely transient.
#[derive(Debug, Default)]
pub struct Calculator {
    solution: Word,
    store: Word,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Calculator {
        Calculator::default()
    }

    #[must_use]
    pub fn solution(&self) -> Word {
        self.solution
    }

    #[must_use]
    pub fn store(&self) -> Word {
        self.store
    }

    /// Powers the board on and runs calculation cycles until the
    /// panel goes away.  Under normal operation this never returns;
    /// the only exits are panel failures and the orderly
    /// [`PanelError::PowerOff`].
    pub fn run<P: Panel>(&mut self, panel: &mut P) -> Result<(), PanelError> {
        panel.write_display(DisplayContent::Status(StatusMessage::PowerOn))?;
        loop {
            self.run_cycle(panel)?;
        }
    }

    /// Runs one full cycle: wait for a start press (re-sampling the
    /// mode switches the whole time, so the operator can still change
    /// mode), clear any warning left over from the previous cycle,
    /// read both operands, then dispatch on whatever opcode the
    /// switches hold at that moment.
    pub fn run_cycle<P: Panel>(&mut self, panel: &mut P) -> Result<(), PanelError> {
        let mut mode = Mode::from_switches(panel.read_switches()?);
        while !panel.read_buttons()?.any_pressed() {
            mode = Mode::from_switches(panel.read_switches()?);
            panel.idle(POLL_INTERVAL)?;
        }
        // The mode is frozen from here to the end of the cycle.
        event!(Level::DEBUG, %mode, "entry cycle armed");

        panel.write_display(DisplayContent::Status(StatusMessage::EntryArmed))?;
        panel.write_indicators(Indicators::CLEAR)?;
        entry::wait_for_release(panel)?;

        let op1 = entry::acquire_operand(panel, mode)?;
        let op2 = entry::acquire_operand(panel, mode)?;

        // Late binding: the opcode is whatever the switches say right
        // now, not what was previewed on the LEDs during entry.
        let opcode = Opcode::from_switches(panel.read_switches()?);
        alu::dispatch(opcode, op1, op2, &mut self.solution, &mut self.store);
        event!(
            Level::DEBUG,
            %opcode,
            op1,
            op2,
            solution = self.solution,
            store = self.store,
            "dispatched"
        );

        if alu::exceeds_display_range(self.solution, mode) {
            event!(
                Level::DEBUG,
                solution = self.solution,
                %mode,
                "solution exceeds the display window"
            );
            panel.write_indicators(Indicators::WARNING)?;
        }
        panel.write_display(DisplayContent::Value {
            value: self.solution,
            mode,
        })?;
        Ok(())
    }
}
