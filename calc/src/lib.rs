//! This crate implements the calculator core: operand entry, the
//! sixteen-way operation dispatcher and the sequencing loop, all
//! behind a panel hardware abstraction so that a real board and a
//! simulated one look the same to the core.
#![crate_name = "calc"]

mod alu;
mod control;
mod entry;
mod panel;

pub use alu::{dispatch, exceeds_display_range};
pub use control::Calculator;
pub use entry::{acquire_operand, EntryEvent, EntryStatus, OperandEntry};
pub use panel::{
    DisplayContent, Indicators, Panel, PanelError, StatusMessage, POLL_INTERVAL,
};
