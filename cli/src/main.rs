use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use base::Opcode;
use calc::{Calculator, PanelError};

mod console;
mod lamps;

use console::ConsolePanel;

/// Simulate the keypad op-code calculator board.
///
/// The board is driven by stimulus lines, one per line of input: a
/// run of hexadecimal digits presses those keypad keys in turn; `go`
/// (or a blank line) pulses a confirmation pushbutton; `op <mnemonic
/// or 4 bits>` sets the opcode switches; `mode <hex|dec|bin>` sets
/// the mode switches; `quit` (or end of input) powers the board off.
#[derive(Debug, Parser)]
struct Args {
    /// File containing stimulus lines (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Print the opcode table and exit
    #[arg(long)]
    list_opcodes: bool,
}

fn print_opcode_table() {
    println!("bits  mnemonic  operation");
    for opcode in Opcode::all_opcodes() {
        println!(
            "{:04b}  {:<8}  {}",
            opcode.code(),
            opcode.to_string(),
            opcode.description()
        );
    }
}

fn run_calculator() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // See
    // https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Box::new(e));
        }
        Ok(layer) => layer,
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    if args.list_opcodes {
        print_opcode_table();
        return Ok(());
    }

    let source: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut panel = ConsolePanel::new(source);
    let mut calculator = Calculator::new();
    match calculator.run(&mut panel) {
        Err(PanelError::PowerOff) => {
            event!(Level::INFO, "panel powered off");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
        // The run loop only ends through an error; an Ok here would
        // mean the board stopped cycling of its own accord.
        Ok(()) => Ok(()),
    }
}

fn main() {
    match run_calculator() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
