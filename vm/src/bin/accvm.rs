//! CLI front-end: assemble a source file and run it (spec.md §6's VM
//! surface, plus the ambient CLI front-end SPEC_FULL.md adds).
//!
//! Grounded on the teacher's `frontend::main`, which parses a machine name
//! and ROM path off `std::env::args()`; this rewrite actually pulls in the
//! `clap` dependency the teacher's own frontend Cargo.toml lists but never
//! uses, rather than hand-rolling argument parsing again.

use std::fs;
use std::process::ExitCode;

use accvm_vm::{RunOutcome, VM};
use clap::Parser;

/// Assemble and run an accvm source file.
#[derive(Parser, Debug)]
#[command(name = "accvm", version, about)]
struct Cli {
    /// Path to the assembler source file.
    source: std::path::PathBuf,

    /// Clock frequency in Hz; omit to run unthrottled.
    #[arg(long)]
    frequency: Option<f64>,

    /// RAM size in cells.
    #[arg(long, default_value_t = 256)]
    ram_size: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.source) {
        Ok(source) => source,
        Err(err) => {
            log::error!("reading {}: {err}", cli.source.display());
            return ExitCode::FAILURE;
        }
    };

    let image = match accvm_asm::compile(&source) {
        Ok(image) => image,
        Err(err) => {
            log::error!("{}: {err}", cli.source.display());
            return ExitCode::FAILURE;
        }
    };

    let mut vm = VM::new(cli.ram_size, Vec::new());
    if let Err(err) = vm.load_program(&image) {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }

    match vm.run(cli.frequency) {
        Ok(RunOutcome::Halted) => ExitCode::SUCCESS,
        Ok(RunOutcome::Interrupted(code)) => {
            log::info!("stopped on interrupt code {code}");
            ExitCode::from(code.0.rem_euclid(256) as u8)
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
