//! hexcpu golden-model CLI.
//!
//! This binary is the interactive harness around the simulator core. It performs:
//! 1. **Run:** Load a hex program, execute it with per-step state tables and human-speed pacing.
//! 2. **Disassemble:** Print an address-annotated listing with `PFIX` chains resolved.
//!
//! With no program argument the harness falls back to `$PROJECT_ROOT/tb/model/a.bin`,
//! the location the co-verification test bench writes its assembled program to.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, process, thread};
use tracing_subscriber::EnvFilter;

use hexcpu_core::common::{HaltReason, LoadError};
use hexcpu_core::config::Config;
use hexcpu_core::isa::disasm::disassemble_program;
use hexcpu_core::sim::loader;
use hexcpu_core::sim::render::StateTable;
use hexcpu_core::{Cpu, Snapshot};

/// Program location relative to `$PROJECT_ROOT` used when no file is given.
const DEFAULT_PROGRAM: &str = "tb/model/a.bin";

#[derive(Parser, Debug)]
#[command(
    name = "hexsim",
    author,
    version,
    about = "Golden-model simulator for the 8-bit prefix-operand CPU",
    long_about = "Run or disassemble a hex-encoded program.\n\nExamples:\n  hexsim run prog.hex\n  hexsim run prog.hex --speed 0 --quiet --stats\n  hexsim disasm prog.hex"
)]
struct Cli {
    /// Log engine events to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program until it halts or hits the step limit.
    Run {
        /// Hex program file (defaults to $PROJECT_ROOT/tb/model/a.bin).
        file: Option<PathBuf>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many instructions.
        #[arg(long)]
        steps: Option<u64>,

        /// Steps per second; 0 runs unpaced.
        #[arg(long)]
        speed: Option<f64>,

        /// Print the full state every N steps; 0 disables.
        #[arg(long)]
        print_interval: Option<u64>,

        /// Do not print the state table after every step.
        #[arg(short, long)]
        quiet: bool,

        /// Emit a debug event for every executed instruction.
        #[arg(long)]
        trace: bool,

        /// Print the final snapshot as JSON.
        #[arg(long)]
        json: bool,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Print a listing of a program.
    Disasm {
        /// Hex program file (defaults to $PROJECT_ROOT/tb/model/a.bin).
        file: Option<PathBuf>,
    },
}

/// Options for `run` after merging the config file with command-line overrides.
struct RunOptions {
    config: Config,
    json: bool,
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_tracing(cli.verbose || trace);

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            steps,
            speed,
            print_interval,
            quiet,
            trace,
            json,
            stats,
        } => resolve_program(file).and_then(|path| {
            let mut config = match config {
                Some(p) => Config::from_file(p)?,
                None => Config::default(),
            };
            config.general.trace_instructions |= trace;
            config.general.step_limit = steps.or(config.general.step_limit);
            if let Some(speed) = speed {
                config.display.speed = speed;
            }
            if let Some(interval) = print_interval {
                config.display.print_interval = interval;
            }
            config.display.show_each_step &= !quiet;
            cmd_run(
                &path,
                &RunOptions {
                    config,
                    json,
                    stats,
                },
            )
        }),
        Commands::Disasm { file } => resolve_program(file).and_then(|path| cmd_disasm(&path)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr fmt subscriber. `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Picks the program path: the explicit argument, else the test-bench default.
fn resolve_program(file: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(path) = file {
        return Ok(path);
    }
    let root = env::var_os("PROJECT_ROOT")
        .ok_or("no program given and PROJECT_ROOT is not set")?;
    Ok(PathBuf::from(root).join(DEFAULT_PROGRAM))
}

/// Loads `path` into `cpu`, mapping a missing file to the familiar message.
fn load(cpu: &mut Cpu, path: &Path) -> Result<usize, Box<dyn Error>> {
    match loader::load_program_from_file(cpu, path) {
        Err(LoadError::Io { path, source }) if source.kind() == ErrorKind::NotFound => {
            Err(format!("'{}' file not found.", path.display()).into())
        }
        other => Ok(other?),
    }
}

/// Runs a program, printing state as configured, then reports how it ended.
fn cmd_run(path: &Path, opts: &RunOptions) -> Result<(), Box<dyn Error>> {
    let display = &opts.config.display;
    let mut cpu = Cpu::with_config(&opts.config);
    let len = load(&mut cpu, path)?;
    tracing::info!(path = %path.display(), bytes = len, "loaded program");

    let delay = display.step_delay();
    let mut observer = |snap: &Snapshot| {
        if display.show_each_step {
            println!("{}", StateTable(snap));
        }
        if display.print_interval > 0 && snap.steps.is_multiple_of(display.print_interval) {
            println!("[*] {} steps", snap.steps);
            println!("{}", StateTable(snap));
        }
        if let Some(d) = delay {
            thread::sleep(d);
        }
    };

    let summary = cpu.run_with_observer(opts.config.general.step_limit, &mut observer);

    match summary.halt {
        Some(HaltReason::Halt { a }) => println!("\nareg = {a}"),
        Some(HaltReason::UnknownOpcode(code)) => println!("\nUnknown opcode: {code}"),
        None => println!(
            "\n[*] Step limit reached after {} steps (areg = {})",
            summary.steps_executed, summary.final_a
        ),
    }

    if opts.json {
        println!("{}", cpu.snapshot().to_json()?);
    }
    if opts.stats {
        print!("{}", cpu.stats);
    }
    Ok(())
}

/// Prints an annotated listing of the program in `path`.
fn cmd_disasm(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut cpu = Cpu::new();
    let len = load(&mut cpu, path)?;
    for line in disassemble_program(&cpu.mem.as_slice()[..len]) {
        println!("{line}");
    }
    Ok(())
}
