//! VitalsVM - VMASM interpreter
//! Command-line interface for running and checking VMASM programs
//!
//! ```bash
//! vitalsvm run demos/hypoxia.vmasm             # Traduz e executa
//! vitalsvm run program.vmasm --steps 500       # Limite de passos explícito
//! vitalsvm run program.vmasm --state           # Estado final em JSON
//! vitalsvm check program.vmasm                 # Só tradução
//! vitalsvm info                                # Registradores, sensores, opcodes
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vitals_core::{Machine, MachineConfig, Opcode, Program, Register, Sensor};

#[derive(Parser)]
#[command(name = "vitalsvm")]
#[command(author = "VitalsVM Contributors")]
#[command(version)]
#[command(about = "VitalsVM - VMASM clinical register machine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate and execute a VMASM program
    Run {
        /// Input VMASM file (.vmasm)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum executed instructions (overrides VITALS_STEP_LIMIT)
        #[arg(short, long, value_name = "N")]
        steps: Option<u64>,

        /// Print the final machine state as JSON
        #[arg(long)]
        state: bool,

        /// Log every executed instruction to stderr
        #[arg(long)]
        trace: bool,
    },

    /// Translate a VMASM program without executing it
    Check {
        /// Input VMASM file (.vmasm)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show registers, sensors and opcodes
    Info,
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_tracing(trace);

    let result = match cli.command {
        Commands::Run {
            file,
            steps,
            state,
            trace: _,
        } => run_command(&file, steps, state),
        Commands::Check { file } => check_command(&file),
        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("vitals_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_program(file: &Path) -> Result<Program> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let program = Program::from_source(&source)
        .with_context(|| format!("failed to translate {}", file.display()))?;
    Ok(program)
}

fn run_command(file: &Path, steps: Option<u64>, dump_state: bool) -> Result<()> {
    let program = load_program(file)?;

    let mut config = MachineConfig::from_env();
    if let Some(limit) = steps {
        config = config.with_step_limit(limit);
    }
    debug!(
        path = %file.display(),
        step_limit = config.step_limit,
        instructions = program.len(),
        "starting run"
    );

    let mut machine = Machine::new(&program, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = machine.run(&mut out);
    out.flush()?;

    if dump_state {
        let snapshot = machine.snapshot();
        writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    }

    let report = result.with_context(|| format!("execution of {} aborted", file.display()))?;

    eprintln!(
        "{} {} steps ({:?})",
        "    Finished".green().bold(),
        report.steps,
        report.halt
    );

    Ok(())
}

fn check_command(file: &Path) -> Result<()> {
    println!(
        "{} {}",
        "    Checking".green().bold(),
        file.display().to_string().cyan()
    );

    let program = load_program(file)?;

    println!(
        "{} {} instructions, {} labels",
        "    Finished".green().bold(),
        program.len(),
        program.labels().len()
    );

    for (label, index) in program.labels().iter() {
        let line = program
            .get(index)
            .map(|instr| instr.line.to_string())
            .unwrap_or_else(|| "end".to_string());
        println!("  {:<16} -> {:>4}  (line {})", label.yellow(), index, line);
    }

    Ok(())
}

fn print_info() {
    println!("{}", "VitalsVM - VMASM clinical register machine".bold());
    println!();
    println!("{}", "Registers (dosage, read/write, start at 0):".bold());
    for register in Register::ALL {
        println!("  {}", register.name().cyan());
    }
    println!();
    println!("{}", "Sensors (read-only, one physiology tick per instruction):".bold());
    for sensor in Sensor::ALL {
        println!(
            "  {:<8} default {}",
            sensor.name().cyan(),
            sensor.default_value()
        );
    }
    println!();
    println!("{}", "Opcodes:".bold());
    for opcode in Opcode::ALL {
        println!("  {}", opcode.syntax());
    }
    println!();
    println!("{}", "Relational operators (CJMP):".bold());
    println!("  LT LE GT GE EQ NE");
    println!();
    println!("{}", "Environment:".bold());
    println!("  VITALS_STEP_LIMIT     maximum executed instructions (default 100000)");
    println!("  VITALS_TICK_INTERVAL  steps between cycle markers (default 100)");
    println!("  RUST_LOG              diagnostic filter (default warn)");
}
