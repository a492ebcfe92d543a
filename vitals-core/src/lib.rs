//! # 🩺 vitals-core — VitalsVM
//!
//! Intérprete de máquina de registradores para VMASM, uma linguagem assembly
//! que modela intervenções clínicas: dois registradores de dosagem (O2, IV)
//! conduzem três sensores somente-leitura (S_SPO2, S_BPM, S_IVLV) que evoluem
//! gradualmente em direção a alvos fisiológicos enquanto o programa executa.
//!
//! ## Fluxo
//!
//! ```text
//! VMASM source (.vmasm)
//!      ↓
//! Translator ──▶ Program (instruções + labels)
//!      ↓
//! Machine (fetch-decode-execute)
//!      ├── Operand resolver (labels, literais, nomes)
//!      └── Physiology (um tick por instrução)
//!      ↓
//! Output: NAME=value / PRINT: ... / --- ciclo N ---
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use vitals_core::{MachineConfig, run_source};
//!
//! let mut out = Vec::new();
//! let report = run_source("SET O2 100\nPRINT O2\nHALT", MachineConfig::default(), &mut out)?;
//! assert_eq!(String::from_utf8(out).unwrap(), "O2=100\n");
//! assert_eq!(report.steps, 2);
//! # Ok::<(), vitals_core::VmError>(())
//! ```

pub mod config;
pub mod error;
pub mod machine;
pub mod opcode;
pub mod operand;
pub mod physiology;
pub mod prelude;
pub mod program;
pub mod state;
pub mod translator;

pub use config::MachineConfig;
pub use error::{VmError, VmResult};
pub use machine::{Emission, HaltReason, Machine, RunReport, Status};
pub use opcode::{Opcode, Relop};
pub use operand::{Operand, resolve};
pub use program::{Instruction, LabelTable, Program};
pub use state::{ExecutionState, Register, Registers, Sensor, Sensors, Snapshot};
pub use translator::translate;

use std::io::Write;

/// Traduz e executa `source`, escrevendo a saída em `out`
pub fn run_source<W: Write>(source: &str, config: MachineConfig, out: &mut W) -> VmResult<RunReport> {
    let program = Program::from_source(source)?;
    Machine::new(&program, config).run(out)
}

#[cfg(test)]
mod tests;
