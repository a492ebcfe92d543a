//! Motor de execução
//!
//! Laço fetch-decode-execute sobre um [`Program`] traduzido. Cada instrução
//! executada (exceto HALT) dispara um tick do modelo fisiológico e incrementa
//! o contador de passos; o limite de passos é verificado antes de cada fetch.
//!
//! ```text
//!             ┌──────────── step ────────────┐
//!             ▼                              │
//!   Running ──┬── HALT / pc ∉ [0,N) ──▶ Halted
//!             └── erro / limite ──────▶ Failed
//! ```
//!
//! Saída (PRINT e marcadores de ciclo) vai para qualquer [`std::io::Write`].

use std::fmt;
use std::io::Write;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::MachineConfig;
use crate::error::{VmError, VmResult};
use crate::opcode::{Opcode, Relop};
use crate::operand::resolve;
use crate::physiology;
use crate::program::{Instruction, LabelTable, Program};
use crate::state::{ExecutionState, Register, Sensor, Snapshot};

/// Motivo de parada normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// Instrução HALT executada
    HaltInstruction,
    /// pc saiu de [0, N)
    EndOfProgram,
}

/// Estado da máquina
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(HaltReason),
    Failed,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// Linha emitida no stream de saída
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// `NAME=value`
    Value { name: &'static str, value: i64 },
    /// `PRINT: <tokens>` para identificadores desconhecidos
    Raw(String),
    /// `--- ciclo N ---`
    Tick(u64),
}

impl fmt::Display for Emission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { name, value } => write!(f, "{}={}", name, value),
            Self::Raw(tokens) => write!(f, "PRINT: {}", tokens),
            Self::Tick(step) => write!(f, "--- ciclo {} ---", step),
        }
    }
}

/// Resultado de uma execução concluída
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub steps: u64,
    pub halt: HaltReason,
    pub snapshot: Snapshot,
}

/// Instrução decodificada: aridade e tipo dos operandos já validados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op<'p> {
    Set { reg: Register, value: i64 },
    Inc { reg: Register },
    /// O label só é resolvido se o salto acontecer
    DecJz { reg: Register, label: &'p str },
    Goto { target: usize },
    Print { name: &'p str, operands: &'p [String] },
    Push { reg: Register },
    Pop { reg: Register },
    Get { sensor: Sensor, reg: Register },
    CJmp { sensor: Sensor, relop: Relop, value: i64, target: usize },
    Halt,
}

fn malformed(instr: &Instruction, detail: impl Into<String>) -> VmError {
    VmError::MalformedOperand {
        opcode: instr.mnemonic.clone(),
        detail: detail.into(),
        line: instr.line,
    }
}

fn register(instr: &Instruction, raw: &str) -> VmResult<Register> {
    Register::from_name(raw).ok_or_else(|| VmError::InvalidRegister {
        name: raw.to_string(),
        line: instr.line,
    })
}

fn sensor(instr: &Instruction, raw: &str) -> VmResult<Sensor> {
    Sensor::from_name(raw).ok_or_else(|| VmError::InvalidSensor {
        name: raw.to_string(),
        line: instr.line,
    })
}

fn literal(instr: &Instruction, raw: &str) -> VmResult<i64> {
    raw.parse()
        .map_err(|_| malformed(instr, format!("expected integer literal, got '{}'", raw)))
}

fn jump_target(instr: &Instruction, raw: &str, labels: &LabelTable) -> VmResult<usize> {
    resolve(raw, labels)
        .target()
        .ok_or_else(|| VmError::UnresolvedJumpTarget {
            label: raw.to_string(),
            line: instr.line,
        })
}

/// Único ponto de validação de opcode, aridade e operandos
fn decode<'p>(instr: &'p Instruction, labels: &LabelTable) -> VmResult<Op<'p>> {
    let opcode = Opcode::from_mnemonic(&instr.mnemonic).ok_or_else(|| VmError::UnknownOpcode {
        opcode: instr.mnemonic.clone(),
        line: instr.line,
    })?;

    let args = instr.operands.as_slice();
    if args.len() < opcode.arity() {
        return Err(malformed(
            instr,
            format!(
                "expected {} operand(s), got {} (usage: {})",
                opcode.arity(),
                args.len(),
                opcode.syntax()
            ),
        ));
    }

    Ok(match opcode {
        Opcode::Set => Op::Set {
            reg: register(instr, &args[0])?,
            value: literal(instr, &args[1])?,
        },
        Opcode::Inc => Op::Inc {
            reg: register(instr, &args[0])?,
        },
        Opcode::DecJz => Op::DecJz {
            reg: register(instr, &args[0])?,
            label: &args[1],
        },
        Opcode::Goto => Op::Goto {
            target: jump_target(instr, &args[0], labels)?,
        },
        Opcode::Print => Op::Print {
            name: &args[0],
            operands: args,
        },
        Opcode::Push => Op::Push {
            reg: register(instr, &args[0])?,
        },
        Opcode::Pop => Op::Pop {
            reg: register(instr, &args[0])?,
        },
        Opcode::Get => Op::Get {
            sensor: sensor(instr, &args[0])?,
            reg: register(instr, &args[1])?,
        },
        Opcode::CJmp => {
            let sensor = sensor(instr, &args[0])?;
            let value = literal(instr, &args[2])?;
            let relop = Relop::from_name(&args[1])
                .ok_or_else(|| malformed(instr, format!("unknown relational operator '{}'", args[1])))?;
            Op::CJmp {
                sensor,
                relop,
                value,
                target: jump_target(instr, &args[3], labels)?,
            }
        }
        Opcode::Halt => Op::Halt,
    })
}

/// Máquina VMASM: dona exclusiva do estado de uma execução
pub struct Machine<'p> {
    program: &'p Program,
    config: MachineConfig,
    state: ExecutionState,
    status: Status,
    failure: Option<VmError>,
}

impl<'p> Machine<'p> {
    pub fn new(program: &'p Program, config: MachineConfig) -> Self {
        Self {
            program,
            config,
            state: ExecutionState::new(),
            status: Status::Running,
            failure: None,
        }
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Erro que levou a máquina a `Failed`
    pub fn failure(&self) -> Option<&VmError> {
        self.failure.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Executa uma instrução; em estado terminal não faz nada
    pub fn step<W: Write>(&mut self, out: &mut W) -> VmResult<Status> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        match self.execute(out) {
            Ok(status) => {
                self.status = status;
                Ok(status)
            }
            Err(err) => {
                debug!(pc = self.state.pc, steps = self.state.steps, error = %err, "run failed");
                self.status = Status::Failed;
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Executa até HALT, fim do programa ou erro
    pub fn run<W: Write>(&mut self, out: &mut W) -> VmResult<RunReport> {
        loop {
            match self.step(out)? {
                Status::Running => continue,
                Status::Halted(halt) => {
                    debug!(steps = self.state.steps, ?halt, "run halted");
                    return Ok(RunReport {
                        steps: self.state.steps,
                        halt,
                        snapshot: self.snapshot(),
                    });
                }
                Status::Failed => {
                    return Err(self
                        .failure
                        .clone()
                        .unwrap_or(VmError::StepLimitExceeded {
                            limit: self.config.step_limit,
                        }));
                }
            }
        }
    }

    fn emit<W: Write>(out: &mut W, emission: Emission) -> VmResult<()> {
        writeln!(out, "{}", emission)?;
        Ok(())
    }

    fn execute<W: Write>(&mut self, out: &mut W) -> VmResult<Status> {
        let program = self.program;
        let pc = self.state.pc;

        let Some(instr) = program.get(pc) else {
            return Ok(Status::Halted(HaltReason::EndOfProgram));
        };

        if self.state.steps >= self.config.step_limit {
            return Err(VmError::StepLimitExceeded {
                limit: self.config.step_limit,
            });
        }

        trace!(pc, line = instr.line, instr = %instr, "exec");

        let state = &mut self.state;
        let next = match decode(instr, program.labels())? {
            Op::Set { reg, value } => {
                state.registers[reg] = value;
                pc + 1
            }
            Op::Inc { reg } => {
                state.registers[reg] = state.registers[reg]
                    .checked_add(1)
                    .ok_or_else(|| overflow(instr, reg))?;
                pc + 1
            }
            Op::DecJz { reg, label } => {
                let value = state.registers[reg]
                    .checked_sub(1)
                    .ok_or_else(|| overflow(instr, reg))?;
                state.registers[reg] = value;
                if value == 0 {
                    jump_target(instr, label, program.labels())?
                } else {
                    pc + 1
                }
            }
            Op::Goto { target } => target,
            Op::Print { name, operands } => {
                let emission = if let Some(reg) = Register::from_name(name) {
                    Emission::Value {
                        name: reg.name(),
                        value: state.registers[reg],
                    }
                } else if let Some(sensor) = Sensor::from_name(name) {
                    Emission::Value {
                        name: sensor.name(),
                        value: state.sensors[sensor],
                    }
                } else {
                    Emission::Raw(operands.join(" "))
                };
                Self::emit(out, emission)?;
                pc + 1
            }
            Op::Push { reg } => {
                state.stack.push(state.registers[reg]);
                pc + 1
            }
            Op::Pop { reg } => {
                let value = state
                    .stack
                    .pop()
                    .ok_or(VmError::StackUnderflow { line: instr.line })?;
                state.registers[reg] = value;
                pc + 1
            }
            Op::Get { sensor, reg } => {
                state.registers[reg] = state.sensors[sensor];
                pc + 1
            }
            Op::CJmp {
                sensor,
                relop,
                value,
                target,
            } => {
                if relop.eval(state.sensors[sensor], value) {
                    target
                } else {
                    pc + 1
                }
            }
            Op::Halt => return Ok(Status::Halted(HaltReason::HaltInstruction)),
        };

        state.pc = next;
        state.sensors = physiology::update(&state.registers, &state.sensors);
        state.steps += 1;

        if state.steps % self.config.tick_interval.max(1) == 0 {
            Self::emit(out, Emission::Tick(state.steps))?;
        }

        if next >= program.len() {
            Ok(Status::Halted(HaltReason::EndOfProgram))
        } else {
            Ok(Status::Running)
        }
    }
}

fn overflow(instr: &Instruction, reg: Register) -> VmError {
    VmError::RegisterOverflow {
        register: reg.name().to_string(),
        line: instr.line,
    }
}
