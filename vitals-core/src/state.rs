//! Estado da máquina
//!
//! Registradores (ações de dosagem), sensores (leituras simuladas) e o
//! snapshot serializável do estado de uma execução.

use serde::Serialize;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Registrador gravável pelo programa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Register {
    /// Oxigênio ofertado
    O2 = 0,
    /// Fluido intravenoso
    Iv = 1,
}

impl Register {
    pub const ALL: [Register; 2] = [Register::O2, Register::Iv];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::O2 => "O2",
            Self::Iv => "IV",
        }
    }

    /// Busca pelo nome, sem diferenciar maiúsculas
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "O2" => Some(Self::O2),
            "IV" => Some(Self::Iv),
            _ => None,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sensor somente-leitura, atualizado pelo modelo fisiológico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Sensor {
    /// Saturação de oxigênio
    SpO2 = 0,
    /// Frequência cardíaca
    Bpm = 1,
    /// Nível de fluido
    IvLevel = 2,
}

impl Sensor {
    pub const ALL: [Sensor; 3] = [Sensor::SpO2, Sensor::Bpm, Sensor::IvLevel];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::SpO2 => "S_SPO2",
            Self::Bpm => "S_BPM",
            Self::IvLevel => "S_IVLV",
        }
    }

    /// Valor inicial de cada sensor
    pub const fn default_value(&self) -> i64 {
        match self {
            Self::SpO2 => 95,
            Self::Bpm => 80,
            Self::IvLevel => 50,
        }
    }

    /// Busca pelo nome, sem diferenciar maiúsculas
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "S_SPO2" => Some(Self::SpO2),
            "S_BPM" => Some(Self::Bpm),
            "S_IVLV" => Some(Self::IvLevel),
            _ => None,
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Banco de registradores {O2, IV}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    values: [i64; 2],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, register: Register, value: i64) -> Self {
        self[register] = value;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Register, i64)> + '_ {
        Register::ALL.into_iter().map(move |r| (r, self[r]))
    }
}

impl Index<Register> for Registers {
    type Output = i64;

    fn index(&self, register: Register) -> &i64 {
        &self.values[register as usize]
    }
}

impl IndexMut<Register> for Registers {
    fn index_mut(&mut self, register: Register) -> &mut i64 {
        &mut self.values[register as usize]
    }
}

/// Leituras dos sensores {S_SPO2, S_BPM, S_IVLV}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensors {
    values: [i64; 3],
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            values: Sensor::ALL.map(|s| s.default_value()),
        }
    }
}

impl Sensors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sensor: Sensor, value: i64) -> Self {
        self[sensor] = value;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sensor, i64)> + '_ {
        Sensor::ALL.into_iter().map(move |s| (s, self[s]))
    }
}

impl Index<Sensor> for Sensors {
    type Output = i64;

    fn index(&self, sensor: Sensor) -> &i64 {
        &self.values[sensor as usize]
    }
}

impl IndexMut<Sensor> for Sensors {
    fn index_mut(&mut self, sensor: Sensor) -> &mut i64 {
        &mut self.values[sensor as usize]
    }
}

/// Estado mutável de uma execução
#[derive(Debug, Clone, Default)]
pub struct ExecutionState {
    /// Contador de programa
    pub pc: usize,
    /// Instruções executadas (exceto HALT)
    pub steps: u64,
    pub registers: Registers,
    pub sensors: Sensors,
    pub stack: Vec<i64>,
}

impl ExecutionState {
    /// Estado inicial: pc=0, registradores zerados, sensores padrão
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.pc,
            steps: self.steps,
            registers: self.registers.iter().map(|(r, v)| (r.name(), v)).collect(),
            sensors: self.sensors.iter().map(|(s, v)| (s.name(), v)).collect(),
            stack: self.stack.clone(),
        }
    }
}

/// Cópia serializável do estado
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub pc: usize,
    pub steps: u64,
    pub registers: Vec<(&'static str, i64)>,
    pub sensors: Vec<(&'static str, i64)>,
    pub stack: Vec<i64>,
}

impl Snapshot {
    pub fn register(&self, register: Register) -> i64 {
        self.registers[register as usize].1
    }

    pub fn sensor(&self, sensor: Sensor) -> i64 {
        self.sensors[sensor as usize].1
    }
}
