//! Modelo fisiológico
//!
//! Filtro discreto com taxa limitada: a cada tick os sensores andam no máximo
//! `max_delta` na direção de um alvo derivado dos registradores, e ficam
//! parados quando o alcançam.
//!
//! ```text
//! target_spo2 = clamp(85 + floor(O2/5), 80, 100)    Δmax = 1
//! target_ivlv = clamp(IV, 0, 100)                   Δmax = 2
//! target_bpm  = clamp(120 - floor(IV/2), 40, 160)   Δmax = 1
//! ```

use crate::state::{Register, Registers, Sensor, Sensors};

/// Passo máximo por tick de S_SPO2
pub const SPO2_MAX_DELTA: i64 = 1;
/// Passo máximo por tick de S_IVLV
pub const IVLV_MAX_DELTA: i64 = 2;
/// Passo máximo por tick de S_BPM
pub const BPM_MAX_DELTA: i64 = 1;

/// Alvos fisiológicos para um conjunto de registradores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    pub spo2: i64,
    pub ivlv: i64,
    pub bpm: i64,
}

impl Targets {
    pub fn from_registers(registers: &Registers) -> Self {
        let o2 = registers[Register::O2];
        let iv = registers[Register::Iv];

        // div_euclid com divisor positivo é a divisão com piso
        Self {
            spo2: o2.div_euclid(5).saturating_add(85).clamp(80, 100),
            ivlv: iv.clamp(0, 100),
            bpm: 120i64.saturating_sub(iv.div_euclid(2)).clamp(40, 160),
        }
    }
}

/// Move `current` em direção a `target`, no máximo `max_delta`, sem ultrapassar
#[inline]
pub fn step_towards(current: i64, target: i64, max_delta: i64) -> i64 {
    if current < target {
        current.saturating_add(max_delta).min(target)
    } else if current > target {
        current.saturating_sub(max_delta).max(target)
    } else {
        current
    }
}

/// Um tick do modelo: função pura dos sensores e registradores atuais
pub fn update(registers: &Registers, sensors: &Sensors) -> Sensors {
    let targets = Targets::from_registers(registers);

    let mut next = *sensors;
    next[Sensor::SpO2] = step_towards(sensors[Sensor::SpO2], targets.spo2, SPO2_MAX_DELTA);
    next[Sensor::IvLevel] = step_towards(sensors[Sensor::IvLevel], targets.ivlv, IVLV_MAX_DELTA);
    next[Sensor::Bpm] = step_towards(sensors[Sensor::Bpm], targets.bpm, BPM_MAX_DELTA);
    next
}
