//! Configuração da máquina
//!
//! Valores padrão fixos, com override opcional via `.env` ou variáveis de
//! ambiente (`VITALS_STEP_LIMIT`, `VITALS_TICK_INTERVAL`).

use std::env;
use once_cell::sync::Lazy;

/// Limite padrão de passos (anti-loop infinito)
pub const DEFAULT_STEP_LIMIT: u64 = 100_000;

/// Intervalo padrão entre marcadores de ciclo
pub const DEFAULT_TICK_INTERVAL: u64 = 100;

// Carrega o .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_u64(key: &str) -> Option<u64> {
    ensure_loaded();
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Limite de passos do ambiente
/// Default: 100000
pub fn step_limit() -> u64 {
    env_u64("VITALS_STEP_LIMIT").unwrap_or(DEFAULT_STEP_LIMIT)
}

/// Intervalo de ticks do ambiente (0 é ignorado)
/// Default: 100
pub fn tick_interval() -> u64 {
    env_u64("VITALS_TICK_INTERVAL")
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_TICK_INTERVAL)
}

/// Configuração de uma execução
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Máximo de instruções executadas (não-HALT)
    pub step_limit: u64,
    /// A cada quantos passos emitir `--- ciclo N ---`
    pub tick_interval: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl MachineConfig {
    /// Carrega do ambiente
    pub fn from_env() -> Self {
        Self {
            step_limit: step_limit(),
            tick_interval: tick_interval(),
        }
    }

    /// Define o limite de passos
    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Define o intervalo de ticks
    pub fn with_tick_interval(mut self, tick_interval: u64) -> Self {
        self.tick_interval = tick_interval.max(1);
        self
    }
}
