//! # Prelude — Re-exportações Convenientes
//!
//! ```
//! use vitals_core::prelude::*;
//! ```

pub use crate::config::MachineConfig;
pub use crate::error::{VmError, VmResult};
pub use crate::machine::{HaltReason, Machine, RunReport, Status};
pub use crate::program::Program;
pub use crate::state::{Register, Sensor, Snapshot};
pub use crate::run_source;
