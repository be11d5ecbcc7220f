//! Runner secuencial con semántica fail-fast.
//!
//! Provee el ejecutor (`TaskRunner`), su máquina de estados por corrida y
//! el reporte final estructurado.

pub mod core;
pub mod report;
pub mod state;

pub use core::TaskRunner;
pub use report::{RunFailure, RunOutcome, RunReport};
pub use state::RunnerState;
