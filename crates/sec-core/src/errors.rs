//! Errores tipados del runner (contrato estable hacia eventos y reportes).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Toda falla cruza el límite Step/Runner como valor tipado; nunca como
/// panic. `ExternalCommandFailed` conserva comando y código de salida para
/// que el reporte sea diagnosticable sin leer código fuente.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum RunnerError {
    #[error("precondition not met: {reason}")]
    PreconditionNotMet { reason: String },
    /// Salida no-cero, muerte por señal (code = None) o fallo de spawn.
    #[error("command '{command}' failed: {detail}")]
    ExternalCommandFailed {
        command: String,
        code: Option<i32>,
        detail: String,
    },
    #[error("runner is already executing a sequence")] AlreadyRunning,
    /// Un step observó el token de cancelación y se detuvo temprano. El
    /// runner lo convierte en outcome `Aborted`, no en falla.
    #[error("step stopped on cancellation request")] Cancelled,
    #[error("internal: {0}")] Internal(String),
}

impl RunnerError {
    /// Constructor para la salida no-cero de un proceso externo.
    pub fn exit_failure(command: impl Into<String>, code: i32) -> Self {
        RunnerError::ExternalCommandFailed { command: command.into(),
                                             code: Some(code),
                                             detail: format!("exit code {code}") }
    }
}
