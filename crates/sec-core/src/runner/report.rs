//! Reporte final de una corrida.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::RunnerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Success,
    Failed,
    Aborted,
}

/// Primer step que no completó, con su error tipado. El `Display` del
/// error ya incluye comando y código de salida cuando aplica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    pub step: String,
    pub error: RunnerError,
}

/// Resultado estructurado de una invocación del runner.
///
/// Invariantes:
/// - `completed_steps` es prefijo estricto de la secuencia enviada.
/// - `outcome == Failed` implica `failure = Some` apuntando al primer step
///   que no completó.
/// - `outcome == Aborted` lleva `failure = None`: la cancelación pedida por
///   el usuario no es una falla.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub sequence_digest: String,
    pub outcome: RunOutcome,
    pub completed_steps: Vec<String>,
    pub failure: Option<RunFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, RunOutcome::Success)
    }
}
