//! Tipos de evento de una corrida y estructura `RunEvent`.
//!
//! Rol en el flujo:
//! - Cada corrida del `TaskRunner` emite eventos hacia un `EventSink`
//!   provisto por el consumidor (widget, terminal, archivo de log).
//! - La emisión es fire-and-forget: el evento transfiere su propiedad al
//!   sink y nunca se retracta, incluso si el step que lo produjo falla
//!   después.
//! - El orden de entrega es exactamente el orden de emisión; el evento
//!   resumen del runner es siempre el último de la corrida.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severidad del mensaje. `Error` cubre stderr de procesos externos y los
/// resúmenes de falla del runner; todo lo demás es `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el runner (orden de emisión dentro de la corrida)
    pub run_id: Uuid,
    /// `Some(id)` para eventos emitidos por un step; `None` para el evento
    /// resumen que emite el propio runner al cerrar la corrida.
    pub step: Option<String>,
    pub kind: EventKind,
    pub message: String,
    pub ts: DateTime<Utc>, // metadato de presentación (no afecta orden)
}
