//! Contexto de ejecución entregado a `StepDefinition::run`.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::event::{EventKind, EventSink, RunEvent};

/// Handle de emisión atado al step en curso. Cada mensaje sale etiquetado
/// con el id del step y numerado en orden de emisión dentro de la corrida.
pub struct StepContext<'a> {
    pub(crate) run_id: Uuid,
    pub(crate) step_id: &'a str,
    pub(crate) seq: &'a mut u64,
    pub(crate) sink: &'a mut dyn EventSink,
    pub(crate) cancel: &'a AtomicBool,
}

impl StepContext<'_> {
    /// Emite un evento con la severidad indicada.
    pub fn emit(&mut self, kind: EventKind, message: impl Into<String>) {
        let ev = RunEvent { seq: *self.seq,
                            run_id: self.run_id,
                            step: Some(self.step_id.to_string()),
                            kind,
                            message: message.into(),
                            ts: Utc::now() };
        *self.seq += 1;
        self.sink.on_event(ev);
    }

    /// Mensaje de progreso.
    pub fn info(&mut self, message: impl Into<String>) {
        self.emit(EventKind::Info, message);
    }

    /// Mensaje de error (p. ej. línea de stderr de un proceso externo).
    pub fn error(&mut self, message: impl Into<String>) {
        self.emit(EventKind::Error, message);
    }

    /// Token de cancelación cooperativa. El runner sólo lo consulta entre
    /// steps; una acción de duración no acotada puede sondearlo y devolver
    /// `RunnerError::Cancelled` para cortar temprano. Un proceso externo ya
    /// lanzado nunca se interrumpe a la fuerza (limitación conocida).
    pub fn cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    pub fn step_id(&self) -> &str {
        self.step_id
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}
