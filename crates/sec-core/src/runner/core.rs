//! Implementación del TaskRunner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::RunnerError;
use crate::event::{EventKind, EventSink, RunEvent};
use crate::runner::{RunFailure, RunOutcome, RunReport, RunnerState};
use crate::sequence::TaskSequence;
use crate::step::StepContext;

/// Ejecutor secuencial de tareas privilegiadas.
///
/// Responsable de recorrer la secuencia en orden, reenviar cada evento
/// emitido al sink del consumidor y detenerse en la primera precondición o
/// acción fallida (stop-on-failure, sin continuación parcial). Es el único
/// estado mutable compartido: a lo sumo una corrida activa por instancia;
/// una segunda llamada a `run()` mientras hay corrida en curso se rechaza
/// con `AlreadyRunning` en vez de encolarse.
pub struct TaskRunner {
    state: Mutex<RunnerState>,
    cancel: AtomicBool,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self { state: Mutex::new(RunnerState::Idle),
               cancel: AtomicBool::new(false) }
    }

    fn state_guard(&self) -> MutexGuard<'_, RunnerState> {
        // Un lock envenenado sólo puede venir de un panic ajeno; el estado
        // sigue siendo legible.
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Estado actual, consultable desde cualquier hilo.
    pub fn state(&self) -> RunnerState {
        *self.state_guard()
    }

    /// Solicita el aborto cooperativo de la corrida en curso (o de la
    /// próxima, si aún no arrancó). El flag se consulta entre steps: el
    /// step en vuelo termina su frontera de emisión y no se arranca el
    /// siguiente. Sobre un runner ya terminado no tiene efecto.
    pub fn cancel(&self) {
        let st = self.state();
        if matches!(st, RunnerState::Idle | RunnerState::Running) {
            self.cancel.store(true, Ordering::SeqCst);
        }
    }

    /// Ejecuta la secuencia completa y devuelve el reporte final.
    ///
    /// Síncrono desde la perspectiva del caller; se espera invocado desde
    /// un hilo worker dedicado. Los eventos salen por `sink` en el orden
    /// exacto de emisión; el evento resumen del runner cierra cada corrida
    /// (también las exitosas y la secuencia vacía).
    pub fn run(&self, sequence: &TaskSequence, sink: &mut dyn EventSink) -> Result<RunReport, RunnerError> {
        {
            let mut st = self.state_guard();
            if matches!(*st, RunnerState::Running) {
                return Err(RunnerError::AlreadyRunning);
            }
            *st = RunnerState::Running;
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut seq: u64 = 0;
        let mut completed: Vec<String> = Vec::new();
        let mut failure: Option<RunFailure> = None;
        let mut aborted = false;

        for step in sequence.steps.iter() {
            if self.cancel.load(Ordering::SeqCst) {
                aborted = true;
                break;
            }

            if let Err(reason) = step.check_precondition() {
                failure = Some(RunFailure { step: step.id().to_string(),
                                            error: RunnerError::PreconditionNotMet { reason } });
                break;
            }

            let result = {
                let mut ctx = StepContext { run_id,
                                            step_id: step.id(),
                                            seq: &mut seq,
                                            sink: &mut *sink,
                                            cancel: &self.cancel };
                step.run(&mut ctx)
            };

            match result {
                Ok(()) => completed.push(step.id().to_string()),
                // La acción observó el token y cortó temprano: mismo
                // tratamiento que el aborto entre steps, no una falla.
                Err(RunnerError::Cancelled) => {
                    aborted = true;
                    break;
                }
                Err(error) => {
                    failure = Some(RunFailure { step: step.id().to_string(), error });
                    break;
                }
            }
        }

        let outcome = if aborted {
            RunOutcome::Aborted
        } else if failure.is_some() {
            RunOutcome::Failed
        } else {
            RunOutcome::Success
        };

        let (kind, message) = match (&outcome, &failure) {
            (RunOutcome::Failed, Some(f)) => (EventKind::Error, format!("step '{}' failed: {}", f.step, f.error)),
            (RunOutcome::Aborted, _) => {
                (EventKind::Info, format!("run aborted after {} completed step(s)", completed.len()))
            }
            _ => (EventKind::Info, format!("sequence completed: {} step(s)", completed.len())),
        };
        sink.on_event(RunEvent { seq,
                                 run_id,
                                 step: None,
                                 kind,
                                 message,
                                 ts: Utc::now() });

        // Un cancel tardío no debe envenenar la próxima corrida.
        self.cancel.store(false, Ordering::SeqCst);
        {
            let mut st = self.state_guard();
            *st = match outcome {
                RunOutcome::Success => RunnerState::Completed,
                RunOutcome::Failed => RunnerState::Failed,
                RunOutcome::Aborted => RunnerState::Aborted,
            };
        }

        let report = RunReport { run_id,
                                 sequence_digest: sequence.digest.clone(),
                                 outcome,
                                 completed_steps: completed,
                                 failure,
                                 started_at,
                                 finished_at: Utc::now() };
        debug_assert!(matches!(report.outcome, RunOutcome::Failed) == report.failure.is_some());
        Ok(report)
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CollectSink;
    use crate::sequence::build_sequence;

    #[test]
    fn empty_sequence_completes_immediately() {
        let runner = TaskRunner::new();
        let mut sink = CollectSink::default();
        let report = runner.run(&build_sequence(vec![]), &mut sink)
                           .expect("run ok");

        assert_eq!(report.outcome, RunOutcome::Success);
        assert!(report.completed_steps.is_empty());
        assert!(report.failure.is_none());
        // Sin eventos de step; sólo el resumen del runner.
        assert_eq!(sink.events.len(), 1);
        assert!(sink.events[0].step.is_none());
        assert_eq!(runner.state(), RunnerState::Completed);
    }

    #[test]
    fn runner_starts_idle() {
        let runner = TaskRunner::new();
        assert_eq!(runner.state(), RunnerState::Idle);
    }
}
