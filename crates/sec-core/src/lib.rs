//! sec-core: Motor secuencial de tareas de seguridad
//!
//! Ejecuta secuencias ordenadas de pasos privilegiados con semántica
//! stop-on-failure, emitiendo eventos de progreso hacia un `EventSink`
//! provisto por el consumidor y produciendo un `RunReport` estructurado.
//! El core no renderiza, no escribe archivos y no conoce comandos
//! concretos; esas responsabilidades viven en los adapters y binarios.
pub mod constants;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod runner;
pub mod sequence;
pub mod step;

pub use errors::RunnerError;
pub use event::{CollectSink, EventKind, EventSink, RunEvent};
pub use runner::{RunFailure, RunOutcome, RunReport, RunnerState, TaskRunner};
pub use sequence::{build_sequence, TaskSequence};
pub use step::{InlineStep, StepContext, StepDefinition};
