use crate::errors::RunnerError;

use super::StepContext;

/// Trait que define un Step. La política de reintentos pertenece al
/// runner, no al step: una acción no debe reintentar por su cuenta.
pub trait StepDefinition: Send {
    /// Identificador estable y único dentro de la secuencia.
    fn id(&self) -> &str;

    /// Nombre opcional amigable.
    fn name(&self) -> &str {
        self.id()
    }

    /// Precondición evaluada antes de correr la acción (p. ej. "el
    /// principal actual tiene privilegios elevados"). `Err(reason)` aborta
    /// el step sin invocar `run`; el runner registra
    /// `RunnerError::PreconditionNotMet` con esa razón.
    fn check_precondition(&self) -> Result<(), String> {
        Ok(())
    }

    /// Acción del step. Puede invocar procesos externos o tocar el
    /// filesystem; cualquier falla se devuelve tipada, nunca como panic.
    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), RunnerError>;
}
