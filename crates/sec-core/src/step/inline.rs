use crate::errors::RunnerError;

use super::{StepContext, StepDefinition};

type ActionFn = Box<dyn Fn(&mut StepContext<'_>) -> Result<(), RunnerError> + Send>;
type PreconditionFn = Box<dyn Fn() -> Result<(), String> + Send>;

/// Step respaldado por closures, para secuencias ad-hoc y tests.
pub struct InlineStep {
    id: String,
    precondition: Option<PreconditionFn>,
    action: ActionFn,
}

impl InlineStep {
    pub fn new<F>(id: impl Into<String>, action: F) -> Self
        where F: Fn(&mut StepContext<'_>) -> Result<(), RunnerError> + Send + 'static
    {
        Self { id: id.into(),
               precondition: None,
               action: Box::new(action) }
    }

    /// Reemplaza la precondición por defecto (siempre `Ok`).
    pub fn with_precondition<P>(mut self, precondition: P) -> Self
        where P: Fn() -> Result<(), String> + Send + 'static
    {
        self.precondition = Some(Box::new(precondition));
        self
    }
}

impl StepDefinition for InlineStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn check_precondition(&self) -> Result<(), String> {
        match &self.precondition {
            Some(p) => p(),
            None => Ok(()),
        }
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), RunnerError> {
        (self.action)(ctx)
    }
}
