//! ReplaceInFileStep: edición in-place de archivos de configuración.
//!
//! Aplica sustituciones literales en orden (p. ej. endurecer
//! `sshd_config`). Un patrón ausente no es falla: se reporta como evento y
//! la secuencia continúa — el archivo puede venir ya endurecido de una
//! corrida previa.

use std::fs;
use std::path::PathBuf;

use sec_core::{RunnerError, StepContext, StepDefinition};

use crate::privilege;

pub struct ReplaceInFileStep {
    id: String,
    path: PathBuf,
    replacements: Vec<(String, String)>,
    requires_root: bool,
}

impl ReplaceInFileStep {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, replacements: &[(&str, &str)]) -> Self {
        Self { id: id.into(),
               path: path.into(),
               replacements: replacements.iter()
                                         .map(|(from, to)| (from.to_string(), to.to_string()))
                                         .collect(),
               requires_root: false }
    }

    pub fn requiring_root(mut self) -> Self {
        self.requires_root = true;
        self
    }

    fn io_error(&self, detail: String) -> RunnerError {
        RunnerError::ExternalCommandFailed { command: format!("edit {}", self.path.display()),
                                             code: None,
                                             detail }
    }
}

impl StepDefinition for ReplaceInFileStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn check_precondition(&self) -> Result<(), String> {
        if self.requires_root {
            privilege::require_root()
        } else {
            Ok(())
        }
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), RunnerError> {
        ctx.info(format!("editing {}", self.path.display()));
        let mut contents = fs::read_to_string(&self.path)
            .map_err(|e| self.io_error(format!("read failed: {e}")))?;

        let mut changed = false;
        for (from, to) in &self.replacements {
            if contents.contains(from.as_str()) {
                contents = contents.replace(from.as_str(), to.as_str());
                changed = true;
                ctx.info(format!("replaced '{from}'"));
            } else {
                ctx.info(format!("pattern not present: '{from}'"));
            }
        }

        if changed {
            fs::write(&self.path, contents)
                .map_err(|e| self.io_error(format!("write failed: {e}")))?;
        }
        Ok(())
    }
}
