//! CommandStep: un comando externo como unidad de secuencia.
//!
//! - Emite la línea de comando y cada línea de stdout como eventos Info a
//!   medida que llegan; stderr sale como eventos Error al cierre del
//!   stream.
//! - Salida no-cero, muerte por señal y fallo de spawn se mapean a
//!   `RunnerError::ExternalCommandFailed` con comando y código capturados.
//! - Sin reintentos propios: esa política pertenece al runner.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::thread;

use sec_core::{RunnerError, StepContext, StepDefinition};

use crate::privilege;

pub struct CommandStep {
    id: String,
    program: String,
    args: Vec<String>,
    requires_root: bool,
}

impl CommandStep {
    pub fn new(id: impl Into<String>, program: impl Into<String>, args: &[&str]) -> Self {
        Self { id: id.into(),
               program: program.into(),
               args: args.iter().map(|a| a.to_string()).collect(),
               requires_root: false }
    }

    /// Agrega un argumento construido dinámicamente.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Exige uid efectivo 0 como precondición del step.
    pub fn requiring_root(mut self) -> Self {
        self.requires_root = true;
        self
    }

    fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for a in &self.args {
            line.push(' ');
            line.push_str(a);
        }
        line
    }

    fn spawn_error(&self, detail: String) -> RunnerError {
        RunnerError::ExternalCommandFailed { command: self.command_line(),
                                             code: None,
                                             detail }
    }
}

impl StepDefinition for CommandStep {
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
        let command_line = self.command_line();
        ctx.info(format!("$ {command_line}"));
        tracing::debug!(command = %command_line, "spawning external command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(format!("spawn failed: {e}")))?;

        // stderr se drena en un hilo auxiliar; leer los dos pipes desde un
        // solo hilo puede bloquear al proceso hijo cuando uno se llena.
        let stderr = child.stderr.take();
        let stderr_drain = thread::spawn(move || {
            let mut lines = Vec::new();
            if let Some(err) = stderr {
                for line in BufReader::new(err).lines().map_while(Result::ok) {
                    lines.push(line);
                }
            }
            lines
        });

        if let Some(out) = child.stdout.take() {
            for line in BufReader::new(out).lines().map_while(Result::ok) {
                ctx.info(line);
            }
        }

        for line in stderr_drain.join().unwrap_or_default() {
            ctx.error(line);
        }

        let status = child.wait()
                          .map_err(|e| self.spawn_error(format!("wait failed: {e}")))?;
        if status.success() {
            tracing::debug!(command = %command_line, "command completed");
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(RunnerError::exit_failure(command_line, code)),
            None => Err(RunnerError::ExternalCommandFailed { command: command_line,
                                                             code: None,
                                                             detail: "terminated by signal".to_string() }),
        }
    }
}
