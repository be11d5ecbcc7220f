//! HttpProbeStep: sonda HTTP de alcanzabilidad y contenido.
//!
//! Uso defensivo: verificar que un servicio sigue respondiendo después de
//! aplicar reglas de firewall o reinicios de la secuencia de hardening.

use std::time::Duration;

use reqwest::blocking::Client;
use sec_core::{RunnerError, StepContext, StepDefinition};

const PROBE_USER_AGENT: &str = concat!("secflow/", env!("CARGO_PKG_VERSION"));

pub struct HttpProbeStep {
    id: String,
    url: String,
    expect_substring: Option<String>,
    timeout: Duration,
}

impl HttpProbeStep {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self { id: id.into(),
               url: url.into(),
               expect_substring: None,
               timeout: Duration::from_secs(10) }
    }

    /// Exige además que el cuerpo contenga el fragmento dado.
    pub fn expecting(mut self, substring: impl Into<String>) -> Self {
        self.expect_substring = Some(substring.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn probe_error(&self, code: Option<i32>, detail: String) -> RunnerError {
        RunnerError::ExternalCommandFailed { command: format!("GET {}", self.url),
                                             code,
                                             detail }
    }
}

impl StepDefinition for HttpProbeStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<(), RunnerError> {
        ctx.info(format!("probing {}", self.url));
        let client = Client::builder().timeout(self.timeout)
                                      .user_agent(PROBE_USER_AGENT)
                                      .build()
                                      .map_err(|e| self.probe_error(None, format!("client build failed: {e}")))?;

        let response = client.get(self.url.as_str())
                             .send()
                             .map_err(|e| self.probe_error(None, format!("request failed: {e}")))?;
        let status = response.status();
        ctx.info(format!("status {status}"));

        if !status.is_success() {
            return Err(self.probe_error(Some(i32::from(status.as_u16())), format!("status {status}")));
        }

        if let Some(needle) = &self.expect_substring {
            let body = response.text()
                               .map_err(|e| self.probe_error(None, format!("body read failed: {e}")))?;
            if body.contains(needle.as_str()) {
                ctx.info(format!("response contains '{needle}'"));
            } else {
                return Err(self.probe_error(None, format!("response does not contain '{needle}'")));
            }
        }
        Ok(())
    }
}
