//! Carga de configuración del catálogo desde variables de entorno.
//! Convención `SECFLOW_*`; valores opcionales con defaults seguros.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Herramientas instaladas por la secuencia de actualización cuando
/// `SECFLOW_SECURITY_TOOLS` no está definida.
pub const DEFAULT_SECURITY_TOOLS: &[&str] =
    &["ufw", "fail2ban", "rkhunter", "clamav", "chkrootkit", "lynis", "unattended-upgrades"];

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Lista de paquetes de seguridad a instalar (coma-separada en el env).
    pub security_tools: Vec<String>,
    /// Pasa `-y` a apt-get (default: sí; las corridas son no interactivas).
    pub apt_assume_yes: bool,
    /// Timeout de la sonda HTTP.
    pub probe_timeout: Duration,
    /// Target por defecto para la secuencia de escaneo.
    pub default_target: Option<String>,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let security_tools = env::var("SECFLOW_SECURITY_TOOLS")
            .ok()
            .map(|v| {
                v.split(',')
                 .map(|s| s.trim().to_string())
                 .filter(|s| !s.is_empty())
                 .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SECURITY_TOOLS.iter().map(|s| s.to_string()).collect());
        let apt_assume_yes = env::var("SECFLOW_APT_ASSUME_YES")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let probe_timeout = env::var("SECFLOW_PROBE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));
        let default_target = env::var("SECFLOW_TARGET").ok().filter(|v| !v.trim().is_empty());
        Self { security_tools,
               apt_assume_yes,
               probe_timeout,
               default_target }
    }
}
