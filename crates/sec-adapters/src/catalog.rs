//! Catálogo de secuencias: los comandos concretos del utilitario.
//!
//! Cada builder arma una `TaskSequence` fresca por corrida; el core nunca
//! conoce estos comandos. Los steps que tocan el sistema exigen root como
//! precondición.

use sec_core::{build_sequence, StepDefinition, TaskSequence};

use crate::config::CatalogConfig;
use crate::steps::{CommandStep, HttpProbeStep, ReplaceInFileStep};

pub const UPDATE_SYSTEM: &str = "update-system";
pub const HARDEN_SYSTEM: &str = "harden-system";
pub const SECURITY_AUDIT: &str = "security-audit";
pub const SERVICE_SCAN: &str = "service-scan";

/// Nombres expuestos a los front-ends, en orden de menú.
pub const SEQUENCES: &[&str] = &[UPDATE_SYSTEM, HARDEN_SYSTEM, SECURITY_AUDIT, SERVICE_SCAN];

fn root_cmd(id: &str, program: &str, args: &[&str]) -> Box<dyn StepDefinition> {
    Box::new(CommandStep::new(id, program, args).requiring_root())
}

/// Actualiza listas y paquetes e instala el herramental de seguridad.
pub fn update_system(cfg: &CatalogConfig) -> TaskSequence {
    let mut upgrade = CommandStep::new("upgrade-packages", "apt-get", &["upgrade"]).requiring_root();
    let mut install = CommandStep::new("install-tools", "apt-get", &["install"]).requiring_root();
    if cfg.apt_assume_yes {
        upgrade = upgrade.arg("-y");
        install = install.arg("-y");
    }
    for tool in &cfg.security_tools {
        install = install.arg(tool);
    }

    build_sequence(vec![root_cmd("update-lists", "apt-get", &["update"]),
                        Box::new(upgrade),
                        Box::new(install)])
}

/// Endurece el sistema: servicios, sshd, firewall y política de claves.
pub fn harden_system(_cfg: &CatalogConfig) -> TaskSequence {
    let secure_sshd =
        ReplaceInFileStep::new("secure-sshd",
                               "/etc/ssh/sshd_config",
                               &[("#PermitRootLogin yes", "PermitRootLogin no"),
                                 ("#PasswordAuthentication yes", "PasswordAuthentication no")]).requiring_root();
    let password_aging =
        ReplaceInFileStep::new("password-aging",
                               "/etc/login.defs",
                               &[("PASS_MAX_DAYS\t99999", "PASS_MAX_DAYS\t90"),
                                 ("PASS_MIN_DAYS\t0", "PASS_MIN_DAYS\t10")]).requiring_root();

    build_sequence(vec![root_cmd("disable-cups", "systemctl", &["disable", "cups"]),
                        root_cmd("disable-bluetooth", "systemctl", &["disable", "bluetooth"]),
                        Box::new(secure_sshd),
                        root_cmd("restart-sshd", "systemctl", &["restart", "sshd"]),
                        root_cmd("ufw-deny-incoming", "ufw", &["default", "deny", "incoming"]),
                        root_cmd("ufw-allow-outgoing", "ufw", &["default", "allow", "outgoing"]),
                        root_cmd("ufw-allow-ssh", "ufw", &["allow", "ssh"]),
                        // --force: la corrida es no interactiva, sin tty para confirmar
                        root_cmd("ufw-enable", "ufw", &["--force", "enable"]),
                        Box::new(password_aging)])
}

/// Corre los escáneres de rootkits y la auditoría del sistema.
pub fn security_audit(_cfg: &CatalogConfig) -> TaskSequence {
    build_sequence(vec![root_cmd("rkhunter-update", "rkhunter", &["--update"]),
                        // --sk: sin pausas de teclado entre chequeos
                        root_cmd("rkhunter-check", "rkhunter", &["--check", "--sk"]),
                        root_cmd("chkrootkit", "chkrootkit", &[]),
                        root_cmd("lynis-audit", "lynis", &["audit", "system"])])
}

/// Escaneo de servicios de un target propio: nmap TCP connect más sonda
/// HTTP de alcanzabilidad. No requiere root.
pub fn service_scan(target: &str, cfg: &CatalogConfig) -> TaskSequence {
    let host = host_of(target);
    let url = url_of(target);
    let probe = HttpProbeStep::new("http-reachability", url).with_timeout(cfg.probe_timeout);

    build_sequence(vec![Box::new(CommandStep::new("nmap-connect-scan", "nmap", &["-sT", host.as_str()])),
                        Box::new(probe)])
}

/// Resuelve un nombre de catálogo. `service-scan` necesita target.
pub fn build(name: &str, target: Option<&str>, cfg: &CatalogConfig) -> Option<TaskSequence> {
    match name {
        UPDATE_SYSTEM => Some(update_system(cfg)),
        HARDEN_SYSTEM => Some(harden_system(cfg)),
        SECURITY_AUDIT => Some(security_audit(cfg)),
        SERVICE_SCAN => target.map(|t| service_scan(t, cfg)),
        _ => None,
    }
}

/// Host pelado para nmap: sin esquema ni path.
fn host_of(target: &str) -> String {
    let stripped = target.trim_start_matches("https://").trim_start_matches("http://");
    stripped.split('/').next().unwrap_or(stripped).to_string()
}

/// URL completa para la sonda: antepone `http://` si falta el esquema.
fn url_of(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{target}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn cfg() -> CatalogConfig {
        CatalogConfig { security_tools: vec!["ufw".to_string(), "lynis".to_string()],
                        apt_assume_yes: true,
                        probe_timeout: Duration::from_secs(5),
                        default_target: None }
    }

    #[test]
    fn update_system_step_order() {
        let seq = update_system(&cfg());
        assert_eq!(seq.step_ids(), vec!["update-lists", "upgrade-packages", "install-tools"]);
    }

    #[test]
    fn harden_system_configures_firewall_after_sshd() {
        let ids = harden_system(&cfg()).step_ids()
                                       .iter()
                                       .map(|s| s.to_string())
                                       .collect::<Vec<_>>();
        let sshd = ids.iter().position(|s| s == "restart-sshd").expect("sshd step");
        let ufw = ids.iter().position(|s| s == "ufw-enable").expect("ufw step");
        assert!(sshd < ufw, "ssh must be allowed and restarted before enabling ufw");
    }

    #[test]
    fn security_audit_runs_every_scanner() {
        let seq = security_audit(&cfg());
        assert_eq!(seq.step_ids(),
                   vec!["rkhunter-update", "rkhunter-check", "chkrootkit", "lynis-audit"]);
    }

    #[test]
    fn build_rejects_unknown_names() {
        assert!(build("format-disk", None, &cfg()).is_none());
    }

    #[test]
    fn service_scan_needs_a_target() {
        assert!(build(SERVICE_SCAN, None, &cfg()).is_none());
        assert!(build(SERVICE_SCAN, Some("http://localhost:8080"), &cfg()).is_some());
    }

    #[test]
    fn target_normalization() {
        assert_eq!(host_of("http://example.test/login"), "example.test");
        assert_eq!(host_of("example.test"), "example.test");
        assert_eq!(url_of("example.test"), "http://example.test");
        assert_eq!(url_of("https://example.test"), "https://example.test");
    }
}
