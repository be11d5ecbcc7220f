//! secflow: menú interactivo del utilitario de seguridad.
//!
//! El front-end es dueño de la presentación: despacha cada secuencia a un
//! hilo worker y drena los eventos desde este hilo vía canal, igual que
//! haría un widget de texto. El core nunca imprime por su cuenta.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use sec_adapters::config::CatalogConfig;
use sec_adapters::{catalog, privilege};
use sec_core::{EventKind, RunEvent, RunOutcome, RunReport, TaskRunner, TaskSequence};

fn main() {
    // Cargar .env si existe para la configuración SECFLOW_*
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .init();

    let runner = Arc::new(TaskRunner::new());
    {
        let runner = Arc::clone(&runner);
        if let Err(e) = ctrlc::set_handler(move || runner.cancel()) {
            tracing::warn!("could not install Ctrl-C handler: {e}");
        }
    }

    if !privilege::effective_uid_is_root() {
        tracing::warn!("not running as root; privileged steps will fail their precondition");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_menu();
        let choice = match read_trimmed(&mut lines) {
            Some(c) => c,
            None => break, // EOF
        };

        let cfg = CatalogConfig::from_env();
        let sequence = match choice.as_str() {
            "1" => catalog::update_system(&cfg),
            "2" => catalog::harden_system(&cfg),
            "3" => catalog::security_audit(&cfg),
            "4" => {
                let target = match prompt_target(&mut lines, &cfg) {
                    Some(t) => t,
                    None => continue,
                };
                catalog::service_scan(&target, &cfg)
            }
            "0" | "q" => break,
            "" => continue,
            other => {
                println!("Opción inválida: {other}");
                continue;
            }
        };

        run_sequence(Arc::clone(&runner), sequence);
    }
}

fn print_menu() {
    println!();
    println!("secflow - Linux Security Utility");
    println!("  1. Update System");
    println!("  2. Harden System");
    println!("  3. Security Audit");
    println!("  4. Service Scan");
    println!("  0. Exit");
    print!("Choose an option: ");
    let _ = io::stdout().flush();
}

fn read_trimmed(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next()?.ok().map(|l| l.trim().to_string())
}

fn prompt_target(lines: &mut impl Iterator<Item = io::Result<String>>, cfg: &CatalogConfig) -> Option<String> {
    let hint = cfg.default_target.as_deref().unwrap_or("");
    print!("Target host/URL [{hint}]: ");
    let _ = io::stdout().flush();
    let typed = read_trimmed(lines)?;
    if !typed.is_empty() {
        return Some(typed);
    }
    match &cfg.default_target {
        Some(t) => Some(t.clone()),
        None => {
            println!("Se necesita un target (o definir SECFLOW_TARGET).");
            None
        }
    }
}

/// Despacha la corrida a un worker y renderiza eventos desde este hilo.
fn run_sequence(runner: Arc<TaskRunner>, sequence: TaskSequence) {
    let (tx, rx) = mpsc::channel::<RunEvent>();
    let worker = thread::spawn(move || {
        let mut sink = tx; // Sender implementa EventSink
        runner.run(&sequence, &mut sink)
    });

    // El canal cierra cuando el worker suelta el sender.
    for ev in rx {
        let scope = ev.step.as_deref().unwrap_or("runner");
        let mark = match ev.kind {
            EventKind::Info => ' ',
            EventKind::Error => '!',
        };
        println!("{mark}[{}] {scope}: {}", ev.ts.format("%H:%M:%S"), ev.message);
    }

    match worker.join() {
        Ok(Ok(report)) => print_report(&report),
        Ok(Err(e)) => println!("Corrida rechazada: {e}"),
        Err(_) => println!("El worker terminó abruptamente."),
    }
}

fn print_report(report: &RunReport) {
    match report.outcome {
        RunOutcome::Success => {
            println!("Completado: {} step(s).", report.completed_steps.len());
        }
        RunOutcome::Failed => {
            if let Some(f) = &report.failure {
                println!("Falló en '{}': {}", f.step, f.error);
            }
            println!("Steps completados antes de la falla: {:?}", report.completed_steps);
        }
        RunOutcome::Aborted => {
            println!("Abortado a pedido; {} step(s) completados.", report.completed_steps.len());
        }
    }
    if std::env::var("SECFLOW_REPORT_JSON").is_ok() {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("report serialization failed: {e}"),
        }
    }
}
