//! CLI scripteable: `sec-cli list` y `sec-cli run <sequence>`.

use std::process;
use std::sync::Arc;

use sec_adapters::config::CatalogConfig;
use sec_adapters::{catalog, privilege};
use sec_core::{EventKind, EventSink, RunEvent, RunOutcome, TaskRunner};

/// Sink de terminal: Info a stdout, Error a stderr.
struct TerminalSink;

impl EventSink for TerminalSink {
    fn on_event(&mut self, ev: RunEvent) {
        let scope = ev.step.as_deref().unwrap_or("runner");
        let line = format!("[{}] {scope}: {}", ev.ts.format("%H:%M:%S"), ev.message);
        match ev.kind {
            EventKind::Info => println!("{line}"),
            EventKind::Error => eprintln!("{line}"),
        }
    }
}

fn main() {
    // Cargar .env si existe para la configuración SECFLOW_*
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "list" {
        for name in catalog::SEQUENCES {
            println!("{name}");
        }
        process::exit(0);
    }

    if args.len() >= 3 && args[1] == "run" {
        let name = args[2].as_str();
        let mut target: Option<String> = None;
        let mut report_json = false;
        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--target" => {
                    i += 1;
                    if i < args.len() {
                        target = Some(args[i].clone());
                    }
                }
                "--report-json" => report_json = true,
                other => {
                    eprintln!("[sec-cli] argumento desconocido: {other}");
                    process::exit(2);
                }
            }
            i += 1;
        }

        if !catalog::SEQUENCES.contains(&name) {
            eprintln!("[sec-cli] secuencia desconocida: {name} (ver `sec-cli list`)");
            process::exit(4);
        }

        let cfg = CatalogConfig::from_env();
        if target.is_none() {
            target = cfg.default_target.clone();
        }
        let sequence = match catalog::build(name, target.as_deref(), &cfg) {
            Some(s) => s,
            None => {
                eprintln!("[sec-cli] '{name}' requiere --target <URL|host> (o SECFLOW_TARGET)");
                process::exit(2);
            }
        };

        if !privilege::effective_uid_is_root() {
            tracing::warn!("not running as root; privileged steps will fail their precondition");
        }

        let runner = Arc::new(TaskRunner::new());
        {
            let runner = Arc::clone(&runner);
            if let Err(e) = ctrlc::set_handler(move || runner.cancel()) {
                tracing::warn!("could not install Ctrl-C handler: {e}");
            }
        }

        let mut sink = TerminalSink;
        match runner.run(&sequence, &mut sink) {
            Ok(report) => {
                if report_json {
                    match serde_json::to_string_pretty(&report) {
                        Ok(json) => println!("{json}"),
                        Err(e) => eprintln!("[sec-cli] report serialization failed: {e}"),
                    }
                }
                match report.outcome {
                    RunOutcome::Success => process::exit(0),
                    RunOutcome::Failed => process::exit(1),
                    RunOutcome::Aborted => process::exit(130),
                }
            }
            Err(e) => {
                eprintln!("[sec-cli] error: {e}");
                process::exit(5);
            }
        }
    }

    eprintln!("Uso: sec-cli list");
    eprintln!("     sec-cli run <sequence> [--target <URL|host>] [--report-json]");
    process::exit(2);
}
