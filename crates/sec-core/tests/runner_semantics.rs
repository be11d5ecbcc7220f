//! Propiedades observables del runner: fail-fast, prefijo de completados y
//! orden de eventos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sec_core::{build_sequence, CollectSink, EventKind, InlineStep, RunOutcome, RunnerError, RunnerState,
               StepDefinition, TaskRunner};

fn chatty_step(id: &str, messages: usize) -> Box<dyn StepDefinition> {
    let step_id = id.to_string();
    Box::new(InlineStep::new(id, move |ctx| {
        for i in 0..messages {
            ctx.info(format!("{step_id} message {i}"));
        }
        Ok(())
    }))
}

fn counting_step(id: &str, counter: &Arc<AtomicUsize>, result: Result<(), RunnerError>) -> Box<dyn StepDefinition> {
    let counter = Arc::clone(counter);
    Box::new(InlineStep::new(id, move |_ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        result.clone()
    }))
}

#[test]
fn all_success_completes_every_step() {
    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();
    let seq = build_sequence(vec![chatty_step("s1", 1), chatty_step("s2", 1), chatty_step("s3", 1)]);

    let report = runner.run(&seq, &mut sink).expect("run ok");

    assert_eq!(report.outcome, RunOutcome::Success);
    assert_eq!(report.completed_steps, vec!["s1", "s2", "s3"]);
    assert!(report.failure.is_none());
    assert_eq!(report.sequence_digest, seq.digest);
    assert_eq!(runner.state(), RunnerState::Completed);
}

#[test]
fn failing_step_stops_the_sequence() {
    let counter = Arc::new(AtomicUsize::new(0));
    let failure = RunnerError::ExternalCommandFailed { command: "ufw enable".to_string(),
                                                       code: Some(1),
                                                       detail: "exit code 1".to_string() };
    let seq = build_sequence(vec![counting_step("s1", &counter, Ok(())),
                                  counting_step("s2", &counter, Err(failure.clone())),
                                  counting_step("s3", &counter, Ok(()))]);

    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();
    let report = runner.run(&seq, &mut sink).expect("run ok");

    // s3 nunca se ejecuta (fail-fast), verificado por contador de efectos.
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(report.outcome, RunOutcome::Failed);
    assert_eq!(report.completed_steps, vec!["s1"]);
    let f = report.failure.expect("failure populated");
    assert_eq!(f.step, "s2");
    assert_eq!(f.error, failure);
    assert_eq!(runner.state(), RunnerState::Failed);
}

#[test]
fn failed_precondition_skips_the_action() {
    let counter = Arc::new(AtomicUsize::new(0));
    let guarded = {
        let counter = Arc::clone(&counter);
        Box::new(InlineStep::new("needs-root", move |_ctx| {
                     counter.fetch_add(1, Ordering::SeqCst);
                     Ok(())
                 }).with_precondition(|| Err("requires root privileges".to_string())))
    };
    let seq = build_sequence(vec![chatty_step("s1", 1), guarded, chatty_step("s3", 1)]);

    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();
    let report = runner.run(&seq, &mut sink).expect("run ok");

    assert_eq!(counter.load(Ordering::SeqCst), 0, "action must not run");
    assert_eq!(report.outcome, RunOutcome::Failed);
    assert_eq!(report.completed_steps, vec!["s1"]);
    let f = report.failure.expect("failure populated");
    assert_eq!(f.step, "needs-root");
    assert_eq!(f.error,
               RunnerError::PreconditionNotMet { reason: "requires root privileges".to_string() });
}

#[test]
fn events_arrive_in_step_then_emission_order() {
    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();
    let seq = build_sequence(vec![chatty_step("s1", 2), chatty_step("s2", 2), chatty_step("s3", 2)]);

    runner.run(&seq, &mut sink).expect("run ok");

    // 6 eventos de step en orden, luego el resumen del runner.
    assert_eq!(sink.events.len(), 7);
    let steps: Vec<Option<&str>> = sink.events.iter().map(|e| e.step.as_deref()).collect();
    assert_eq!(steps,
               vec![Some("s1"), Some("s1"), Some("s2"), Some("s2"), Some("s3"), Some("s3"), None]);
    for (i, ev) in sink.events.iter().enumerate() {
        assert_eq!(ev.seq, i as u64, "seq strictly increasing");
    }
}

#[test]
fn events_from_a_failing_step_are_not_retracted() {
    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();
    let failing = Box::new(InlineStep::new("scan", |ctx| {
        ctx.info("starting scan");
        ctx.error("scanner reported a problem");
        Err(RunnerError::exit_failure("rkhunter --check", 1))
    }));
    let seq = build_sequence(vec![failing as Box<dyn StepDefinition>]);

    let report = runner.run(&seq, &mut sink).expect("run ok");

    assert_eq!(report.outcome, RunOutcome::Failed);
    assert_eq!(sink.events.len(), 3);
    assert_eq!(sink.events[0].kind, EventKind::Info);
    assert_eq!(sink.events[1].kind, EventKind::Error);
    // El resumen llega último y con severidad de error.
    assert!(sink.events[2].step.is_none());
    assert_eq!(sink.events[2].kind, EventKind::Error);
    assert!(sink.events[2].message.contains("scan"));
    assert!(sink.events[2].message.contains("rkhunter --check"));
}

#[test]
fn failed_install_reports_command_and_exit_code() {
    // steps: "update-lists" ok, "install-tools" sale con 100
    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();
    let seq = build_sequence(vec![chatty_step("update-lists", 1),
                                  Box::new(InlineStep::new("install-tools", |_ctx| {
                                      Err(RunnerError::exit_failure("apt-get install -y ufw", 100))
                                  }))]);

    let report = runner.run(&seq, &mut sink).expect("run ok");

    assert_eq!(report.outcome, RunOutcome::Failed);
    assert_eq!(report.completed_steps, vec!["update-lists"]);
    let f = report.failure.expect("failure populated");
    assert_eq!(f.step, "install-tools");
    match f.error {
        RunnerError::ExternalCommandFailed { code, ref detail, .. } => {
            assert_eq!(code, Some(100));
            assert_eq!(detail, "exit code 100");
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}
