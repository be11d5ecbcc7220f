//! Garantía de slot único: una corrida activa por instancia de runner.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use sec_core::{build_sequence, CollectSink, InlineStep, RunOutcome, RunnerError, RunnerState, StepDefinition,
               TaskRunner};

#[test]
fn concurrent_run_is_rejected_without_disturbing_the_active_one() {
    let runner = Arc::new(TaskRunner::new());

    // El step bloqueante avisa que arrancó y espera la señal de liberación.
    let (started_tx, started_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let blocker = Box::new(InlineStep::new("blocker", move |ctx| {
        ctx.info("blocking until released");
        let _ = started_tx.send(());
        let _ = release_rx.recv();
        Ok(())
    })) as Box<dyn StepDefinition>;

    let worker = {
        let runner = Arc::clone(&runner);
        thread::spawn(move || {
            let seq = build_sequence(vec![blocker]);
            let mut sink = CollectSink::default();
            runner.run(&seq, &mut sink).expect("in-flight run ok")
        })
    };

    started_rx.recv().expect("blocker started");
    assert_eq!(runner.state(), RunnerState::Running);

    // Segunda sumisión mientras hay corrida activa: rechazo tipado.
    let mut sink2 = CollectSink::default();
    let second = runner.run(&build_sequence(vec![]), &mut sink2);
    assert!(matches!(second, Err(RunnerError::AlreadyRunning)));
    assert!(sink2.events.is_empty(), "rejected run must not emit");

    release_tx.send(()).expect("release blocker");
    let report = worker.join().expect("worker join");

    // El rechazo no alteró el reporte de la corrida en vuelo.
    assert_eq!(report.outcome, RunOutcome::Success);
    assert_eq!(report.completed_steps, vec!["blocker"]);
    assert_eq!(runner.state(), RunnerState::Completed);
}

#[test]
fn runner_is_reusable_after_a_terminal_state() {
    let runner = TaskRunner::new();
    let mut sink = CollectSink::default();

    let failing = Box::new(InlineStep::new("bad", |_ctx| {
        Err(RunnerError::exit_failure("chkrootkit", 2))
    })) as Box<dyn StepDefinition>;
    let report = runner.run(&build_sequence(vec![failing]), &mut sink)
                       .expect("run ok");
    assert_eq!(report.outcome, RunOutcome::Failed);
    assert_eq!(runner.state(), RunnerState::Failed);

    // Estado terminal: la siguiente corrida es aceptada.
    let ok = Box::new(InlineStep::new("good", |_ctx| Ok(()))) as Box<dyn StepDefinition>;
    let mut sink2 = CollectSink::default();
    let report2 = runner.run(&build_sequence(vec![ok]), &mut sink2)
                        .expect("run ok");
    assert_eq!(report2.outcome, RunOutcome::Success);
    assert_eq!(runner.state(), RunnerState::Completed);
}
