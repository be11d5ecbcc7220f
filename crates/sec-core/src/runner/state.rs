/// Estado del runner por invocación.
///
/// Las transiciones válidas son:
/// - `Idle` -> `Running`
/// - `Running` -> `Completed`
/// - `Running` -> `Failed`
/// - `Running` -> `Aborted`
///
/// Un estado terminal vuelve a ser elegible en la siguiente llamada a
/// `run()`: la instancia es reutilizable pero de slot único, nunca hay dos
/// corridas activas a la vez.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Sin corrida activa ni previa.
    Idle,
    /// Hay una corrida en curso; `run()` concurrente se rechaza.
    Running,
    /// La última corrida completó todos los steps.
    Completed,
    /// La última corrida se detuvo en un step fallido.
    Failed,
    /// La última corrida se detuvo por cancelación cooperativa.
    Aborted,
}
