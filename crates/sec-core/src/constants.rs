//! Constantes del runner core.
//!
//! `CORE_VERSION` participa en el cálculo del digest de una secuencia:
//! un cambio de versión del core produce digests distintos aunque la
//! lista de pasos no cambie. Mantener estable mientras no haya cambios
//! incompatibles en la semántica de ejecución.

/// Versión lógica del core. Entra al digest de `TaskSequence`.
pub const CORE_VERSION: &str = "1.0";
