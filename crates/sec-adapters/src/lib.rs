//! sec-adapters: pasos concretos sobre el core neutral
//!
//! Este crate provee:
//! - `CommandStep`: envoltura de un comando externo con streaming de
//!   stdout/stderr hacia el canal observador.
//! - `ReplaceInFileStep`: edición in-place de archivos de configuración.
//! - `HttpProbeStep`: sonda HTTP de alcanzabilidad/contenido.
//! - La precondición de privilegios (uid efectivo) y el catálogo de
//!   secuencias de mantenimiento/hardening/auditoría.
//!
//! Nota: el core sólo conoce `StepDefinition` y eventos; todos los
//! comandos concretos viven acá.

pub mod catalog;
pub mod config;
pub mod privilege;
pub mod steps;
