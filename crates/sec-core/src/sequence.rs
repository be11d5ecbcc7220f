//! Definición inmutable de una secuencia de tareas.
//!
//! Una `TaskSequence` se construye por corrida y no se comparte entre
//! invocaciones concurrentes del runner. Su `digest` identifica la
//! definición (versión del core + ids ordenados) en logs y reportes.

use serde_json::json;

use crate::constants::CORE_VERSION;
use crate::hashing::hash_value;
use crate::step::StepDefinition;

pub struct TaskSequence {
    pub steps: Vec<Box<dyn StepDefinition>>,
    pub digest: String,
}

impl TaskSequence {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Ids de los steps en orden de ejecución.
    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }
}

/// Construye la secuencia derivando el digest de los ids en orden.
pub fn build_sequence(steps: Vec<Box<dyn StepDefinition>>) -> TaskSequence {
    let ids: Vec<&str> = steps.iter().map(|s| s.id()).collect();
    let digest = hash_value(&json!({
                     "core_version": CORE_VERSION,
                     "step_ids": ids,
                 }));
    TaskSequence { steps, digest }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::InlineStep;

    fn noop(id: &str) -> Box<dyn StepDefinition> {
        Box::new(InlineStep::new(id, |_ctx| Ok(())))
    }

    #[test]
    fn digest_is_deterministic_for_same_ids() {
        let a = build_sequence(vec![noop("update"), noop("upgrade")]);
        let b = build_sequence(vec![noop("update"), noop("upgrade")]);
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn digest_depends_on_step_order() {
        let a = build_sequence(vec![noop("update"), noop("upgrade")]);
        let b = build_sequence(vec![noop("upgrade"), noop("update")]);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn empty_sequence_is_valid() {
        let s = build_sequence(vec![]);
        assert!(s.is_empty());
        assert_eq!(s.digest.len(), 64);
    }
}
