//! Caché simple en memoria para evaluaciones ya calculadas
//!
//! La clave es el id de la materia más el tipo y el estado efectivo de cada una
//! de sus correlativas declaradas, ordenadas por id. Entradas extra del mapa de
//! estados no forman parte de la clave, igual que no influyen en la evaluación.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::algorithm::evaluate::{evaluate, status_of};
use crate::models::{Course, Evaluation, PrerequisiteKind, PrerequisiteStatus, StatusMap};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    course_id: String,
    statuses: Vec<(String, PrerequisiteKind, PrerequisiteStatus)>,
}

impl CacheKey {
    pub fn new(course: &Course, statuses: &StatusMap) -> Self {
        let mut pairs: Vec<(String, PrerequisiteKind, PrerequisiteStatus)> = course
            .prerequisites
            .iter()
            .map(|p| (p.id.clone(), p.kind, status_of(statuses, &p.id)))
            .collect();
        pairs.sort();
        pairs.dedup();
        CacheKey { course_id: course.id.clone(), statuses: pairs }
    }
}

/// Memoiza `evaluate` con capacidad acotada. Con capacidad 0 no guarda nada.
#[derive(Debug)]
pub struct EvaluationCache {
    capacity: usize,
    entries: Mutex<HashMap<CacheKey, Arc<Evaluation>>>,
}

impl EvaluationCache {
    pub fn new(capacity: usize) -> Self {
        EvaluationCache { capacity, entries: Mutex::new(HashMap::new()) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Devuelve la evaluación guardada o la calcula y la guarda.
    ///
    /// El Mutex se toma dos veces y por poco tiempo; la evaluación en sí corre
    /// sin el bloqueo tomado. Si la tabla está llena se vacía antes de insertar.
    pub fn evaluate(&self, course: &Course, statuses: &StatusMap) -> Arc<Evaluation> {
        if self.capacity == 0 {
            return Arc::new(evaluate(course, statuses));
        }

        let key = CacheKey::new(course, statuses);
        {
            let guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = guard.get(&key) {
                debug!(course = %course.id, "evaluación servida desde caché");
                return Arc::clone(existing);
            }
        }

        let evaluation = Arc::new(evaluate(course, statuses));
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.len() >= self.capacity {
            debug!(entries = guard.len(), "caché de evaluaciones llena, se vacía");
            guard.clear();
        }
        guard.insert(key, Arc::clone(&evaluation));
        debug!(course = %course.id, "evaluación calculada y guardada");
        evaluation
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
