use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Memoized fitness scores keyed by decoded expression.
///
/// Grows for the life of a run and never evicts. Scores are assumed to be a
/// pure function of the expression, so writing the same key twice is harmless.
#[derive(Debug, Default)]
pub struct FitnessCache {
    data: Mutex<HashMap<String, f64>>,
}

impl FitnessCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, expression: &str) -> Option<f64> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.get(expression).copied()
    }

    pub fn insert(&self, expression: String, score: f64) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.insert(expression, score);
    }

    pub fn contains(&self, expression: &str) -> bool {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.contains_key(expression)
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
