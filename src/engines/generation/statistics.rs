use crate::engines::generation::genome::Individual;
use crate::types::WORST_FITNESS;
use serde::{Deserialize, Serialize};

/// Summary over the valid (non-worst) fitness scores of one generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
}

impl FitnessSummary {
    /// `None` when `scores` is empty
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let n = scores.len() as f64;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min,
            max,
            mean,
            std: variance.sqrt(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    /// Individuals whose fitness was computed this generation
    pub evaluated: usize,
    /// Individuals with a score other than the worst sentinel
    pub valid: usize,
    pub summary: Option<FitnessSummary>,
}

impl GenerationStats {
    pub fn collect(generation: usize, evaluated: usize, population: &[Individual]) -> Self {
        let scores: Vec<f64> = population
            .iter()
            .filter_map(|i| i.fitness)
            .filter(|&f| f != WORST_FITNESS)
            .collect();

        Self {
            generation,
            evaluated,
            valid: scores.len(),
            summary: FitnessSummary::from_scores(&scores),
        }
    }
}
