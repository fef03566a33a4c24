use crate::engines::evaluation::fitness_cache::FitnessCache;
use crate::engines::generation::expression_mapper::ExpressionMapper;
use crate::functions::traits::FitnessFunction;
use crate::types::WORST_FITNESS;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Decodes genomes and scores them through a memoized fitness function.
///
/// Incomplete derivations and failing evaluations both score
/// `WORST_FITNESS`; neither is ever reported as an error. Successful scores
/// are the absolute value of what the fitness function returns. Only
/// complete expressions are cached.
pub struct FitnessEvaluator<F: FitnessFunction> {
    mapper: ExpressionMapper,
    fitness: F,
    cache: FitnessCache,
    invocations: AtomicUsize,
}

impl<F: FitnessFunction> FitnessEvaluator<F> {
    pub fn new(mapper: ExpressionMapper, fitness: F) -> Self {
        Self {
            mapper,
            fitness,
            cache: FitnessCache::new(),
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn mapper(&self) -> &ExpressionMapper {
        &self.mapper
    }

    pub fn cache(&self) -> &FitnessCache {
        &self.cache
    }

    /// Number of calls made into the fitness function so far
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::Relaxed)
    }

    pub fn evaluate(&self, genome: &[u32]) -> f64 {
        let derivation = self.mapper.derive(genome);
        if !derivation.complete {
            return WORST_FITNESS;
        }

        if let Some(score) = self.cache.get(&derivation.expression) {
            return score;
        }

        let score = self.score(&derivation.expression);
        self.cache.insert(derivation.expression, score);
        score
    }

    /// Scores many genomes at once, returning scores in input order.
    ///
    /// Each distinct uncached expression reaches the fitness function exactly
    /// once, even when `parallel` fans the work out over the rayon pool.
    pub fn evaluate_batch(&self, genomes: &[&[u32]], parallel: bool) -> Vec<f64> {
        let derivations: Vec<_> = if parallel {
            genomes.par_iter().map(|g| self.mapper.derive(g)).collect()
        } else {
            genomes.iter().map(|g| self.mapper.derive(g)).collect()
        };

        let mut seen = HashSet::new();
        let pending: Vec<&str> = derivations
            .iter()
            .filter(|d| d.complete)
            .map(|d| d.expression.as_str())
            .filter(|e| !self.cache.contains(e) && seen.insert(*e))
            .collect();

        let scored: Vec<(&str, f64)> = if parallel {
            pending.par_iter().map(|e| (*e, self.score(e))).collect()
        } else {
            pending.iter().map(|e| (*e, self.score(e))).collect()
        };
        for (expression, score) in scored {
            self.cache.insert(expression.to_string(), score);
        }

        derivations
            .iter()
            .map(|d| {
                if d.complete {
                    self.cache.get(&d.expression).unwrap_or(WORST_FITNESS)
                } else {
                    WORST_FITNESS
                }
            })
            .collect()
    }

    fn score(&self, expression: &str) -> f64 {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        match self.fitness.evaluate(expression) {
            Ok(value) if value.is_nan() => {
                log::debug!("Fitness of '{}' is NaN", expression);
                WORST_FITNESS
            }
            Ok(value) => value.abs(),
            Err(e) => {
                log::debug!("Fitness of '{}' failed: {:#}", expression, e);
                WORST_FITNESS
            }
        }
    }
}
