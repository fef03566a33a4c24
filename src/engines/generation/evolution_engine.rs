use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    expression_mapper::ExpressionMapper,
    genome::Individual,
    grammar::Grammar,
    operators::{best_index, crossover, mutate, random_genome, select_offspring},
    statistics::GenerationStats,
};
use crate::error::{EvoError, Result};
use crate::functions::FitnessFunction;
use crate::types::{BestIndividual, EvolutionResult, WORST_FITNESS};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::sync::Arc;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_finished(&mut self, best: &BestIndividual);
}

/// Generational, non-elitist grammatical evolution.
///
/// Generation 0 evaluates a random population. Each later generation
/// selects offspring by tournament, applies one-point crossover to adjacent
/// pairs and uniform mutation to individuals, re-evaluates whatever the
/// operators touched and replaces the population wholesale.
pub struct EvolutionEngine<F: FitnessFunction> {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator<F>,
    attribute_size: u32,
    rng: StdRng,
}

impl<F: FitnessFunction> EvolutionEngine<F> {
    pub fn new(config: EvolutionConfig, grammar: impl Into<Arc<Grammar>>, fitness: F) -> Result<Self> {
        config.validate()?;

        let grammar = grammar.into();
        let attribute_size = u32::try_from(grammar.attribute_size()).map_err(|_| {
            EvoError::Grammar(format!(
                "Too many alternatives for one symbol: {}",
                grammar.attribute_size()
            ))
        })?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            evaluator: FitnessEvaluator::new(ExpressionMapper::new(grammar), fitness),
            attribute_size,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<F> {
        &self.evaluator
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> EvolutionResult {
        log::debug!(
            "Start of evolution: {} individuals, {} codons, {} generations",
            self.config.population_size, self.config.genome_length, self.config.generations
        );

        callback.on_generation_start(0);
        let mut population = self.initialize_population();
        let evaluated = self.evaluate_population(&mut population);
        let stats = GenerationStats::collect(0, evaluated, &population);
        callback.on_generation_complete(&stats);
        let mut history = vec![stats];

        for generation in 1..=self.config.generations {
            callback.on_generation_start(generation);

            let mut offspring = self.breed(&population);
            let evaluated = self.evaluate_population(&mut offspring);

            // The population is entirely replaced by the offspring
            population = offspring;

            let stats = GenerationStats::collect(generation, evaluated, &population);
            callback.on_generation_complete(&stats);
            history.push(stats);
        }

        let best = self.best_of(&population).unwrap_or_else(|| BestIndividual {
            genome: Vec::new(),
            expression: self.evaluator.mapper().grammar().start().to_string(),
            fitness: WORST_FITNESS,
        });
        callback.on_finished(&best);

        EvolutionResult {
            best,
            history,
            population,
            cache_size: self.evaluator.cache().len(),
            invocations: self.evaluator.invocations(),
        }
    }

    pub fn initialize_population(&mut self) -> Vec<Individual> {
        (0..self.config.population_size)
            .map(|_| {
                Individual::new(random_genome(
                    self.config.genome_length,
                    self.attribute_size,
                    &mut self.rng,
                ))
            })
            .collect()
    }

    /// Scores every individual without a fitness; returns how many were scored
    pub fn evaluate_population(&self, population: &mut [Individual]) -> usize {
        let pending: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, individual)| !individual.is_evaluated())
            .map(|(i, _)| i)
            .collect();

        let genomes: Vec<&[u32]> = pending
            .iter()
            .map(|&i| population[i].genome.as_slice())
            .collect();
        let scores = self
            .evaluator
            .evaluate_batch(&genomes, self.config.parallel_evaluation);

        for (&i, score) in pending.iter().zip(scores) {
            population[i].fitness = Some(score);
        }

        pending.len()
    }

    /// Selection, crossover and mutation; untouched offspring keep their fitness
    pub fn breed(&mut self, population: &[Individual]) -> Vec<Individual> {
        let mut offspring = select_offspring(
            population,
            population.len(),
            self.config.tournament_size,
            &mut self.rng,
        );

        // Adjacent pairs; with an odd count the last individual is not mated
        for pair in offspring.chunks_exact_mut(2) {
            if self.rng.gen::<f64>() < self.config.mate_prob {
                let (left, right) = pair.split_at_mut(1);
                crossover(&mut left[0].genome, &mut right[0].genome, &mut self.rng);
                left[0].invalidate();
                right[0].invalidate();
            }
        }

        for mutant in offspring.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutant_prob {
                let redrawn = mutate(
                    &mut mutant.genome,
                    self.config.indpb,
                    self.config.mutation_range(),
                    &mut self.rng,
                );
                if redrawn > 0 {
                    mutant.invalidate();
                }
            }
        }

        offspring
    }

    /// Highest-scoring individual, earliest on ties
    pub fn best_of(&self, population: &[Individual]) -> Option<BestIndividual> {
        let individual = &population[best_index(population)?];
        Some(BestIndividual {
            expression: self.evaluator.mapper().express(&individual.genome),
            genome: individual.genome.clone(),
            fitness: individual.score(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::ArithmeticFitness;

    fn small_config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 31,
            genome_length: 12,
            generations: 6,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EvolutionConfig { population_size: 0, ..Default::default() };
        let result = EvolutionEngine::new(config, Grammar::arithmetic(), ArithmeticFitness);
        assert!(matches!(result, Err(EvoError::Configuration(_))));
    }

    #[test]
    fn initial_population_matches_config() {
        let mut engine = EvolutionEngine::new(small_config(), Grammar::arithmetic(), ArithmeticFitness).unwrap();
        let population = engine.initialize_population();
        assert_eq!(population.len(), 31);
        assert!(population.iter().all(|i| i.genome.len() == 12 && !i.is_evaluated()));
        // Arithmetic grammar has at most 10 alternatives per symbol
        assert!(population.iter().flat_map(|i| &i.genome).all(|&g| g < 10));
    }

    #[test]
    fn breeding_without_variation_keeps_fitness() {
        let config = EvolutionConfig {
            mate_prob: 0.0,
            mutant_prob: 0.0,
            ..small_config()
        };
        let mut engine = EvolutionEngine::new(config, Grammar::arithmetic(), ArithmeticFitness).unwrap();
        let mut population = engine.initialize_population();
        engine.evaluate_population(&mut population);

        let offspring = engine.breed(&population);
        assert_eq!(offspring.len(), population.len());
        assert!(offspring.iter().all(Individual::is_evaluated));
        assert!(offspring.iter().all(|o| population.contains(o)));

        let mut offspring = offspring;
        assert_eq!(engine.evaluate_population(&mut offspring), 0);
    }

    #[test]
    fn full_crossover_invalidates_all_pairs() {
        let config = EvolutionConfig {
            mate_prob: 1.0,
            mutant_prob: 0.0,
            ..small_config()
        };
        let mut engine = EvolutionEngine::new(config, Grammar::arithmetic(), ArithmeticFitness).unwrap();
        let mut population = engine.initialize_population();
        engine.evaluate_population(&mut population);

        let offspring = engine.breed(&population);
        // 31 individuals: 15 pairs mated, the last one left alone
        assert!(offspring[..30].iter().all(|o| !o.is_evaluated()));
        assert!(offspring[30].is_evaluated());
    }

    #[test]
    fn full_mutation_invalidates_every_offspring() {
        let config = EvolutionConfig {
            mate_prob: 0.0,
            mutant_prob: 1.0,
            indpb: 1.0,
            ..small_config()
        };
        let mut engine = EvolutionEngine::new(config, Grammar::arithmetic(), ArithmeticFitness).unwrap();
        let mut population = engine.initialize_population();
        engine.evaluate_population(&mut population);

        let mut offspring = engine.breed(&population);
        assert_eq!(offspring.len(), population.len());
        assert!(offspring.iter().all(|o| !o.is_evaluated()));
        assert_eq!(engine.evaluate_population(&mut offspring), offspring.len());
    }

    #[test]
    fn mutation_without_redraws_keeps_fitness() {
        let config = EvolutionConfig {
            mate_prob: 0.0,
            mutant_prob: 1.0,
            indpb: 0.0,
            ..small_config()
        };
        let mut engine = EvolutionEngine::new(config, Grammar::arithmetic(), ArithmeticFitness).unwrap();
        let mut population = engine.initialize_population();
        engine.evaluate_population(&mut population);

        let mut offspring = engine.breed(&population);
        assert!(offspring.iter().all(Individual::is_evaluated));
        assert!(offspring.iter().all(|o| population.contains(o)));
        assert_eq!(engine.evaluate_population(&mut offspring), 0);
    }

    #[test]
    fn same_seed_gives_same_run() {
        let run = || {
            let mut engine = EvolutionEngine::new(small_config(), Grammar::arithmetic(), ArithmeticFitness).unwrap();
            engine.run(())
        };
        let first = run();
        let second = run();
        assert_eq!(first.best, second.best);
        assert_eq!(first.history, second.history);
    }

    #[test]
    fn parallel_evaluation_matches_sequential() {
        let run = |parallel_evaluation| {
            let config = EvolutionConfig { parallel_evaluation, ..small_config() };
            let mut engine = EvolutionEngine::new(config, Grammar::arithmetic(), ArithmeticFitness).unwrap();
            engine.run(())
        };
        let sequential = run(false);
        let parallel = run(true);
        assert_eq!(sequential.best, parallel.best);
        assert_eq!(sequential.invocations, parallel.invocations);
    }
}
