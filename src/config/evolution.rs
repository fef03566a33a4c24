use super::traits::{check_probability, ConfigSection};
use crate::error::EvoError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Number of codons per genotype
    pub genome_length: usize,
    /// Generations run after the initial evaluation of generation 0
    pub generations: usize,
    pub mate_prob: f64,
    pub mutant_prob: f64,
    /// Per-codon redraw probability once an individual is picked for mutation
    pub indpb: f64,
    pub tournament_size: usize,
    pub mutation_low: u32,
    pub mutation_high: u32,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            genome_length: 7,
            generations: 4,
            mate_prob: 0.5,
            mutant_prob: 0.2,
            indpb: 0.05,
            tournament_size: 3,
            mutation_low: 0,
            mutation_high: 255,
            seed: Some(64),
            parallel_evaluation: false,
        }
    }
}

impl EvolutionConfig {
    pub fn mutation_range(&self) -> RangeInclusive<u32> {
        self.mutation_low..=self.mutation_high
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvoError> {
        if self.population_size == 0 {
            return Err(EvoError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        if self.genome_length == 0 {
            return Err(EvoError::Configuration(
                "Genome length must be at least 1".to_string()
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(EvoError::Configuration(format!(
                "Tournament size must be between 1 and the population size ({}), got {}",
                self.population_size, self.tournament_size
            )));
        }
        if self.mutation_low > self.mutation_high {
            return Err(EvoError::Configuration(format!(
                "Mutation range is empty: {} > {}",
                self.mutation_low, self.mutation_high
            )));
        }
        let section = Self::section_name();
        check_probability(section, "mate_prob", self.mate_prob)?;
        check_probability(section, "mutant_prob", self.mutant_prob)?;
        check_probability(section, "indpb", self.indpb)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_population() {
        let config = EvolutionConfig { population_size: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(EvoError::Configuration(_))));
    }

    #[test]
    fn rejects_oversized_tournament() {
        let config = EvolutionConfig {
            population_size: 2,
            tournament_size: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let config = EvolutionConfig { indpb: 1.5, ..Default::default() };
        assert!(config.validate().is_err());

        let config = EvolutionConfig { mate_prob: -0.1, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_mutation_range() {
        let config = EvolutionConfig {
            mutation_low: 10,
            mutation_high: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
