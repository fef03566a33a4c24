use crate::types::WORST_FITNESS;

/// Genome representation for grammatical evolution
///
/// A genome is a fixed-length sequence of integers ("codons") that
/// deterministically maps to an expression through the grammar. Each codon
/// is consumed by the `ExpressionMapper` to pick one alternative for the
/// symbol being expanded, so only `codon % alternatives` is ever significant.
///
/// Crossover and mutation operate on this flat sequence, which keeps the
/// genetic operators independent of the grammar.
///
/// # Example
///
/// ```
/// let genome: cfgevo::engines::generation::Genome = vec![3, 0, 7, 1];
/// assert_eq!(genome.len(), 4);
/// ```
pub type Genome = Vec<u32>;

/// A genome paired with its fitness slot.
///
/// `fitness` is `None` until the genome is evaluated and is cleared again
/// whenever crossover or mutation touches the codons.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub genome: Genome,
    pub fitness: Option<f64>,
}

impl Individual {
    pub fn new(genome: Genome) -> Self {
        Self { genome, fitness: None }
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness for ranking purposes; unevaluated individuals rank last
    pub fn score(&self) -> f64 {
        self.fitness.unwrap_or(WORST_FITNESS)
    }

    pub fn invalidate(&mut self) {
        self.fitness = None;
    }
}

impl From<Genome> for Individual {
    fn from(genome: Genome) -> Self {
        Self::new(genome)
    }
}
