pub mod evaluator;
pub mod fitness_cache;

pub use evaluator::FitnessEvaluator;
pub use fitness_cache::FitnessCache;
