pub mod config;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use engines::evaluation::{FitnessCache, FitnessEvaluator};
pub use engines::generation::{EvolutionEngine, ExpressionMapper, Grammar};
pub use error::{EvoError, Result};
pub use functions::{ArithmeticFitness, FitnessFunction};
