pub mod grammar;
pub mod genome;
pub mod gene_consumer;
pub mod expression_mapper;
pub mod operators;
pub mod statistics;
pub mod evolution_engine;
pub mod progress;

pub use genome::{Genome, Individual};
pub use grammar::Grammar;
pub use expression_mapper::{Derivation, ExpressionMapper};
pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressMessage};
pub use statistics::{FitnessSummary, GenerationStats};
