pub mod arithmetic;
pub mod traits;

pub use arithmetic::ArithmeticFitness;
pub use traits::FitnessFunction;
