use anyhow::Result;

/// Black-box objective applied to a fully derived expression.
///
/// Implementations must be pure with respect to `expression`: the engine
/// memoizes results by expression and never calls twice for the same one.
/// Any `Err` is absorbed by the evaluator as the worst possible score.
pub trait FitnessFunction: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<f64>;
}

impl<F> FitnessFunction for F
where
    F: Fn(&str) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, expression: &str) -> Result<f64> {
        self(expression)
    }
}
