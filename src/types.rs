use crate::engines::generation::{
    genome::{Genome, Individual},
    statistics::GenerationStats,
};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Score given to incomplete derivations and failed evaluations
pub const WORST_FITNESS: f64 = f64::NEG_INFINITY;

/// Best individual of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestIndividual {
    pub genome: Genome,
    pub expression: String,
    /// `null` in JSON when no individual scored better than `WORST_FITNESS`
    #[serde(with = "worst_as_null")]
    pub fitness: f64,
}

/// JSON has no infinities, so the worst score travels as `null`
mod worst_as_null {
    use super::*;

    pub fn serialize<S: Serializer>(fitness: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = if *fitness == WORST_FITNESS { None } else { Some(*fitness) };
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(WORST_FITNESS))
    }
}

/// Complete outcome of one evolutionary run
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    pub best: BestIndividual,
    /// One entry for generation 0 and one per subsequent generation
    pub history: Vec<GenerationStats>,
    pub population: Vec<Individual>,
    /// Distinct complete expressions scored during the run
    pub cache_size: usize,
    /// Calls made into the fitness function
    pub invocations: usize,
}

/// Serializable run report written by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub best: BestIndividual,
    pub history: Vec<GenerationStats>,
    pub cache_size: usize,
    pub invocations: usize,
}

impl From<&EvolutionResult> for RunReport {
    fn from(result: &EvolutionResult) -> Self {
        Self {
            best: result.best.clone(),
            history: result.history.clone(),
            cache_size: result.cache_size,
            invocations: result.invocations,
        }
    }
}

impl RunReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(fitness: f64) -> RunReport {
        RunReport {
            best: BestIndividual {
                genome: vec![0],
                expression: "S".to_string(),
                fitness,
            },
            history: vec![GenerationStats::collect(0, 1, &[])],
            cache_size: 0,
            invocations: 0,
        }
    }

    #[test]
    fn worst_fitness_survives_json() {
        let json = report(WORST_FITNESS).to_json().unwrap();
        assert!(json.contains("\"fitness\": null"));

        let parsed = RunReport::from_json(&json).unwrap();
        assert_eq!(parsed.best.fitness, WORST_FITNESS);
        assert_eq!(parsed.history, report(WORST_FITNESS).history);
    }

    #[test]
    fn finite_fitness_survives_json() {
        let json = report(6.5).to_json().unwrap();
        let parsed = RunReport::from_json(&json).unwrap();
        assert_eq!(parsed.best, report(6.5).best);
    }
}
