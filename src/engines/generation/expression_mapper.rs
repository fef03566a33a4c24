use crate::engines::generation::{gene_consumer::GeneConsumer, grammar::Grammar};
use std::sync::Arc;

/// Outcome of decoding one genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub expression: String,
    pub codons_used: usize,
    /// True when no non-terminal remains in `expression`
    pub complete: bool,
}

/// Maps genomes to expressions by repeated symbol substitution.
///
/// Each codon expands the highest-priority symbol still present in the
/// working string, at its rightmost occurrence. Decoding stops when the
/// codons run out, when no symbol is left, or when an expansion leaves the
/// string unchanged.
#[derive(Debug, Clone)]
pub struct ExpressionMapper {
    grammar: Arc<Grammar>,
}

impl ExpressionMapper {
    pub fn new(grammar: Arc<Grammar>) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn express(&self, genome: &[u32]) -> String {
        self.derive(genome).expression
    }

    pub fn derive(&self, genome: &[u32]) -> Derivation {
        let mut consumer = GeneConsumer::new(genome);
        let mut expression = self.grammar.start().to_string();

        while consumer.has_genes() {
            let Some(symbol) = self.next_symbol(&expression) else {
                break;
            };
            let Some(alternatives) = self.grammar.alternatives(symbol) else {
                break;
            };
            let Some(choice) = consumer.choose(alternatives.len()) else {
                break;
            };
            let Some(at) = expression.rfind(symbol) else {
                break;
            };

            let replacement = &alternatives[choice];
            if replacement == symbol {
                // Substituting a symbol for itself can never make progress
                break;
            }
            log::trace!("expand '{}' at {} -> '{}'", symbol, at, replacement);
            expression.replace_range(at..at + symbol.len(), replacement);
        }

        Derivation {
            complete: !self.grammar.contains_symbol(&expression),
            codons_used: consumer.position(),
            expression,
        }
    }

    /// First symbol, by priority, that occurs anywhere in `expression`
    fn next_symbol(&self, expression: &str) -> Option<&str> {
        self.grammar
            .symbols()
            .iter()
            .map(String::as_str)
            .find(|symbol| expression.contains(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_mapper() -> ExpressionMapper {
        let grammar = Grammar::from_rules(
            "S",
            &["T", "S"],
            &[("S", &["T"]), ("T", &["1.0", "2.0"])],
        )
        .unwrap();
        ExpressionMapper::new(Arc::new(grammar))
    }

    #[test]
    fn expands_by_priority_then_stops() {
        let mapper = simple_mapper();
        // S -> T uses the first codon, T -> 1.0 the second
        let derivation = mapper.derive(&[0, 0, 1]);
        assert_eq!(derivation.expression, "1.0");
        assert_eq!(derivation.codons_used, 2);
        assert!(derivation.complete);
    }

    #[test]
    fn codon_magnitude_only_matters_modulo() {
        let mapper = simple_mapper();
        assert_eq!(mapper.express(&[0, 5]), "2.0");
        assert_eq!(mapper.express(&[0, 1]), "2.0");
    }

    #[test]
    fn short_genome_leaves_incomplete_derivation() {
        let mapper = simple_mapper();
        let derivation = mapper.derive(&[]);
        assert_eq!(derivation.expression, "S");
        assert!(!derivation.complete);

        let derivation = mapper.derive(&[0]);
        assert_eq!(derivation.expression, "T");
        assert!(!derivation.complete);
    }

    #[test]
    fn expands_rightmost_occurrence() {
        let grammar = Grammar::from_rules(
            "S",
            &["I", "S"],
            &[("S", &["I+I"]), ("I", &["a", "b"])],
        )
        .unwrap();
        let mapper = ExpressionMapper::new(Arc::new(grammar));
        assert_eq!(mapper.express(&[0, 1]), "I+b");
        assert_eq!(mapper.express(&[0, 1, 0]), "a+b");
    }

    #[test]
    fn self_referencing_alternative_stops_decoding() {
        let grammar = Grammar::from_rules("S", &["S"], &[("S", &["S", "x"])]).unwrap();
        let mapper = ExpressionMapper::new(Arc::new(grammar));
        let derivation = mapper.derive(&[0, 1]);
        assert_eq!(derivation.expression, "S");
        assert_eq!(derivation.codons_used, 1);
    }

    #[test]
    fn arithmetic_decoding_is_deterministic() {
        let mapper = ExpressionMapper::new(Arc::new(Grammar::arithmetic()));
        let genome = [1, 9, 3, 0, 4, 2, 7];
        assert_eq!(mapper.express(&genome), mapper.express(&genome));

        // S -> I-I, I -> T, T -> x, x -> 1.0, I -> (I), I -> I*I, I -> T
        let derivation = mapper.derive(&genome);
        assert_eq!(derivation.expression, "(I*T)-1.0");
        assert!(!derivation.complete);
        assert_eq!(derivation.codons_used, 7);
    }
}
