use crate::error::{EvoError, Result};
use std::collections::{HashMap, HashSet};

/// Context-free grammar over textual symbols.
///
/// `symbols` is the expansion priority: the decoder always expands the first
/// symbol in this list that still occurs in the working string. Every symbol
/// maps to a non-empty, ordered list of alternatives. Anything in an
/// alternative that is not a symbol is a terminal.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    symbols: Vec<String>,
    rules: HashMap<String, Vec<String>>,
}

impl Grammar {
    pub fn new(
        start: impl Into<String>,
        symbols: Vec<String>,
        rules: HashMap<String, Vec<String>>,
    ) -> Result<Self> {
        let grammar = Self {
            start: start.into(),
            symbols,
            rules,
        };
        grammar.validate()?;
        Ok(grammar)
    }

    /// Convenience constructor from borrowed literals
    pub fn from_rules(start: &str, symbols: &[&str], rules: &[(&str, &[&str])]) -> Result<Self> {
        let symbols = symbols.iter().map(|s| s.to_string()).collect();
        let rules = rules
            .iter()
            .map(|(symbol, alternatives)| {
                (
                    symbol.to_string(),
                    alternatives.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect();
        Self::new(start, symbols, rules)
    }

    /// Arithmetic grammar over the constants 1.0..9.0 with `+ - * /` and parentheses
    pub fn arithmetic() -> Self {
        let digits: Vec<String> = (1..10).map(|d| format!("{:.1}", d as f64)).collect();

        let mut indirect: Vec<String> = ["I+I", "I-I", "I*I", "I/I", "(I)"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        indirect.extend(std::iter::repeat("T".to_string()).take(5));

        let rules = HashMap::from([
            ("x".to_string(), digits.clone()),
            ("y".to_string(), digits.clone()),
            ("z".to_string(), digits),
            ("T".to_string(), vec!["x".into(), "y".into(), "z".into()]),
            ("I".to_string(), indirect),
            (
                "S".to_string(),
                vec!["I+I".into(), "I-I".into(), "I*I".into(), "I/I".into()],
            ),
        ]);
        let symbols = ["x", "y", "z", "T", "I", "S"].iter().map(|s| s.to_string()).collect();

        Self {
            start: "S".to_string(),
            symbols,
            rules,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(EvoError::Grammar("Symbol priority list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            if symbol.is_empty() {
                return Err(EvoError::Grammar("Empty symbol in priority list".to_string()));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(EvoError::Grammar(format!("Duplicate symbol '{}'", symbol)));
            }
            match self.rules.get(symbol) {
                None => {
                    return Err(EvoError::Grammar(format!(
                        "Symbol '{}' has no production rule",
                        symbol
                    )))
                }
                Some(alternatives) if alternatives.is_empty() => {
                    return Err(EvoError::Grammar(format!(
                        "Symbol '{}' has no alternatives",
                        symbol
                    )))
                }
                Some(_) => {}
            }
        }

        if let Some(orphan) = self.rules.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(EvoError::Grammar(format!(
                "Rule for '{}' is missing from the symbol priority list",
                orphan
            )));
        }

        if !seen.contains(self.start.as_str()) {
            return Err(EvoError::Grammar(format!(
                "Start symbol '{}' is not a declared symbol",
                self.start
            )));
        }

        Ok(())
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Symbols in expansion priority order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn alternatives(&self, symbol: &str) -> Option<&[String]> {
        self.rules.get(symbol).map(Vec::as_slice)
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// True if any non-terminal still occurs in `text`
    pub fn contains_symbol(&self, text: &str) -> bool {
        self.symbols.iter().any(|s| text.contains(s.as_str()))
    }

    /// Largest alternative count across all symbols; initial codons are drawn below this
    pub fn attribute_size(&self) -> usize {
        self.rules.values().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_grammar_is_valid() {
        let grammar = Grammar::arithmetic();
        assert!(grammar.validate().is_ok());
        assert_eq!(grammar.start(), "S");
        assert_eq!(grammar.attribute_size(), 10);
        assert_eq!(grammar.alternatives("x").map(|a| a[0].as_str()), Some("1.0"));
        assert_eq!(grammar.alternatives("x").map(|a| a[8].as_str()), Some("9.0"));
    }

    #[test]
    fn detects_symbols_in_text() {
        let grammar = Grammar::arithmetic();
        assert!(grammar.contains_symbol("1.0+I"));
        assert!(!grammar.contains_symbol("(1.0+2.0)/3.0"));
        assert!(grammar.is_symbol("T"));
        assert!(!grammar.is_symbol("+"));
    }

    #[test]
    fn rejects_symbol_without_rule() {
        let result = Grammar::from_rules("S", &["S", "T"], &[("S", &["T"])]);
        assert!(matches!(result, Err(EvoError::Grammar(_))));
    }

    #[test]
    fn rejects_empty_alternatives() {
        let result = Grammar::from_rules("S", &["S"], &[("S", &[])]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_rule_outside_priority_list() {
        let result = Grammar::from_rules("S", &["S"], &[("S", &["a"]), ("T", &["b"])]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_start_symbol() {
        let result = Grammar::from_rules("Q", &["S"], &[("S", &["a"])]);
        assert!(result.is_err());
    }
}
