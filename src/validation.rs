//! Grammar coverage validation
//!
//! The builder's `match` is checked against the generated `Rule` enum by the
//! compiler. What the compiler cannot see is whether [`RULES`], the crate's
//! table of rules, still agrees with the rules declared in `grammar.pest`,
//! and whether every declared rule is reachable from `program`. This module
//! checks both against the embedded grammar text.

use std::collections::{BTreeSet, HashMap, VecDeque};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::grammar::{Rule, GRAMMAR_SOURCE, RULES};

// =====================
// Core Data Structures
// =====================

/// One rule definition found in grammar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub name: String,
    pub definition: String,
    pub line_number: usize,
    pub references: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Names pest provides without a definition in the grammar.
const BUILT_INS: &[&str] = &[
    "SOI",
    "EOI",
    "ANY",
    "NEWLINE",
    "ASCII_DIGIT",
    "ASCII_ALPHA",
    "ASCII_ALPHA_LOWER",
    "ASCII_ALPHA_UPPER",
    "ASCII_ALPHANUMERIC",
    "PUSH",
    "POP",
    "PEEK",
    "DROP",
];

/// Rules pest applies implicitly between tokens.
const IMPLICIT_RULES: &[&str] = &["WHITESPACE", "COMMENT"];

const START_RULE: &str = "program";

static RULE_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*[_@$!]?\s*\{").expect("valid rule pattern")
});
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("valid identifier pattern"));
static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("valid string pattern"));

static DECLARED_RULES: Lazy<Vec<RuleDefinition>> = Lazy::new(|| parse_rules(GRAMMAR_SOURCE));

// =====================
// Public API
// =====================

/// Rule definitions of the grammar the parser was generated from.
pub fn declared_rules() -> &'static [RuleDefinition] {
    &DECLARED_RULES
}

/// Checks the embedded grammar against the crate's rule table.
pub fn validate_grammar() -> ValidationResult {
    validate_rules(declared_rules(), RULES)
}

/// Checks a set of grammar definitions against a rule table.
pub fn validate_rules(declared: &[RuleDefinition], known: &[Rule]) -> ValidationResult {
    let mut result = ValidationResult::default();

    let known: BTreeSet<String> = known
        .iter()
        .map(|rule| format!("{:?}", rule))
        .filter(|name| !BUILT_INS.contains(&name.as_str()))
        .collect();

    let mut by_name: HashMap<&str, &RuleDefinition> = HashMap::new();
    for rule in declared {
        if let Some(previous) = by_name.insert(&rule.name, rule) {
            result.errors.push(format!(
                "rule `{}` is declared twice (lines {} and {})",
                rule.name, previous.line_number, rule.line_number
            ));
        }
    }

    for rule in declared {
        if !known.contains(&rule.name) {
            result.errors.push(format!(
                "rule `{}` (line {}) is missing from the rule table",
                rule.name, rule.line_number
            ));
        }
        for reference in &rule.references {
            if !by_name.contains_key(reference.as_str())
                && !BUILT_INS.contains(&reference.as_str())
            {
                result.errors.push(format!(
                    "rule `{}` references undefined rule `{}`",
                    rule.name, reference
                ));
            }
        }
    }

    for name in &known {
        if !by_name.contains_key(name.as_str()) {
            result
                .errors
                .push(format!("rule table lists `{}` but the grammar does not declare it", name));
        }
    }

    let reachable = reachable_from(START_RULE, &by_name);
    for rule in declared {
        if !reachable.contains(rule.name.as_str()) {
            result.warnings.push(format!(
                "rule `{}` (line {}) is not reachable from `{}`",
                rule.name, rule.line_number, START_RULE
            ));
        }
    }

    result
}

/// Extracts rule definitions from pest grammar text.
///
/// A definition runs from its `name = {` line up to the next definition.
pub fn parse_rules(grammar: &str) -> Vec<RuleDefinition> {
    let mut rules: Vec<RuleDefinition> = Vec::new();
    for (index, line) in grammar.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if let Some(captures) = RULE_START.captures(trimmed) {
            rules.push(RuleDefinition {
                name: captures[1].to_string(),
                definition: String::new(),
                line_number: index + 1,
                references: Vec::new(),
            });
        }
        if let Some(rule) = rules.last_mut() {
            rule.definition.push_str(trimmed);
            rule.definition.push('\n');
        }
    }

    for rule in &mut rules {
        rule.references = references(&rule.definition);
    }
    rules
}

// =====================
// Helpers
// =====================

fn references(definition: &str) -> Vec<String> {
    let Some(open) = definition.find('{') else {
        return Vec::new();
    };
    let body = STRING_LITERAL.replace_all(&definition[open..], "\"\"");
    let body = body
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");

    let mut found = Vec::new();
    for m in IDENTIFIER.find_iter(&body) {
        let name = m.as_str().to_string();
        if !found.contains(&name) {
            found.push(name);
        }
    }
    found
}

fn reachable_from<'a>(
    start: &'a str,
    rules: &HashMap<&'a str, &'a RuleDefinition>,
) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(start);
    queue.extend(IMPLICIT_RULES.iter().copied());

    while let Some(name) = queue.pop_front() {
        let Some(&rule) = rules.get(name) else {
            continue;
        };
        if !seen.insert(rule.name.as_str()) {
            continue;
        }
        for reference in &rule.references {
            queue.push_back(reference.as_str());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_grammar_matches_rule_table() {
        let result = validate_grammar();
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_every_table_rule_is_declared() {
        let declared: BTreeSet<&str> = declared_rules().iter().map(|r| r.name.as_str()).collect();
        assert!(declared.contains("program"));
        assert!(declared.contains("function_declaration"));
        assert_eq!(declared.len(), RULES.len() - 1); // EOI is built in
    }

    #[test]
    fn test_references_ignore_string_contents() {
        let rules = parse_rules("kw = @{ \"program\" ~ !ident }\nident = @{ ASCII_ALPHA+ }\n");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].references, vec!["ident".to_string()]);
        assert_eq!(rules[1].references, vec!["ASCII_ALPHA".to_string()]);
    }

    #[test]
    fn test_reports_undeclared_and_unknown_rules() {
        let rules = parse_rules("program = { SOI ~ missing ~ EOI }\nextra = { \"x\" }\n");
        let result = validate_rules(&rules, &[Rule::program, Rule::body, Rule::EOI]);
        assert!(!result.is_valid());
        let errors = result.errors.join("\n");
        assert!(errors.contains("undefined rule `missing`"));
        assert!(errors.contains("`extra` (line 2) is missing from the rule table"));
        assert!(errors.contains("rule table lists `body`"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("`extra`"));
    }
}
