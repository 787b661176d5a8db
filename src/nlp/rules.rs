//! Ordered first-match rule tables.
//!
//! Each rule pairs a substring predicate with an outcome. A [`RuleSet`] is evaluated top to
//! bottom and the first rule whose predicate holds wins, so the order of rules is part of
//! the behavior.

use serde::{Deserialize, Serialize};

use crate::errors::LexiconError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// At least one term occurs in the text.
    AnyOf(Vec<String>),
    /// Every term occurs in the text.
    AllOf(Vec<String>),
}

impl Predicate {
    pub fn any_of(terms: &[&str]) -> Self {
        Predicate::AnyOf(terms.iter().map(|t| t.to_string()).collect())
    }

    pub fn all_of(terms: &[&str]) -> Self {
        Predicate::AllOf(terms.iter().map(|t| t.to_string()).collect())
    }

    pub fn terms(&self) -> &[String] {
        match self {
            Predicate::AnyOf(terms) | Predicate::AllOf(terms) => terms,
        }
    }

    /// `text` must already be lowercase.
    pub fn holds(&self, text: &str) -> bool {
        match self {
            Predicate::AnyOf(terms) => terms.iter().any(|t| text.contains(t.as_str())),
            Predicate::AllOf(terms) => terms.iter().all(|t| text.contains(t.as_str())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule<T> {
    pub when: Predicate,
    pub then: T,
}

impl<T> Rule<T> {
    pub fn new(when: Predicate, then: T) -> Self {
        Self { when, then }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// Returns the outcome of the first rule that holds for `text`. The text is lowercased
    /// before matching.
    pub fn first_match(&self, text: &str) -> Option<&T> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.when.holds(&lower))
            .map(|rule| &rule.then)
    }

    /// Checks that the table is usable: at least one rule, no rule without terms, no blank
    /// or non-lowercase term.
    pub fn validate(&self, name: &str) -> Result<(), LexiconError> {
        if self.rules.is_empty() {
            return Err(LexiconError::EmptyTable(name.to_string()));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            let terms = rule.when.terms();
            if terms.is_empty() {
                return Err(LexiconError::RuleWithoutTerms {
                    table: name.to_string(),
                    index,
                });
            }
            if let Some(bad) = terms
                .iter()
                .find(|t| t.trim().is_empty() || t.to_lowercase() != **t)
            {
                return Err(LexiconError::InvalidRuleTerm {
                    table: name.to_string(),
                    index,
                    term: bad.clone(),
                });
            }
        }
        Ok(())
    }
}
