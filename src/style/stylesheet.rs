//! Style rules and the immutable, type-indexed stylesheet.

use std::collections::HashMap;

use super::parser::{self, ParseError};
use super::selector::Selector;
use super::specificity::Specificity;
use super::value::StyleValue;

// ---------------------------------------------------------------------------
// StyleProperty / StyleRule
// ---------------------------------------------------------------------------

/// One `name: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProperty {
    pub name: String,
    pub value: StyleValue,
}

impl StyleProperty {
    pub fn new(name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A selector with the properties it applies, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selector: Selector,
    pub properties: Vec<StyleProperty>,
    pub specificity: Specificity,
}

impl StyleRule {
    pub fn new(selector: Selector, properties: Vec<StyleProperty>) -> Self {
        let specificity = selector.specificity();
        Self {
            selector,
            properties,
            specificity,
        }
    }
}

// ---------------------------------------------------------------------------
// Stylesheet
// ---------------------------------------------------------------------------

/// Ordered rule set, partitioned for lookup.
///
/// Rules whose selector names a concrete type are indexed under that type;
/// the rest go to the unsorted list and are considered for every control.
/// Rule indices are declaration order and break specificity ties.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
    type_sorted: HashMap<String, Vec<usize>>,
    unsorted: Vec<usize>,
}

impl Stylesheet {
    pub fn new(rules: Vec<StyleRule>) -> Self {
        let mut type_sorted: HashMap<String, Vec<usize>> = HashMap::new();
        let mut unsorted = Vec::new();
        for (index, rule) in rules.iter().enumerate() {
            match rule.selector.type_constraint() {
                Some(ty) => type_sorted.entry(ty.to_string()).or_default().push(index),
                None => unsorted.push(index),
            }
        }
        Self {
            rules,
            type_sorted,
            unsorted,
        }
    }

    /// Parse stylesheet source text.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parser::parse_rules(source)?))
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> Option<&StyleRule> {
        self.rules.get(index)
    }

    /// Indices of rules that may apply to a control with the given type chain.
    ///
    /// The result is the unsorted rules followed by the rules indexed under
    /// each type in `type_chain`, without duplicates.
    pub fn candidate_rules(&self, type_chain: &[&str]) -> Vec<usize> {
        let mut candidates = self.unsorted.clone();
        for ty in type_chain.iter().filter(|t| **t != super::selector::BASE_TYPE) {
            if let Some(indices) = self.type_sorted.get(*ty) {
                candidates.extend_from_slice(indices);
            }
        }
        candidates
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
