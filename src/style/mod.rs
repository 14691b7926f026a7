//! Style model: values, selectors, specificity, rules, stylesheets, themes.
//!
//! - [`value`]: resolved [`StyleValue`]s and typed extraction
//! - [`selector`]: [`Selector`] predicates over controls
//! - [`specificity`]: the `(id, class, type)` ranking
//! - [`stylesheet`]: [`StyleRule`]s and the type-indexed [`Stylesheet`]
//! - [`tokenizer`] / [`parser`]: stylesheet source text
//! - [`theme`]: fallback values

pub mod parser;
pub mod selector;
pub mod specificity;
pub mod stylesheet;
pub mod theme;
pub mod tokenizer;
pub mod value;

pub use parser::ParseError;
pub use selector::{Selector, SelectorElement};
pub use specificity::Specificity;
pub use stylesheet::{StyleProperty, StyleRule, Stylesheet};
pub use theme::Theme;
pub use value::{FromStyleValue, StyleBox, StyleValue};
