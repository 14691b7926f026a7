//! Selectors: predicates over a control and its ancestors.
//!
//! The base case is a [`SelectorElement`] matched against one control's type
//! chain, style identifier, style classes and pseudo-classes. Elements combine
//! with logical operators and with descendant/child combinators.

use crate::control::{ControlId, ControlTree};

use super::specificity::Specificity;

/// Base type name every control carries. A type constraint naming it does
/// not narrow anything, so it is not used for rule indexing.
pub const BASE_TYPE: &str = "Control";

// ---------------------------------------------------------------------------
// SelectorElement
// ---------------------------------------------------------------------------

/// Single-control constraint: `Type#identifier.class:pseudo`.
///
/// Every present part must match; absent parts match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorElement {
    pub element_type: Option<String>,
    pub identifier: Option<String>,
    pub classes: Vec<String>,
    pub pseudo_classes: Vec<String>,
}

impl SelectorElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_pseudo_class(mut self, pseudo: impl Into<String>) -> Self {
        self.pseudo_classes.push(pseudo.into());
        self
    }

    fn matches(&self, tree: &ControlTree, id: ControlId) -> bool {
        let Some(data) = tree.get(id) else {
            return false;
        };
        if let Some(element_type) = &self.element_type {
            if !data.is_type(element_type) {
                return false;
            }
        }
        if let Some(identifier) = &self.identifier {
            if data.style_identifier.as_deref() != Some(identifier.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| data.has_style_class(c))
            && self.pseudo_classes.iter().all(|p| data.has_style_pseudo_class(p))
    }

    fn specificity(&self) -> Specificity {
        let classes = self.classes.len() + self.pseudo_classes.len();
        Specificity {
            id_count: u16::from(self.identifier.is_some()),
            class_count: u16::try_from(classes).unwrap_or(u16::MAX),
            type_count: u16::from(self.element_type.is_some()),
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Element(SelectorElement),
    /// Every part matches.
    And(Vec<Selector>),
    /// At least one part matches.
    Or(Vec<Selector>),
    Not(Box<Selector>),
    /// `ancestor descendant`
    Descendant {
        ancestor: Box<Selector>,
        descendant: Box<Selector>,
    },
    /// `parent > child`
    Child {
        parent: Box<Selector>,
        child: Box<Selector>,
    },
}

impl Selector {
    pub fn element(element: SelectorElement) -> Self {
        Self::Element(element)
    }

    /// `Type`
    pub fn of_type(element_type: impl Into<String>) -> Self {
        Self::Element(SelectorElement::new().with_type(element_type))
    }

    /// `.class`
    pub fn class(class: impl Into<String>) -> Self {
        Self::Element(SelectorElement::new().with_class(class))
    }

    /// `#identifier`
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::Element(SelectorElement::new().with_identifier(identifier))
    }

    pub fn descendant(ancestor: Selector, descendant: Selector) -> Self {
        Self::Descendant {
            ancestor: Box::new(ancestor),
            descendant: Box::new(descendant),
        }
    }

    pub fn child(parent: Selector, child: Selector) -> Self {
        Self::Child {
            parent: Box::new(parent),
            child: Box::new(child),
        }
    }

    /// Whether the control `id` satisfies this selector.
    pub fn matches(&self, tree: &ControlTree, id: ControlId) -> bool {
        match self {
            Self::Element(element) => element.matches(tree, id),
            Self::And(parts) => parts.iter().all(|p| p.matches(tree, id)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(tree, id)),
            Self::Not(inner) => tree.contains(id) && !inner.matches(tree, id),
            Self::Descendant { ancestor, descendant } => {
                descendant.matches(tree, id)
                    && tree.ancestors(id).into_iter().any(|a| ancestor.matches(tree, a))
            }
            Self::Child { parent, child } => {
                child.matches(tree, id)
                    && tree.parent(id).is_some_and(|p| parent.matches(tree, p))
            }
        }
    }

    pub fn specificity(&self) -> Specificity {
        match self {
            Self::Element(element) => element.specificity(),
            Self::And(parts) => parts
                .iter()
                .fold(Specificity::ZERO, |acc, p| acc + p.specificity()),
            Self::Or(parts) => parts
                .iter()
                .map(Selector::specificity)
                .max()
                .unwrap_or(Specificity::ZERO),
            Self::Not(inner) => inner.specificity(),
            Self::Descendant { ancestor, descendant } => {
                ancestor.specificity() + descendant.specificity()
            }
            Self::Child { parent, child } => parent.specificity() + child.specificity(),
        }
    }

    /// The single concrete type a matching control must be, if any.
    ///
    /// Rules with a type constraint are indexed by it; the rest are checked
    /// against every control.
    pub fn type_constraint(&self) -> Option<&str> {
        match self {
            Self::Element(element) => element
                .element_type
                .as_deref()
                .filter(|t| *t != BASE_TYPE),
            Self::And(parts) => parts.iter().find_map(Selector::type_constraint),
            Self::Descendant { descendant, .. } => descendant.type_constraint(),
            Self::Child { child, .. } => child.type_constraint(),
            Self::Or(_) | Self::Not(_) => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
