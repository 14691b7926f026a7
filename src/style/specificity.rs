//! Selector specificity.
//!
//! Specificity ranks how precisely a selector targets a control:
//!
//! ```text
//! (id_count, class_count, type_count)
//! ```
//!
//! Fields are ordered so that the derived `Ord` (lexicographic) matches the
//! cascade: an identifier outranks any number of classes, and classes outrank
//! any number of types. Pseudo-classes count as classes. Declaration order is
//! not part of the tuple; the style engine breaks ties by rule index.

use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// Number of identifier constraints (`#id`).
    pub id_count: u16,
    /// Number of class and pseudo-class constraints (`.class`, `:hover`).
    pub class_count: u16,
    /// Number of type constraints (`Button`).
    pub type_count: u16,
}

impl Specificity {
    pub const ZERO: Specificity = Specificity { id_count: 0, class_count: 0, type_count: 0 };

    pub const fn new(id_count: u16, class_count: u16, type_count: u16) -> Self {
        Self { id_count, class_count, type_count }
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity {
            id_count: self.id_count.saturating_add(rhs.id_count),
            class_count: self.class_count.saturating_add(rhs.class_count),
            type_count: self.type_count.saturating_add(rhs.type_count),
        }
    }
}
