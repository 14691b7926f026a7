//! Fallback style values consulted when no rule supplied a property.

use std::collections::HashMap;

use crate::geometry::Color;

use super::value::{StyleBox, StyleValue};

/// Named fallback values, keyed by style property name.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    values: HashMap<String, StyleValue>,
}

impl Theme {
    /// An empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat grey boxes for panels and buttons.
    pub fn with_defaults() -> Self {
        Self::new()
            .with("panel", StyleBox::new().with_background(Color::rgb(0.2, 0.2, 0.2)))
            .with(
                "stylebox",
                StyleBox::new()
                    .with_background(Color::rgb(0.4, 0.4, 0.4))
                    .with_content_margin(2.0),
            )
    }

    /// Set a fallback value (builder).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.values.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_boxes() {
        let theme = Theme::with_defaults();
        assert!(matches!(theme.get("panel"), Some(StyleValue::StyleBox(_))));
        assert!(matches!(theme.get("stylebox"), Some(StyleValue::StyleBox(_))));
        assert!(theme.get("missing").is_none());
    }

    #[test]
    fn set_overrides() {
        let mut theme = Theme::new().with("separation", 2.0);
        theme.set("separation", 6.0);
        assert_eq!(theme.get("separation"), Some(&StyleValue::Number(6.0)));
    }
}
