//! Manager configuration.
//!
//! [`UiConfig`] is consumed by [`UiManager::new`](crate::manager::UiManager::new).

use crate::geometry::Vec2;
use crate::style::Theme;

/// Configuration for a [`UiManager`](crate::manager::UiManager).
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Screen size in pixels.
    pub screen_size: Vec2,
    /// Initial UI scale factor.
    pub ui_scale: f32,
    /// Optional stylesheet source, parsed at construction.
    pub stylesheet: Option<String>,
    /// Fallback style values.
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(1280.0, 720.0),
            ui_scale: 1.0,
            stylesheet: None,
            theme: Theme::with_defaults(),
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen size (builder).
    pub fn with_screen_size(mut self, size: Vec2) -> Self {
        self.screen_size = size;
        self
    }

    /// Set the initial UI scale (builder).
    pub fn with_ui_scale(mut self, scale: f32) -> Self {
        self.ui_scale = scale;
        self
    }

    /// Set the stylesheet source (builder).
    pub fn with_stylesheet(mut self, source: impl Into<String>) -> Self {
        self.stylesheet = Some(source.into());
        self
    }

    /// Replace the theme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = UiConfig::new();
        assert_eq!(config.screen_size, Vec2::new(1280.0, 720.0));
        assert_eq!(config.ui_scale, 1.0);
        assert!(config.stylesheet.is_none());
        assert!(config.theme.get("panel").is_some());
    }

    #[test]
    fn builder() {
        let config = UiConfig::new()
            .with_screen_size(Vec2::new(640.0, 480.0))
            .with_ui_scale(2.0)
            .with_stylesheet("Button { a: 1; }")
            .with_theme(Theme::new());
        assert_eq!(config.screen_size, Vec2::new(640.0, 480.0));
        assert_eq!(config.ui_scale, 2.0);
        assert_eq!(config.stylesheet.as_deref(), Some("Button { a: 1; }"));
        assert!(config.theme.get("panel").is_none());
    }
}
