//! Harness: drive a headless [`UiManager`] with high-level input.

use crate::config::UiConfig;
use crate::error::UiResult;
use crate::event::{
    InputEvent, Key, KeyEvent, KeyState, Modifiers, MouseButton, MouseButtonEvent, MouseWheelEvent,
    TextEvent, UiEvent,
};
use crate::geometry::Vec2;
use crate::manager::UiManager;

use super::recorder::RecordingRenderer;

/// Frame delta used by [`Harness::frame`].
pub const FRAME_DT: f32 = 1.0 / 60.0;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A manager plus helpers for simulating user interaction.
///
/// Positions are screen pixels, as a host would report them.
///
/// # Examples
///
/// ```ignore
/// use gilt_gui::testing::Harness;
///
/// let mut h = Harness::new();
/// h.click(20.0, 20.0)?;
/// h.frame()?;
/// ```
pub struct Harness {
    ui: UiManager,
}

impl Harness {
    /// A 1280×720 manager at scale 1.0.
    pub fn new() -> Self {
        Self { ui: UiManager::new_testing() }
    }

    pub fn with_config(config: UiConfig) -> UiResult<Self> {
        Ok(Self { ui: UiManager::new(config)? })
    }

    pub fn ui(&self) -> &UiManager {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiManager {
        &mut self.ui
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn press(&mut self, x: f32, y: f32) -> UiResult<bool> {
        self.button(MouseButton::Left, KeyState::Down, x, y)
    }

    pub fn release(&mut self, x: f32, y: f32) -> UiResult<bool> {
        self.button(MouseButton::Left, KeyState::Up, x, y)
    }

    /// Left press and release at the same point. Returns whether the press
    /// was consumed.
    pub fn click(&mut self, x: f32, y: f32) -> UiResult<bool> {
        let consumed = self.press(x, y)?;
        self.release(x, y)?;
        Ok(consumed)
    }

    pub fn right_click(&mut self, x: f32, y: f32) -> UiResult<bool> {
        let consumed = self.button(MouseButton::Right, KeyState::Down, x, y)?;
        self.button(MouseButton::Right, KeyState::Up, x, y)?;
        Ok(consumed)
    }

    fn button(&mut self, button: MouseButton, state: KeyState, x: f32, y: f32) -> UiResult<bool> {
        self.ui.handle_input(InputEvent::MouseButton(MouseButtonEvent {
            button,
            state,
            position: Vec2::new(x, y),
        }))
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) -> UiResult<()> {
        self.ui
            .handle_input(InputEvent::MouseMove { position: Vec2::new(x, y) })?;
        Ok(())
    }

    /// Vertical wheel step at (x, y); positive scrolls up.
    pub fn scroll(&mut self, x: f32, y: f32, delta: f32) -> UiResult<bool> {
        self.ui.handle_input(InputEvent::MouseWheel(MouseWheelEvent {
            delta: Vec2::new(0.0, delta),
            position: Vec2::new(x, y),
        }))
    }

    /// Press and release `key` with no modifiers.
    pub fn press_key(&mut self, key: Key) -> UiResult<bool> {
        self.press_key_with(key, Modifiers::NONE)
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> UiResult<bool> {
        let down = KeyEvent::new(key, modifiers);
        let consumed = self.ui.handle_input(InputEvent::Key(down))?;
        self.ui.handle_input(InputEvent::Key(down.released()))?;
        Ok(consumed)
    }

    /// Send each char of `text` as a text event.
    pub fn type_text(&mut self, text: &str) -> UiResult<()> {
        for code_point in text.chars() {
            self.ui.handle_input(InputEvent::Text(TextEvent { code_point }))?;
        }
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) -> UiResult<()> {
        self.ui.handle_input(InputEvent::Resize { width, height })?;
        Ok(())
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Run one update and one frame update.
    pub fn frame(&mut self) -> UiResult<()> {
        self.ui.update(FRAME_DT);
        self.ui.frame_update(FRAME_DT)
    }

    /// Render the tree into a fresh recorder.
    pub fn render(&self) -> RecordingRenderer {
        let mut renderer = RecordingRenderer::new();
        self.ui.render(&mut renderer);
        renderer
    }

    pub fn events(&mut self) -> Vec<UiEvent> {
        self.ui.drain_events()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
