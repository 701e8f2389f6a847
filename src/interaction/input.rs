use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// Wheel notches; negative zooms in.
    Scroll { delta: f64 },
    /// Explicit double-tap/double-click signal from the host toolkit.
    DoubleTap,
    Leave,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl PointerButtons {
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
    };
    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
    };
    pub const SECONDARY: Self = Self {
        primary: false,
        secondary: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub buttons: PointerButtons,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        let buttons = match kind {
            PointerEventKind::Down | PointerEventKind::DoubleTap => PointerButtons::PRIMARY,
            _ => PointerButtons::NONE,
        };
        Self { kind, x, y, buttons }
    }

    #[must_use]
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    #[must_use]
    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    #[must_use]
    pub fn scroll(x: f64, y: f64, delta: f64) -> Self {
        Self::new(PointerEventKind::Scroll { delta }, x, y)
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// Keyboard shortcuts understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCommand {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    ResetView,
    DeleteSelected,
    Cancel,
    FinishPolyline,
}
