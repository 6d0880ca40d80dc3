//! Input abstraction layer.
//!
//! Normalizes raw pointer, wheel, drag-and-drop and button input into one
//! `InputEvent` enum consumed by the board's transition function. Hosts
//! resolve the pressed element themselves (their hit target) and pass its
//! scene handle along.

use mb_core::{ElementId, ZoomModifier};
use std::time::Duration;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub fn holds(&self, modifier: ZoomModifier) -> bool {
        match modifier {
            ZoomModifier::Shift => self.shift,
            ZoomModifier::Ctrl => self.ctrl,
            ZoomModifier::Alt => self.alt,
            ZoomModifier::Meta => self.meta,
        }
    }
}

/// The drop effect a drag-and-drop carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Link,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// A normalized board input event. Coordinates are screen pixels relative
/// to the board container.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, target: ElementId },

    /// `pressed` is true while the primary button is held.
    PointerMove { x: f64, y: f64, pressed: bool },

    /// `target` is the element under the pointer at release, if any.
    PointerUp {
        x: f64,
        y: f64,
        target: Option<ElementId>,
    },

    DoubleClick { target: ElementId },

    Wheel {
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
        modifiers: Modifiers,
    },

    DragOver { drop_effect: DropEffect },

    Drop {
        x: f64,
        y: f64,
        drop_effect: DropEffect,
        /// Node template payload carried by the drag.
        payload: String,
    },

    ZoomButton(ZoomDirection),

    ResetViewButton,

    /// Animation-frame callback; `elapsed` is the time since the last frame.
    AnimationFrame { elapsed: Duration },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, target: ElementId) -> Self {
        Self::PointerDown { x, y, target }
    }

    pub fn pointer_move(x: f64, y: f64, pressed: bool) -> Self {
        Self::PointerMove { x, y, pressed }
    }

    pub fn pointer_up(x: f64, y: f64, target: Option<ElementId>) -> Self {
        Self::PointerUp { x, y, target }
    }

    /// Wheel delta, preferring the vertical axis.
    pub fn wheel_delta(&self) -> Option<f64> {
        match self {
            Self::Wheel {
                delta_x, delta_y, ..
            } => Some(if *delta_y == 0.0 { *delta_x } else { *delta_y }),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointerDown",
            Self::PointerMove { .. } => "pointerMove",
            Self::PointerUp { .. } => "pointerUp",
            Self::DoubleClick { .. } => "doubleClick",
            Self::Wheel { .. } => "wheel",
            Self::DragOver { .. } => "dragOver",
            Self::Drop { .. } => "drop",
            Self::ZoomButton(_) => "zoomButton",
            Self::ResetViewButton => "resetViewButton",
            Self::AnimationFrame { .. } => "animationFrame",
        }
    }
}
