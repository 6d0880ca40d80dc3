//! Pan/zoom state and screen ↔ board coordinate conversion.
//!
//! Convention: `screen = board * scale + pan`. The board is unbounded, so
//! `pan` is never clamped; `scale` is kept inside [`ZoomLimits`] by whoever
//! mutates it.

use kurbo::{Point, Vec2};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl ViewportState {
    pub const IDENTITY: ViewportState = ViewportState {
        pan_x: 0.0,
        pan_y: 0.0,
        scale: 1.0,
    };

    pub fn new(pan: Vec2, scale: f64) -> Self {
        Self {
            pan_x: pan.x,
            pan_y: pan.y,
            scale,
        }
    }

    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }

    pub fn screen_to_board(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.pan()) / self.scale).to_point()
    }

    pub fn board_to_screen(&self, board: Point) -> Point {
        (board.to_vec2() * self.scale + self.pan()).to_point()
    }

    /// Convert a pointer delta (screen pixels) into board units.
    pub fn screen_delta_to_board(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// The state after zooming to `scale` while keeping the board point under
    /// `focal` (screen space) fixed.
    #[must_use]
    pub fn zoomed_around(&self, scale: f64, focal: Point) -> Self {
        let anchor = self.screen_to_board(focal);
        let pan = focal.to_vec2() - anchor.to_vec2() * scale;
        Self::new(pan, scale)
    }

    /// Linear interpolation toward `to`, `t` in [0, 1].
    #[must_use]
    pub fn lerp(&self, to: &ViewportState, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            pan_x: self.pan_x + (to.pan_x - self.pan_x) * t,
            pan_y: self.pan_y + (to.pan_y - self.pan_y) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}
