//! Viewport transform manager: owns pan offset and zoom scale.
//!
//! Two copies of the transform are kept. `live` is what the surface shows
//! right now; `recorded` is the last settled value the board has taken note
//! of (after a zoom, at the end of a gesture, when a reset animation
//! settles). Disabling only stops pan/zoom gestures from being intercepted;
//! it never touches either copy, so disable → enable is lossless.

use crate::input::ZoomDirection;
use mb_core::{Point, Size, Vec2, ViewportState, ZoomLimits};
use std::time::Duration;

/// An in-flight animated reset toward the identity transform.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResetAnimation {
    from: ViewportState,
    elapsed: Duration,
    duration: Duration,
}

impl ResetAnimation {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Ease-out progress in [0, 1].
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        1.0 - (1.0 - t) * (1.0 - t)
    }

    fn current(&self) -> ViewportState {
        self.from.lerp(&ViewportState::IDENTITY, self.progress())
    }
}

#[derive(Debug, Clone)]
pub struct ViewportManager {
    live: ViewportState,
    recorded: ViewportState,
    limits: ZoomLimits,
    step: f64,
    reset_duration: Duration,
    /// Size of the bound container; button zoom centers on it.
    container: Size,
    enabled: bool,
    animation: Option<ResetAnimation>,
}

impl ViewportManager {
    pub fn new(limits: ZoomLimits, step: f64, reset_duration: Duration) -> Self {
        let live = ViewportState {
            scale: limits.clamp(1.0),
            ..ViewportState::IDENTITY
        };
        Self {
            live,
            recorded: live,
            limits,
            step,
            reset_duration,
            container: Size::ZERO,
            enabled: true,
            animation: None,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.live
    }

    pub fn recorded(&self) -> ViewportState {
        self.recorded
    }

    pub fn scale(&self) -> f64 {
        self.live.scale
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
    }

    /// Take note of the live transform.
    pub fn record(&mut self) -> ViewportState {
        self.recorded = self.live;
        self.recorded
    }

    /// Returns true if pan/zoom gestures were disabled before.
    pub fn enable(&mut self) -> bool {
        !std::mem::replace(&mut self.enabled, true)
    }

    /// Returns true if pan/zoom gestures were enabled before.
    pub fn disable(&mut self) -> bool {
        std::mem::replace(&mut self.enabled, false)
    }

    pub fn screen_to_board(&self, screen: Point) -> Point {
        self.live.screen_to_board(screen)
    }

    /// Zoom one step around the container center. Works whether or not
    /// gestures are enabled. Returns true if the scale changed.
    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        let factor = match direction {
            ZoomDirection::In => self.step.exp(),
            ZoomDirection::Out => (-self.step).exp(),
        };
        let focal = (self.container.to_vec2() / 2.0).to_point();
        let changed = self.zoom_around(self.live.scale * factor, focal);
        self.record();
        changed
    }

    /// Wheel zoom toward the pointer. A no-op unless the zoom modifier is
    /// held and gestures are enabled. Returns true if the scale changed.
    pub fn zoom_by_gesture(&mut self, wheel_delta: f64, focal: Point, modifier_held: bool) -> bool {
        if !modifier_held || !self.enabled || wheel_delta == 0.0 {
            return false;
        }
        let notch = if wheel_delta < 0.0 { 1.0 } else { -1.0 };
        let factor = (notch * self.step / 3.0).exp();
        let changed = self.zoom_around(self.live.scale * factor, focal);
        self.record();
        changed
    }

    fn zoom_around(&mut self, scale: f64, focal: Point) -> bool {
        self.cancel_animation();
        let scale = self.limits.clamp(scale);
        if scale == self.live.scale {
            return false;
        }
        self.live = self.live.zoomed_around(scale, focal);
        log::trace!("zoom → {:.3}", self.live.scale);
        true
    }

    /// Pan by a screen-space delta. Ignored while disabled.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if !self.enabled || delta == Vec2::ZERO {
            return false;
        }
        self.cancel_animation();
        self.live = ViewportState::new(self.live.pan() + delta, self.live.scale);
        true
    }

    /// Start animating back to pan (0, 0) at scale 1. The recorded state
    /// is only updated once [`advance`](Self::advance) reports it settled.
    pub fn reset_view(&mut self) {
        self.animation = Some(ResetAnimation {
            from: self.live,
            elapsed: Duration::ZERO,
            duration: self.reset_duration,
        });
        if self.reset_duration.is_zero() {
            self.advance(Duration::ZERO);
        }
    }

    /// Step the reset animation. Returns true on the frame it settles.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        animation.tick(dt);
        let done = animation.is_complete();
        let mut target = if done {
            ViewportState::IDENTITY
        } else {
            animation.current()
        };
        target.scale = self.limits.clamp(target.scale);
        self.live = target;
        if done {
            self.animation = None;
            self.record();
            log::debug!("reset animation settled");
        }
        done
    }

    /// Drop an in-flight reset, keeping whatever transform it had reached.
    pub fn cancel_animation(&mut self) -> bool {
        let cancelled = self.animation.take().is_some();
        if cancelled {
            log::debug!("reset animation superseded");
        }
        cancelled
    }
}
