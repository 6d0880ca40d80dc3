//! Board configuration.

use crate::model::ConnectorStyle;
use crate::viewport::ZoomLimits;
use kurbo::Size;
use std::time::Duration;

/// Which modifier must be held for wheel zoom. Without it the wheel is
/// left to the page (plain scrolling never zooms the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomModifier {
    #[default]
    Shift,
    Ctrl,
    Alt,
    Meta,
}

/// Tunables for a board instance. `Default` matches the stock board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Button zoom multiplies the scale by `exp(±zoom_step)`; a wheel notch
    /// uses a third of that.
    pub zoom_step: f64,
    pub reset_duration: Duration,
    pub zoom_modifier: ZoomModifier,
    /// Initial value of the connection graph's global drag switch.
    pub elements_draggable: bool,
    pub default_node_size: Size,
    /// Smallest size a resize gesture may shrink a node to.
    pub min_node_size: Size,
    /// Style of committed connections.
    pub connector: ConnectorStyle,
    /// Style declared for link-affordance sources and node targets.
    pub selector: ConnectorStyle,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.4,
            max_scale: 1.5,
            zoom_step: 0.3,
            reset_duration: Duration::from_millis(200),
            zoom_modifier: ZoomModifier::Shift,
            elements_draggable: true,
            default_node_size: Size::new(200.0, 120.0),
            min_node_size: Size::new(40.0, 40.0),
            connector: ConnectorStyle::committed(),
            selector: ConnectorStyle::selector(),
        }
    }
}

impl BoardConfig {
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.min_scale > 0.0 && self.min_scale.is_finite()) {
            return Err(format!("min_scale must be positive, got {}", self.min_scale));
        }
        if !(self.max_scale >= self.min_scale && self.max_scale.is_finite()) {
            return Err(format!(
                "max_scale {} is below min_scale {}",
                self.max_scale, self.min_scale
            ));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step.is_finite()) {
            return Err(format!("zoom_step must be positive, got {}", self.zoom_step));
        }
        Ok(())
    }
}
