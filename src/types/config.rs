use serde::{Deserialize, Serialize};

use super::Axis;

/// Default minimum size of a column (CSS pixels)
pub const DEFAULT_MIN_WIDTH: f32 = 10.0;

/// Default minimum size of a row (CSS pixels)
pub const DEFAULT_MIN_HEIGHT: f32 = 10.0;

/// Default along-axis thickness of a resize bar (CSS pixels)
pub const DEFAULT_BAR_THICKNESS: f32 = 4.0;

/// Default delay before a drag that left the drag surface is dropped
pub const DEFAULT_DROP_GRACE_MS: u32 = 200;

/// Default class shared by every bar element
pub const DEFAULT_BAR_CLASS: &str = "table-resize-bar";

/// Resize overlay configuration.
///
/// Every field has a default, so JavaScript callers may pass a partial
/// object (`{ minWidth: 24 }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeConfig {
    /// Columns are never shrunk below this width
    pub min_width: f32,
    /// Rows are never shrunk below this height
    pub min_height: f32,
    /// Along-axis thickness of the bars, centered on the boundary
    pub bar_thickness: f32,
    /// Grace period after the pointer leaves the drag surface
    pub drop_grace_ms: u32,
    /// Class put on every bar; `-col` / `-row` variants are added per axis
    pub bar_class: String,
    /// Paint bars with a translucent background (they are invisible otherwise)
    pub debug_bars: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            bar_thickness: DEFAULT_BAR_THICKNESS,
            drop_grace_ms: DEFAULT_DROP_GRACE_MS,
            bar_class: DEFAULT_BAR_CLASS.to_string(),
            debug_bars: false,
        }
    }
}

impl ResizeConfig {
    /// Minimum size for units on `axis`
    pub fn min_size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Col => self.min_width,
            Axis::Row => self.min_height,
        }
    }

    /// Class distinguishing bars of one axis
    pub fn axis_class(&self, axis: Axis) -> String {
        match axis {
            Axis::Col => format!("{}-col", self.bar_class),
            Axis::Row => format!("{}-row", self.bar_class),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ResizeConfig = serde_json::from_str(r#"{"minWidth": 24}"#).unwrap();
        assert_eq!(config.min_width, 24.0);
        assert_eq!(config.min_height, DEFAULT_MIN_HEIGHT);
        assert_eq!(config.drop_grace_ms, 200);
        assert_eq!(config.bar_class, "table-resize-bar");
    }

    #[test]
    fn test_axis_helpers() {
        let config = ResizeConfig::default();
        assert_eq!(config.min_size(Axis::Row), 10.0);
        assert_eq!(config.axis_class(Axis::Col), "table-resize-bar-col");
        assert_eq!(config.axis_class(Axis::Row), "table-resize-bar-row");
    }
}
