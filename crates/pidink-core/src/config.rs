//! Editor configuration.

use crate::error::{EditorError, EditorResult};
use crate::shapes::SerializableColor;
use kurbo::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Appearance of anchor affordances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorStyle {
    pub color: SerializableColor,
    /// Radius when idle.
    pub radius: f64,
    /// Radius while hovered.
    pub radius_over: f64,
}

impl AnchorStyle {
    /// Larger targets for touch screens.
    pub fn touch() -> Self {
        Self {
            radius: 10.0,
            radius_over: 22.0,
            ..Self::default()
        }
    }
}

impl Default for AnchorStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::light_gray(),
            radius: 5.0,
            radius_over: 7.0,
        }
    }
}

/// Stroke used for icon outlines and connecting lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 1.4,
        }
    }
}

/// Limits applied while the renderer resizes a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_width: 80.0,
            min_height: 10.0,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Id of the element the canvas mounts into.
    pub container: String,
    /// Id of the icon toolbox mount, when a toolbox is shown.
    pub toolbox: Option<String>,
    /// Whether the host is a touch device.
    pub touch: bool,
    pub anchor: AnchorStyle,
    pub stroke: StrokeStyle,
    /// Offset of the name label from the shape origin.
    pub label_offset: Vec2,
    pub label_font_size: f64,
    pub resize: ResizeLimits,
    pub canvas_size: Size,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container: "app".to_string(),
            toolbox: None,
            touch: false,
            anchor: AnchorStyle::default(),
            stroke: StrokeStyle::default(),
            label_offset: Vec2::new(0.0, -24.0),
            label_font_size: 12.0,
            resize: ResizeLimits::default(),
            canvas_size: Size::new(800.0, 600.0),
        }
    }
}

impl EditorConfig {
    /// Default configuration tuned for touch input.
    pub fn for_touch() -> Self {
        Self {
            touch: true,
            anchor: AnchorStyle::touch(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(|e| EditorError::Serialization(e.to_string()))
    }

    /// Check that the required mount points are present.
    pub fn validate(&self) -> EditorResult<()> {
        if self.container.trim().is_empty() {
            return Err(EditorError::MissingMountPoint("container".to_string()));
        }
        if let Some(toolbox) = &self.toolbox {
            if toolbox.trim().is_empty() {
                return Err(EditorError::MissingMountPoint("toolbox".to_string()));
            }
        }
        Ok(())
    }
}

/// Constrain a resize of `old` into `new`, keeping the aspect ratio of `old`.
///
/// Width never drops below `min_width`; if the resulting height falls under
/// `min_height` the height is clamped and the width follows the ratio.
pub fn constrain_resize(old: Rect, new: Rect, limits: &ResizeLimits) -> Rect {
    if old.height() <= 0.0 {
        return new;
    }
    let ratio = old.width() / old.height();
    let mut width = new.width().max(limits.min_width);
    let mut height = width / ratio;
    if height < limits.min_height {
        height = limits.min_height;
        width = height * ratio;
    }
    Rect::new(new.x0, new.y0, new.x0 + width, new.y0 + height)
}
