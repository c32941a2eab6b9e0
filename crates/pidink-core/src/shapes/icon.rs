//! Shape types and the icon dataset they are loaded from.

use super::anchor::{AnchorKind, AnchorSpec};
use kurbo::{Point, Rect};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Name given to the synthetic shape placed when a line is released on empty canvas.
pub const TERMINATOR_NAME: &str = "Terminator";

/// Radius of the terminator loop.
const TERMINATOR_RADIUS: f64 = 3.0;

/// Category of a P&ID icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconCategory {
    #[default]
    #[serde(alias = "")]
    Valve,
    Pump,
    Compressor,
    HeatExchanger,
    Separator,
    Tank,
    Pipe,
    Fitting,
    Instrument,
    ControlValve,
    /// Any category this build does not know about.
    #[serde(other)]
    Other,
}

fn default_name() -> String {
    "Unnamed".to_string()
}

/// Treat `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn name_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|name| !name.is_empty())
        .unwrap_or_else(default_name))
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Immutable definition of an icon: outline, size and connection points.
///
/// Shape types are loaded once and shared between every instance placed on the
/// canvas, so they are handed around as `Arc<ShapeType>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeType {
    /// Display name, also used as the label under the icon.
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,
    /// SVG path data for the outline.
    #[serde(rename = "path", default, deserialize_with = "null_as_default")]
    pub path_data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub category: IconCategory,
    /// Connection points, addressed by index.
    #[serde(default, deserialize_with = "null_as_default")]
    pub anchors: Vec<AnchorSpec>,
    /// Set only on the loop placed when a line is released on empty canvas.
    #[serde(default, skip_serializing_if = "is_false", deserialize_with = "null_as_default")]
    pub terminal: bool,
}

impl ShapeType {
    /// Create a shape type with no anchors.
    pub fn new(name: impl Into<String>, path_data: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            path_data: path_data.into(),
            width,
            height,
            category: IconCategory::default(),
            anchors: Vec::new(),
            terminal: false,
        }
    }

    /// Builder-style anchor registration.
    pub fn with_anchor(mut self, anchor: AnchorSpec) -> Self {
        self.anchors.push(anchor);
        self
    }

    pub fn with_category(mut self, category: IconCategory) -> Self {
        self.category = category;
        self
    }

    /// The minimal closed-loop icon used to terminate a line released on empty
    /// canvas. The loop fills its bounds; both anchors sit on its left edge.
    pub fn terminator() -> Self {
        let r = TERMINATOR_RADIUS;
        let d = 2.0 * r;
        let path = format!("M 0 {r} A {r} {r} 0 1 0 {d} {r} A {r} {r} 0 1 0 0 {r} Z");
        let mut shape = Self::new(TERMINATOR_NAME, path, d, d)
            .with_category(IconCategory::Fitting)
            .with_anchor(AnchorSpec::new(AnchorKind::In, 0.0, r))
            .with_anchor(AnchorSpec::new(AnchorKind::Out, 0.0, r));
        shape.terminal = true;
        shape
    }

    /// Whether this is the synthetic terminator shape.
    pub fn is_terminator(&self) -> bool {
        self.terminal
    }

    /// Get an anchor by index.
    pub fn anchor(&self, index: usize) -> Option<&AnchorSpec> {
        self.anchors.get(index)
    }

    /// Local-space bounds of the icon placed at `origin`.
    pub fn bounds_at(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, origin.x + self.width, origin.y + self.height)
    }
}

/// A dataset of icons, as published by the open P&ID icon project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Icons in dataset order.
    #[serde(default)]
    pub data: Vec<Arc<ShapeType>>,
}

impl IconSet {
    /// Parse a dataset from JSON. Missing optional fields of each icon are
    /// filled with their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let set: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded icon set {:?} with {} icons",
            set.dataset.as_deref().unwrap_or("unnamed"),
            set.data.len()
        );
        Ok(set)
    }

    /// Find an icon by name.
    pub fn get(&self, name: &str) -> Option<Arc<ShapeType>> {
        self.data.iter().find(|t| t.name == name).cloned()
    }

    /// Icons of a category, in dataset order.
    pub fn by_category(&self, category: IconCategory) -> impl Iterator<Item = &Arc<ShapeType>> {
        self.data.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
