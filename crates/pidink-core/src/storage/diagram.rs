//! Transport-neutral diagram record.

use crate::shapes::ShapeType;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One placed shape: its type and origin. Connections are not recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramEntry {
    #[serde(rename = "pidShape")]
    pub pid_shape: ShapeType,
    pub position: Point,
}

/// Placed shapes in z-order, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagram {
    entries: Vec<DiagramEntry>,
}

impl Diagram {
    pub fn new(entries: Vec<DiagramEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DiagramEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagramEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON. Missing shape-type fields take dataset defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<DiagramEntry> for Diagram {
    fn from_iter<I: IntoIterator<Item = DiagramEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagram {
    type Item = DiagramEntry;
    type IntoIter = std::vec::IntoIter<DiagramEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagram {
    type Item = &'a DiagramEntry;
    type IntoIter = std::slice::Iter<'a, DiagramEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
