//! Widget system for anchor affordances.
//!
//! Shapes remain pure data. The widget manager tracks which shape currently
//! shows its connection points, which anchor is hovered, and which shape is
//! selected for resizing, and turns that into handles for the renderer.

mod handles;
mod manager;

pub use handles::AnchorHandle;
pub use manager::WidgetManager;
