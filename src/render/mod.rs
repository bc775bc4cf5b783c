//! Label rendering: design state in, renderer-agnostic scene graph out.
//!
//! Units are millimetres, y-down, x-right, with the origin at the top-left of
//! the label, remote or sheet being drawn. Rendering never fails: missing
//! configs and unrenderable icons degrade to empty slots.

pub mod defaults;
pub mod geometry;
pub mod label;
pub mod shapes;
pub mod sheet;
pub mod svg;
pub mod types;

pub use geometry::{PathCommand, PathData, button_shape, rounded_rect_path};
pub use label::{label_scene, multi_tap_icon_size, render_button_at, render_button_label, strike_lines, tap_marker};
pub use shapes::{CircleNode, GlyphNode, GroupNode, LineNode, Node, PathNode, Primitive, RectNode, TextNode};
pub use sheet::{StickerSheet, render_remote, render_sticker_sheet, sheet_layout};
pub use svg::to_svg;
pub use types::{LabelOptions, LineCap, Scene, Style, Transform, Watermark};
