//! Layout and geometry engine for printable remote-control button labels.
//!
//! The pipeline runs leaves first: raw JSON is normalized into a
//! [`DesignState`] (or built from a template [`Example`]), combined with a
//! [`RemoteTemplate`], and rendered into a millimetre scene graph per button,
//! per remote, or per sticker-sheet page. Serializing that scene is up to the
//! host; [`render::to_svg`] is provided for previews.
//!
//! Every operation is pure and synchronous. Malformed content degrades to
//! defaults instead of failing; errors only exist at the JSON boundary.

pub mod clamp;
pub mod design;
pub mod errors;
pub mod icons;
pub mod layout;
pub mod log;
pub mod remote;
pub mod render;
pub mod types;

pub use clamp::{clamp, clamp_count};
pub use design::{
    ButtonConfig, DesignOptions, DesignState, Example, TapKind, build_from_example, normalize, normalize_json,
};
pub use errors::{CatalogError, DesignError};
pub use icons::{FamilyFlags, Glyph, GlyphCatalog, IconFamily, IconResolver, StaticCatalog, resolve_family};
pub use layout::{LayoutRequest, SheetSize, StickerSheetLayout, compute_layout};
pub use remote::{ButtonDef, CornerOverrides, Cutout, RemoteCatalog, RemoteTemplate};
pub use render::{LabelOptions, Scene, StickerSheet, Watermark, render_button_label, render_remote, render_sticker_sheet};
pub use types::{CornerRadii, Point, Rect};
