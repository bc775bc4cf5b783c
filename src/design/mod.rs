//! The editable design document and the ways one is produced.

pub mod example;
pub mod model;
pub mod normalize;

pub use example::{Example, PresetExample, UserExample, build_from_example};
pub use model::{
    ButtonConfig, DEFAULT_REMOTE_ID, DesignOptions, DesignState, MarkerColorMode, MarkerFill, StrikeStyle, TapEntry,
    TapKind, TapMap,
};
pub use normalize::{normalize, normalize_json, normalize_with_ids};
