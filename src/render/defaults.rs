//! Fixed sizes and colors used by the label renderer (all in millimetres)

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#ffffff";

// Icons
pub const ICON_PADDING_MM: f64 = 2.0;
pub const SINGLE_ICON_MIN_MM: f64 = 5.0;
pub const SINGLE_ICON_MAX_MM: f64 = 10.0;
pub const MULTI_ICON_MIN_MM: f64 = 5.0;
pub const MULTI_ICON_MAX_MM: f64 = 9.0;
/// Text content font size, as a fraction of the icon size
pub const TEXT_SCALE: f64 = 0.45;
/// Rough advance width of one character, as a fraction of the font size
pub const CHAR_WIDTH: f64 = 0.6;

// Tap markers
pub const MARKER_MM: f64 = 2.0;
/// Gap between an icon and its marker
pub const GAP_MM: f64 = 1.0;
pub const MARKER_STROKE_MM: f64 = 0.25;
pub const DOUBLE_MARKER_SPACING_MM: f64 = 0.6;
pub const LONG_MARKER_WIDTH: f64 = 2.6;
pub const LONG_MARKER_HEIGHT: f64 = 0.8;

// Strike-through, as fractions of the icon size
pub const STRIKE_REACH: f64 = 0.42;
pub const STRIKE_OFFSET: f64 = 0.06;
pub const STRIKE_WIDTH: f64 = 0.085;

// Dividers
pub const DIVIDER_INSET_MM: f64 = 1.0;
pub const DIVIDER_STROKE_MM: f64 = 0.2;

// Watermark
pub const WATERMARK_FONT_MIN_MM: f64 = 5.0;
pub const WATERMARK_FONT_MAX_MM: f64 = 12.0;
pub const WATERMARK_ROTATION_DEG: f64 = -30.0;
pub const WATERMARK_COLOR: &str = "#808080";

// Sheets and remotes
pub const GUIDE_COLOR: &str = "#9e9e9e";
pub const GUIDE_STROKE_MM: f64 = 0.1;
pub const GUIDE_DASH_MM: f64 = 1.0;
pub const REMOTE_OUTLINE_STROKE_MM: f64 = 0.3;
pub const CUTOUT_COLOR: &str = "#d0d0d0";
pub const SCALE_BAR_MM: f64 = 10.0;
/// Extra space below a remote preview that carries a scale bar
pub const SCALE_BAR_SPACE_MM: f64 = 8.0;
pub const SCALE_BAR_STROKE_MM: f64 = 0.3;
pub const SCALE_BAR_FONT_MM: f64 = 2.5;
