//! Scene-graph value types: styles, transforms, scenes and render options

use crate::types::{BBox, Point};

use super::shapes::{GroupNode, Primitive};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Paint for one primitive. `None` means no fill or no stroke.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub line_cap: LineCap,
    /// Dash and gap length
    pub dash: Option<(f64, f64)>,
}

impl Style {
    pub fn filled(color: impl Into<String>) -> Self {
        Style {
            fill: Some(color.into()),
            ..Style::default()
        }
    }

    pub fn stroked(color: impl Into<String>, width: f64) -> Self {
        Style {
            stroke: Some(color.into()),
            stroke_width: width,
            ..Style::default()
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn with_round_cap(mut self) -> Self {
        self.line_cap = LineCap::Round;
        self
    }

    pub fn with_dash(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke.is_some() && self.stroke_width > 0.0
    }
}

/// One entry of a group's transform list
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    Translate { dx: f64, dy: f64 },
    /// Degrees, clockwise in y-down space, about `(cx, cy)`
    Rotate { deg: f64, cx: f64, cy: f64 },
    Scale { sx: f64, sy: f64 },
}

impl Transform {
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Transform::Translate { dx, dy } => Point::new(p.x + dx, p.y + dy),
            Transform::Rotate { deg, cx, cy } => {
                let (sin, cos) = deg.to_radians().sin_cos();
                let (x, y) = (p.x - cx, p.y - cy);
                Point::new(cx + x * cos - y * sin, cy + x * sin + y * cos)
            }
            Transform::Scale { sx, sy } => Point::new(p.x * sx, p.y * sy),
        }
    }

    /// Box around the transformed corners of `bbox`
    pub fn apply_bbox(&self, bbox: BBox) -> BBox {
        if bbox.is_empty() {
            return bbox;
        }
        let mut out = BBox::new();
        for corner in [
            bbox.min,
            Point::new(bbox.max.x, bbox.min.y),
            bbox.max,
            Point::new(bbox.min.x, bbox.max.y),
        ] {
            out.expand_point(self.apply(corner));
        }
        out
    }
}

/// A complete drawing in millimetres with its origin at the top-left
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub root: GroupNode,
}

impl Scene {
    pub fn new(width: f64, height: f64, root: GroupNode) -> Self {
        Scene { width, height, root }
    }

    /// Bounds of everything drawn, which may exceed the canvas
    pub fn content_bounds(&self) -> BBox {
        self.root.bounds()
    }
}

/// Text repeated or centered across a label, drawn above everything else
#[derive(Clone, Debug, PartialEq)]
pub struct Watermark {
    pub text: String,
    pub opacity: f64,
    pub repeat: bool,
}

impl Watermark {
    pub fn new(text: impl Into<String>) -> Self {
        Watermark {
            text: text.into(),
            opacity: 0.15,
            repeat: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Per-call render options that are not part of the saved design
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelOptions {
    pub watermark: Option<Watermark>,
}

impl LabelOptions {
    pub fn with_watermark(mut self, watermark: Watermark) -> Self {
        self.watermark = Some(watermark);
        self
    }
}
