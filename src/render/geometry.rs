//! Path construction: rounded rectangles and the path-data builder

use std::fmt;

use crate::types::{BBox, CornerRadii, Point, Rect};

use super::shapes::{Node, PathNode, RectNode};
use super::types::Style;

/// One SVG-style path command in absolute coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Path data with a fluent builder
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn a(mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to: Point::new(x, y),
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of arc segments
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Arc { .. }))
            .count()
    }

    /// Bounds of the command endpoints. Arcs built by this module never
    /// bulge past their endpoints' rectangle.
    pub fn bounds(&self) -> BBox {
        let mut bbox = BBox::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::Arc { to: p, .. } => {
                    bbox.expand_point(p)
                }
                PathCommand::Close => {}
            }
        }
        bbox
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *cmd {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A {} {} {} {} {} {} {}",
                    fmt_num(rx),
                    fmt_num(ry),
                    fmt_num(rotation),
                    u8::from(large_arc),
                    u8::from(sweep),
                    fmt_num(to.x),
                    fmt_num(to.y)
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Format a millimetre value with at most three decimals, trailing zeros
/// trimmed.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let s = format!("{rounded:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Rounded rectangle with an independent radius per corner.
///
/// Visits the corners top-left, top-right, bottom-right, bottom-left, with one
/// arc per non-zero corner. Radii are clamped to half the smaller side.
pub fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> PathData {
    let CornerRadii { tl, tr, br, bl } = radii.clamped(rect.max_corner_radius());
    let (x1, y1, x2, y2) = (rect.x, rect.y, rect.right(), rect.bottom());

    let corner = |path: PathData, r: f64, x: f64, y: f64| {
        if r > 0.0 {
            path.a(r, r, 0.0, false, true, x, y)
        } else {
            path
        }
    };

    let path = PathData::new().m(x1 + tl, y1).l(x2 - tr, y1);
    let path = corner(path, tr, x2, y1 + tr).l(x2, y2 - br);
    let path = corner(path, br, x2 - br, y2).l(x1 + bl, y2);
    let path = corner(path, bl, x1, y2 - bl).l(x1, y1 + tl);
    corner(path, tl, x1 + tl, y1).z()
}

/// The drawable outline of a button: a plain rounded rectangle when all four
/// corners agree, an explicit path otherwise.
pub fn button_shape(rect: Rect, radii: CornerRadii, style: Style) -> Node {
    let radii = radii.clamped(rect.max_corner_radius());
    match radii.as_uniform() {
        Some(r) => RectNode::new(rect, r, style).into(),
        None => PathNode::new(rounded_rect_path(rect, radii), style).into(),
    }
}
