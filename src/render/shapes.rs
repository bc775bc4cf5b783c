//! Scene-graph nodes
//!
//! Every node is a plain value in millimetres. Nodes know their bounding box;
//! turning them into markup is left to [`super::svg`] or the host.

use enum_dispatch::enum_dispatch;

use crate::icons::Glyph;
use crate::types::{BBox, Point, Rect};

use super::defaults;
use super::geometry::PathData;
use super::types::{Style, Transform};

/// Common behavior for all nodes
#[enum_dispatch]
pub trait Primitive {
    /// Bounding box in the parent's coordinates, ignoring stroke width
    fn bounds(&self) -> BBox;
}

#[enum_dispatch(Primitive)]
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Rect(RectNode),
    Path(PathNode),
    Circle(CircleNode),
    Line(LineNode),
    Text(TextNode),
    Glyph(GlyphNode),
    Group(GroupNode),
}

// ============================================================================
// Leaf nodes
// ============================================================================

/// Rectangle with one corner radius for all corners
#[derive(Clone, Debug, PartialEq)]
pub struct RectNode {
    pub rect: Rect,
    pub rx: f64,
    pub style: Style,
}

impl RectNode {
    pub fn new(rect: Rect, rx: f64, style: Style) -> Self {
        RectNode { rect, rx, style }
    }
}

impl Primitive for RectNode {
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        b.expand_rect(self.rect);
        b
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub d: PathData,
    pub style: Style,
}

impl PathNode {
    pub fn new(d: PathData, style: Style) -> Self {
        PathNode { d, style }
    }
}

impl Primitive for PathNode {
    fn bounds(&self) -> BBox {
        self.d.bounds()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleNode {
    pub center: Point,
    pub r: f64,
    pub style: Style,
}

impl CircleNode {
    pub fn new(center: Point, r: f64, style: Style) -> Self {
        CircleNode { center, r, style }
    }
}

impl Primitive for CircleNode {
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        b.expand_rect(Rect::new(self.center.x - self.r, self.center.y - self.r, 2.0 * self.r, 2.0 * self.r));
        b
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineNode {
    pub from: Point,
    pub to: Point,
    pub style: Style,
}

impl LineNode {
    pub fn new(from: Point, to: Point, style: Style) -> Self {
        LineNode { from, to, style }
    }

    pub fn length(&self) -> f64 {
        (self.to - self.from).length()
    }
}

impl Primitive for LineNode {
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        b.expand_point(self.from);
        b.expand_point(self.to);
        b
    }
}

/// Single line of text centered on `pos`
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub pos: Point,
    pub text: String,
    pub font_size: f64,
    pub color: String,
}

impl TextNode {
    pub fn new(pos: Point, text: impl Into<String>, font_size: f64, color: impl Into<String>) -> Self {
        TextNode {
            pos,
            text: text.into(),
            font_size,
            color: color.into(),
        }
    }

    /// Estimated advance width
    pub fn width(&self) -> f64 {
        self.text.chars().count() as f64 * self.font_size * defaults::CHAR_WIDTH
    }
}

impl Primitive for TextNode {
    fn bounds(&self) -> BBox {
        let (w, h) = (self.width(), self.font_size);
        let mut b = BBox::new();
        b.expand_rect(Rect::new(self.pos.x - w / 2.0, self.pos.y - h / 2.0, w, h));
        b
    }
}

/// An icon glyph scaled uniformly to fit `frame` and centered in it
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphNode {
    pub frame: Rect,
    pub glyph: Glyph,
    pub color: String,
}

impl GlyphNode {
    pub fn new(frame: Rect, glyph: Glyph, color: impl Into<String>) -> Self {
        GlyphNode {
            frame,
            glyph,
            color: color.into(),
        }
    }

    /// Uniform scale from glyph units to millimetres
    pub fn scale(&self) -> f64 {
        (self.frame.w / self.glyph.width()).min(self.frame.h / self.glyph.height())
    }

    /// Where the glyph's view box lands inside the frame
    pub fn placed(&self) -> Rect {
        let s = self.scale();
        Rect::centered_in(self.frame.w, self.frame.h, self.glyph.width() * s, self.glyph.height() * s)
            .translate(self.frame.x, self.frame.y)
    }
}

impl Primitive for GlyphNode {
    fn bounds(&self) -> BBox {
        let mut b = BBox::new();
        b.expand_rect(self.placed());
        b
    }
}

// ============================================================================
// Groups
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct GroupNode {
    pub class: Option<String>,
    /// Applied in SVG order: the last entry is applied to points first
    pub transform: Vec<Transform>,
    pub opacity: Option<f64>,
    /// Hosts should not route pointer events to non-interactive groups
    pub interactive: bool,
    pub children: Vec<Node>,
}

impl Default for GroupNode {
    fn default() -> Self {
        GroupNode {
            class: None,
            transform: Vec::new(),
            opacity: None,
            interactive: true,
            children: Vec::new(),
        }
    }
}

impl GroupNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        self.transform.push(Transform::Translate { dx, dy });
        self
    }

    pub fn rotated(mut self, deg: f64, cx: f64, cy: f64) -> Self {
        self.transform.push(Transform::Rotate { deg, cx, cy });
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn with_child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every descendant, depth first
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child);
            if let Node::Group(g) = child {
                out.extend(g.descendants());
            }
        }
        out
    }

    /// Descendant groups carrying `class`
    pub fn groups_with_class(&self, class: &str) -> Vec<&GroupNode> {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                Node::Group(g) if g.class.as_deref() == Some(class) => Some(g),
                _ => None,
            })
            .collect()
    }
}

impl Primitive for GroupNode {
    fn bounds(&self) -> BBox {
        let inner = self
            .children
            .iter()
            .fold(BBox::new(), |acc, child| acc.union(child.bounds()));
        self.transform.iter().rev().fold(inner, |b, t| t.apply_bbox(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_keeps_aspect_ratio() {
        let glyph = Glyph::new("M0 0h48v24H0z", [0.0, 0.0, 48.0, 24.0]);
        let node = GlyphNode::new(Rect::new(10.0, 10.0, 8.0, 8.0), glyph, "#000000");
        assert_eq!(node.scale(), 8.0 / 48.0);
        assert_eq!(node.placed(), Rect::new(10.0, 12.0, 8.0, 4.0));
    }

    #[test]
    fn group_bounds_include_transform() {
        let group = GroupNode::new()
            .translated(5.0, 5.0)
            .with_child(CircleNode::new(Point::new(0.0, 0.0), 1.0, Style::default()))
            .with_child(LineNode::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Style::default()));
        let b = group.bounds();
        assert_eq!(b.min, Point::new(4.0, 4.0));
        assert_eq!(b.max, Point::new(9.0, 6.0));
    }

    #[test]
    fn descendants_walk_nested_groups() {
        let inner = GroupNode::new()
            .with_class("inner")
            .with_child(RectNode::new(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, Style::default()));
        let outer = GroupNode::new()
            .with_child(inner)
            .with_child(TextNode::new(Point::ORIGIN, "hi", 2.0, "#000000"));
        assert_eq!(outer.descendants().len(), 3);
        assert_eq!(outer.groups_with_class("inner").len(), 1);
        assert!(outer.groups_with_class("missing").is_empty());
    }

    #[test]
    fn text_bounds_are_centered() {
        let t = TextNode::new(Point::new(10.0, 10.0), "abcd", 5.0, "#000000");
        let b = t.bounds();
        assert_eq!(b.center(), Point::new(10.0, 10.0));
        assert_eq!(b.width(), 12.0);
    }
}
