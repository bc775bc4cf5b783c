//! SVG serialization of a [`Scene`]
//!
//! One element per node, lengths in millimetres. The document's `width` and
//! `height` carry `mm` units so it prints at physical size.

use std::fmt::{self, Write};

use super::geometry::fmt_num;
use super::shapes::{GlyphNode, GroupNode, Node};
use super::types::{LineCap, Scene, Style, Transform};

/// Serialize `scene` to a standalone SVG document
pub fn to_svg(scene: &Scene) -> String {
    SvgDocument(scene).to_string()
}

/// Display adapter that writes a scene as SVG
pub struct SvgDocument<'a>(pub &'a Scene);

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        let (w, h) = (fmt_num(scene.width), fmt_num(scene.height));
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#
        )?;
        write_group(f, &scene.root, 1)?;
        writeln!(f, "</svg>")
    }
}

fn indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_group(f: &mut impl Write, group: &GroupNode, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    f.write_str("<g")?;
    if let Some(class) = &group.class {
        write!(f, r#" class="{}""#, escape(class))?;
    }
    if !group.transform.is_empty() {
        let list: Vec<String> = group.transform.iter().map(transform_attr).collect();
        write!(f, r#" transform="{}""#, list.join(" "))?;
    }
    if let Some(opacity) = group.opacity {
        write!(f, r#" opacity="{}""#, fmt_num(opacity))?;
    }
    if !group.interactive {
        f.write_str(r#" pointer-events="none""#)?;
    }
    if group.children.is_empty() {
        return f.write_str("/>\n");
    }
    f.write_str(">\n")?;
    for child in &group.children {
        write_node(f, child, depth + 1)?;
    }
    indent(f, depth)?;
    f.write_str("</g>\n")
}

fn write_node(f: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    if let Node::Group(g) = node {
        return write_group(f, g, depth);
    }
    indent(f, depth)?;
    match node {
        Node::Rect(r) => {
            write!(
                f,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(r.rect.x),
                fmt_num(r.rect.y),
                fmt_num(r.rect.w),
                fmt_num(r.rect.h)
            )?;
            if r.rx > 0.0 {
                write!(f, r#" rx="{0}" ry="{0}""#, fmt_num(r.rx))?;
            }
            write_style(f, &r.style)?;
            f.write_str("/>")?;
        }
        Node::Path(p) => {
            write!(f, r#"<path d="{}""#, p.d)?;
            write_style(f, &p.style)?;
            f.write_str("/>")?;
        }
        Node::Circle(c) => {
            write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_num(c.center.x),
                fmt_num(c.center.y),
                fmt_num(c.r)
            )?;
            write_style(f, &c.style)?;
            f.write_str("/>")?;
        }
        Node::Line(l) => {
            write!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_num(l.from.x),
                fmt_num(l.from.y),
                fmt_num(l.to.x),
                fmt_num(l.to.y)
            )?;
            write_style(f, &l.style)?;
            f.write_str("/>")?;
        }
        Node::Text(t) => {
            write!(
                f,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                fmt_num(t.pos.x),
                fmt_num(t.pos.y),
                fmt_num(t.font_size),
                escape(&t.color),
                escape(&t.text)
            )?;
        }
        Node::Glyph(g) => write_glyph(f, g)?,
        Node::Group(_) => {}
    }
    f.write_str("\n")
}

/// A glyph is a path in its own units, mapped into the frame by one
/// translate-and-scale.
fn write_glyph(f: &mut impl Write, g: &GlyphNode) -> fmt::Result {
    let placed = g.placed();
    let s = g.scale();
    let [min_x, min_y, _, _] = g.glyph.view_box;
    write!(
        f,
        r#"<path d="{}" fill="{}" transform="translate({} {}) scale({}) translate({} {})"/>"#,
        escape(&g.glyph.path_data),
        escape(&g.color),
        fmt_num(placed.x),
        fmt_num(placed.y),
        fmt_scale(s),
        fmt_num(-min_x),
        fmt_num(-min_y)
    )
}

/// Scales need more precision than millimetre lengths
fn fmt_scale(s: f64) -> String {
    let s = format!("{s:.6}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn write_style(f: &mut impl Write, style: &Style) -> fmt::Result {
    match &style.fill {
        Some(fill) => write!(f, r#" fill="{}""#, escape(fill))?,
        None => f.write_str(r#" fill="none""#)?,
    }
    if let Some(stroke) = &style.stroke
        && style.stroke_width > 0.0
    {
        write!(
            f,
            r#" stroke="{}" stroke-width="{}""#,
            escape(stroke),
            fmt_num(style.stroke_width)
        )?;
        if style.line_cap == LineCap::Round {
            f.write_str(r#" stroke-linecap="round""#)?;
        }
        if let Some((dash, gap)) = style.dash {
            write!(f, r#" stroke-dasharray="{} {}""#, fmt_num(dash), fmt_num(gap))?;
        }
    }
    Ok(())
}

fn transform_attr(t: &Transform) -> String {
    match *t {
        Transform::Translate { dx, dy } => format!("translate({} {})", fmt_num(dx), fmt_num(dy)),
        Transform::Rotate { deg, cx, cy } => {
            format!("rotate({} {} {})", fmt_num(deg), fmt_num(cx), fmt_num(cy))
        }
        Transform::Scale { sx, sy } => format!("scale({} {})", fmt_scale(sx), fmt_scale(sy)),
    }
}

/// Escape text for use in attribute values and text content
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
