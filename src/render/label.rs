//! Per-button label geometry
//!
//! A label is the button's outline plus one slot per tap that carries
//! content. One slot fills the button; several slots split the button width
//! into equal columns. Each slot stacks the icon (or text) above its tap
//! marker and may carry a strike-through.

use glam::DVec2;

use crate::clamp::clamp;
use crate::design::model::{ButtonConfig, DesignOptions, DesignState, MarkerColorMode, MarkerFill, StrikeStyle, TapKind};
use crate::icons::{GlyphCatalog, IconResolver};
use crate::log::debug;
use crate::remote::ButtonDef;
use crate::types::{Point, Rect};

use super::defaults::*;
use super::geometry::button_shape;
use super::shapes::{CircleNode, GlyphNode, GroupNode, LineNode, Node, RectNode, TextNode};
use super::types::{LabelOptions, Scene, Style, Watermark};

/// Render one button centered on a `label_w`×`label_h` canvas.
///
/// Buttons without a config, and taps without content, render as an empty
/// outline rather than failing.
pub fn render_button_label<C: GlyphCatalog + ?Sized>(
    state: &DesignState,
    button: &ButtonDef,
    label_w: f64,
    label_h: f64,
    opts: &LabelOptions,
    icons: &IconResolver<'_, C>,
) -> GroupNode {
    let rect = Rect::centered_in(label_w, label_h, button.w, button.h);
    let mut label = GroupNode::new()
        .with_class("label")
        .with_child(render_button_at(state, button, rect, icons));
    if let Some(watermark) = opts.watermark.as_ref().and_then(|w| watermark_group(w, label_w, label_h)) {
        label.push(watermark);
    }
    label
}

/// [`render_button_label`] wrapped in a scene of the label's size
pub fn label_scene<C: GlyphCatalog + ?Sized>(
    state: &DesignState,
    button: &ButtonDef,
    label_w: f64,
    label_h: f64,
    opts: &LabelOptions,
    icons: &IconResolver<'_, C>,
) -> Scene {
    let root = render_button_label(state, button, label_w, label_h, opts, icons);
    Scene::new(label_w, label_h, root)
}

/// Render one button into `rect`, in the caller's coordinates
pub fn render_button_at<C: GlyphCatalog + ?Sized>(
    state: &DesignState,
    button: &ButtonDef,
    rect: Rect,
    icons: &IconResolver<'_, C>,
) -> GroupNode {
    let options = &state.options;
    let config = state.button(&button.id);
    let radii = button.corner_radii();
    let mut group = GroupNode::new().with_class("button");

    if let Some(fill) = config.and_then(ButtonConfig::fill) {
        group.push(button_shape(rect, radii, Style::filled(fill)));
    }
    if options.show_button_outlines {
        let outline = Style::stroked(&options.label_outline_color, options.label_outline_stroke_mm);
        group.push(button_shape(rect, radii, outline));
    }

    let Some(config) = config else {
        return group;
    };
    let taps = state.content_taps(&button.id);
    let painter = SlotPainter {
        options,
        config,
        icons,
    };

    match taps.as_slice() {
        [] => {}
        [tap] => {
            let size = if options.auto_icon_sizing {
                let room = (rect.w - ICON_PADDING_MM).min(rect.h - ICON_PADDING_MM);
                clamp(&room, SINGLE_ICON_MIN_MM, Some(SINGLE_ICON_MIN_MM), Some(SINGLE_ICON_MAX_MM))
            } else {
                options.fixed_icon_mm
            };
            let with_marker = *tap != TapKind::Single || options.show_tap_markers_always;
            let center = rect.center();
            group.children.extend(painter.slot(*tap, center.x, center.y, size, with_marker).map(Node::from));
        }
        taps => {
            let n = taps.len() as f64;
            let col_w = rect.w / n;
            let size = multi_tap_icon_size(options, col_w, rect.h);
            let cy = rect.center().y;
            for (i, tap) in taps.iter().enumerate() {
                let cx = rect.x + col_w * (i as f64 + 0.5);
                group.children.extend(painter.slot(*tap, cx, cy, size, true).map(Node::from));
            }
            if options.show_tap_dividers {
                let style = Style::stroked(&options.label_outline_color, DIVIDER_STROKE_MM);
                for i in 1..taps.len() {
                    let x = rect.x + col_w * i as f64;
                    group.push(LineNode::new(
                        Point::new(x, rect.y + DIVIDER_INSET_MM),
                        Point::new(x, rect.bottom() - DIVIDER_INSET_MM),
                        style.clone(),
                    ));
                }
            }
        }
    }
    group
}

/// Icon size for each column of a multi-tap button
pub fn multi_tap_icon_size(options: &DesignOptions, col_w: f64, h: f64) -> f64 {
    if options.auto_icon_sizing {
        let room = (col_w - ICON_PADDING_MM).min(h - (MARKER_MM + GAP_MM + ICON_PADDING_MM));
        clamp(&room, MULTI_ICON_MIN_MM, Some(MULTI_ICON_MIN_MM), Some(MULTI_ICON_MAX_MM))
    } else {
        options.fixed_icon_mm.min(col_w - ICON_PADDING_MM).max(1.0)
    }
}

struct SlotPainter<'a, 'c, C: GlyphCatalog + ?Sized> {
    options: &'a DesignOptions,
    config: &'a ButtonConfig,
    icons: &'a IconResolver<'c, C>,
}

impl<C: GlyphCatalog + ?Sized> SlotPainter<'_, '_, C> {
    /// One icon-and-marker stack centered on `(cx, cy)`
    fn slot(&self, tap: TapKind, cx: f64, cy: f64, size: f64, with_marker: bool) -> Option<GroupNode> {
        let stack_h = if with_marker { size + GAP_MM + MARKER_MM } else { size };
        let top = cy - stack_h / 2.0;
        let icon_center = Point::new(cx, top + size / 2.0);
        let color = self.config.icon_color(tap).unwrap_or(&self.options.icon_color);

        let content: Node = match self.config.icon(tap).and_then(|r| self.icons.glyph(r)) {
            Some(glyph) => GlyphNode::new(Rect::new(cx - size / 2.0, top, size, size), glyph.clone(), color).into(),
            None => match self.config.text(tap) {
                Some(text) => TextNode::new(icon_center, text, size * TEXT_SCALE, color).into(),
                None => {
                    debug!(tap = tap.as_str(), icon = ?self.config.icon(tap), "skipping unrenderable icon");
                    return None;
                }
            },
        };

        let mut slot = GroupNode::new().with_class(format!("tap-{}", tap.as_str()));
        slot.push(content);
        if with_marker {
            let marker_center = Point::new(cx, top + size + GAP_MM + MARKER_MM / 2.0);
            for node in self.marker(tap, marker_center, color) {
                slot.push(node);
            }
        }
        if self.config.is_struck(tap) {
            let highlight = self.config.fill().unwrap_or(WHITE);
            let [under, over] = strike_lines(icon_center, size, self.config.strike_style(tap), color, highlight);
            slot.push(under);
            slot.push(over);
        }
        Some(slot)
    }

    fn marker(&self, tap: TapKind, center: Point, content_color: &str) -> Vec<Node> {
        let color = match self.options.tap_marker_color_mode {
            MarkerColorMode::Black => BLACK,
            MarkerColorMode::Icon => content_color,
        };
        let style = match self.options.tap_marker_fill {
            MarkerFill::Filled => Style::stroked(color, MARKER_STROKE_MM).with_fill(color),
            MarkerFill::Outline => Style::stroked(color, MARKER_STROKE_MM),
        };
        tap_marker(tap, center, style)
    }
}

/// Marker glyph for a tap kind, centered on `center`
pub fn tap_marker(tap: TapKind, center: Point, style: Style) -> Vec<Node> {
    let r = MARKER_MM / 2.0;
    match tap {
        TapKind::Single => vec![CircleNode::new(center, r, style).into()],
        TapKind::Double => {
            let dx = r + DOUBLE_MARKER_SPACING_MM;
            vec![
                CircleNode::new(Point::new(center.x - dx, center.y), r, style.clone()).into(),
                CircleNode::new(Point::new(center.x + dx, center.y), r, style).into(),
            ]
        }
        TapKind::Long => {
            let (w, h) = (MARKER_MM * LONG_MARKER_WIDTH, MARKER_MM * LONG_MARKER_HEIGHT);
            let rect = Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h);
            vec![RectNode::new(rect, h / 2.0, style).into()]
        }
    }
}

/// The highlight line and the strike line, in drawing order
pub fn strike_lines(center: Point, size: f64, style: StrikeStyle, color: &str, highlight: &str) -> [LineNode; 2] {
    let reach = STRIKE_REACH * size;
    let half = match style {
        StrikeStyle::Diagonal => DVec2::new(reach, reach),
        StrikeStyle::Straight => DVec2::new(reach, 0.0),
    };
    let from = center + (-half);
    let to = center + half;
    let offset = half.normalize_or_zero().perp() * (STRIKE_OFFSET * size);
    let width = STRIKE_WIDTH * size;
    [
        LineNode::new(from + offset, to + offset, Style::stroked(highlight, width).with_round_cap()),
        LineNode::new(from, to, Style::stroked(color, width).with_round_cap()),
    ]
}

/// Rotated text above the label. Empty text draws nothing.
pub fn watermark_group(watermark: &Watermark, w: f64, h: f64) -> Option<GroupNode> {
    let text = watermark.text.trim();
    if text.is_empty() {
        return None;
    }
    let font = clamp(&(w / 3.0), WATERMARK_FONT_MIN_MM, Some(WATERMARK_FONT_MIN_MM), Some(WATERMARK_FONT_MAX_MM));
    let opacity = clamp(&watermark.opacity, 0.0, Some(0.0), Some(1.0));
    let (cx, cy) = (w / 2.0, h / 2.0);
    let mut group = GroupNode::new()
        .with_class("watermark")
        .rotated(WATERMARK_ROTATION_DEG, cx, cy)
        .with_opacity(opacity)
        .non_interactive();

    if !watermark.repeat {
        group.push(TextNode::new(Point::new(cx, cy), text, font, WATERMARK_COLOR));
        return Some(group);
    }

    // Tile a brick pattern over the circle that contains the rotated canvas.
    let step_x = text.chars().count() as f64 * font * CHAR_WIDTH + font;
    let step_y = font * 2.0;
    let reach = w.hypot(h) / 2.0;
    let cols = ((reach / step_x).ceil() as i32).clamp(0, WATERMARK_MAX_TILES);
    let rows = ((reach / step_y).ceil() as i32).clamp(0, WATERMARK_MAX_TILES);
    for row in -rows..=rows {
        let stagger = if row % 2 != 0 { step_x / 2.0 } else { 0.0 };
        for col in -cols..=cols {
            let pos = Point::new(cx + f64::from(col) * step_x + stagger, cy + f64::from(row) * step_y);
            group.push(TextNode::new(pos, text, font, WATERMARK_COLOR));
        }
    }
    Some(group)
}

const WATERMARK_MAX_TILES: i32 = 40;
