//! Whole-remote previews and paginated sticker sheets

use crate::design::model::DesignState;
use crate::icons::{GlyphCatalog, IconResolver};
use crate::layout::{LayoutRequest, StickerSheetLayout};
use crate::log::debug;
use crate::remote::{ButtonDef, Cutout, RemoteTemplate};
use crate::types::{CornerRadii, Point, Rect};

use super::defaults::*;
use super::geometry::button_shape;
use super::label::{render_button_at, render_button_label, watermark_group};
use super::shapes::{CircleNode, GroupNode, LineNode, RectNode, TextNode};
use super::types::{LabelOptions, Scene, Style};

/// Draw the remote at 1:1 with every button at its template position.
pub fn render_remote<C: GlyphCatalog + ?Sized>(
    state: &DesignState,
    remote: &RemoteTemplate,
    icons: &IconResolver<'_, C>,
    opts: &LabelOptions,
) -> Scene {
    let options = &state.options;
    let (w, h) = (remote.width_mm, remote.height_mm);
    let mut root = GroupNode::new().with_class("remote");

    if options.show_remote_outline {
        let outline = Style::stroked(&options.label_outline_color, REMOTE_OUTLINE_STROKE_MM);
        root.push(button_shape(
            Rect::new(0.0, 0.0, w, h),
            CornerRadii::uniform(remote.corner_mm),
            outline,
        ));
    }

    if options.show_cutouts && !remote.cutouts.is_empty() {
        let mut cutouts = GroupNode::new().with_class("cutouts").non_interactive();
        let style = Style::filled(CUTOUT_COLOR);
        for cutout in &remote.cutouts {
            match *cutout {
                Cutout::Circle { cx, cy, r } => cutouts.push(CircleNode::new(Point::new(cx, cy), r, style.clone())),
                Cutout::Rect { x, y, w: cw, h: ch, r } => {
                    let rect = Rect::new(x, y, cw, ch);
                    cutouts.push(RectNode::new(rect, r.min(rect.max_corner_radius()).max(0.0), style.clone()))
                }
            }
        }
        root.push(cutouts);
    }

    for button in &remote.buttons {
        root.push(render_button_at(state, button, button.rect(), icons));
    }

    if let Some(watermark) = opts.watermark.as_ref().and_then(|wm| watermark_group(wm, w, h)) {
        root.push(watermark);
    }

    let mut height = h;
    if options.show_scale_bar {
        root.push(scale_bar(Point::new(0.0, h + SCALE_BAR_SPACE_MM / 2.0)));
        height += SCALE_BAR_SPACE_MM;
    }
    Scene::new(w, height, root)
}

/// A 10 mm bar with end ticks and a caption, starting at `origin`
fn scale_bar(origin: Point) -> GroupNode {
    let style = Style::stroked(BLACK, SCALE_BAR_STROKE_MM);
    let end = Point::new(origin.x + SCALE_BAR_MM, origin.y);
    let tick = SCALE_BAR_FONT_MM / 2.0;
    GroupNode::new()
        .with_class("scale-bar")
        .non_interactive()
        .with_child(LineNode::new(origin, end, style.clone()))
        .with_child(LineNode::new(
            Point::new(origin.x, origin.y - tick / 2.0),
            Point::new(origin.x, origin.y + tick / 2.0),
            style.clone(),
        ))
        .with_child(LineNode::new(
            Point::new(end.x, end.y - tick / 2.0),
            Point::new(end.x, end.y + tick / 2.0),
            style,
        ))
        .with_child(TextNode::new(
            Point::new(end.x + SCALE_BAR_FONT_MM * 2.0, origin.y),
            format!("{} mm", SCALE_BAR_MM),
            SCALE_BAR_FONT_MM,
            BLACK,
        ))
}

/// A paginated sticker sheet.
///
/// Only the layout is computed up front; each page's scene is built when
/// asked for, so the host drives pagination and a huge `labelCount` costs
/// nothing until its pages are drawn.
pub struct StickerSheet<'a, C: GlyphCatalog + ?Sized> {
    pub layout: StickerSheetLayout,
    state: &'a DesignState,
    icons: IconResolver<'a, C>,
    opts: &'a LabelOptions,
    content: Vec<&'a ButtonDef>,
}

impl<'a, C: GlyphCatalog + ?Sized> StickerSheet<'a, C> {
    pub fn page_count(&self) -> u32 {
        self.layout.pages
    }

    /// Number of stickers placed across all pages
    pub fn sticker_count(&self) -> u32 {
        if self.layout.pages == 0 { 0 } else { self.layout.count }
    }

    /// Render page `page`, or `None` past the last page
    pub fn page(&self, page: u32) -> Option<Scene> {
        if page >= self.layout.pages {
            return None;
        }
        let options = &self.state.options;
        let layout = &self.layout;
        let (label_w, label_h) = (layout.label_w, layout.label_h);
        let frame = Rect::new(0.0, 0.0, label_w, label_h);
        let corner = options.label_corner_mm.min(frame.max_corner_radius());
        let outline = Style::stroked(&options.label_outline_color, options.label_outline_stroke_mm);
        let guide = Style::stroked(GUIDE_COLOR, GUIDE_STROKE_MM).with_dash(GUIDE_DASH_MM, GUIDE_DASH_MM);

        let slots = layout.page_slots(page);
        let first = slots.start;
        let mut root = GroupNode::new().with_class("sheet");
        for slot in slots {
            let Some(pos) = layout.positions.get((slot - first) as usize) else {
                break;
            };
            let mut sticker = GroupNode::new().with_class("sticker").translated(pos.x, pos.y);
            if options.show_guides {
                sticker.push(RectNode::new(frame, 0.0, guide.clone()));
            }
            sticker.push(RectNode::new(frame, corner, outline.clone()));
            if !self.content.is_empty() {
                let button = self.content[slot as usize % self.content.len()];
                sticker.push(render_button_label(
                    self.state,
                    button,
                    label_w,
                    label_h,
                    self.opts,
                    &self.icons,
                ));
            }
            root.push(sticker);
        }
        Some(Scene::new(layout.sheet_w, layout.sheet_h, root))
    }

    /// Pages in order, each rendered as the iterator reaches it
    pub fn pages(&self) -> impl Iterator<Item = Scene> + '_ {
        (0..self.layout.pages).filter_map(move |n| self.page(n))
    }
}

/// The layout a design's options ask for
pub fn sheet_layout(state: &DesignState) -> StickerSheetLayout {
    let o = &state.options;
    LayoutRequest::new(o.label_width_mm, o.label_height_mm, f64::from(o.label_count))
        .with_sheet_size(o.sheet_size)
        .with_margins(o.sheet_margin_x_mm, o.sheet_margin_y_mm)
        .with_gap(o.sheet_gap_mm)
        .compute()
}

/// Lay out `labelCount` stickers over as many pages as needed.
///
/// Buttons that carry content fill the slots in template order, repeating
/// until every slot is used. With no such buttons the slots are left as bare
/// outlines. A layout with no capacity yields no pages; the caller decides
/// how to warn about it from `layout`.
pub fn render_sticker_sheet<'a, C: GlyphCatalog + ?Sized>(
    state: &'a DesignState,
    remote: &'a RemoteTemplate,
    icons: &IconResolver<'a, C>,
    opts: &'a LabelOptions,
) -> StickerSheet<'a, C> {
    let content: Vec<&ButtonDef> = remote
        .buttons
        .iter()
        .filter(|b| !state.content_taps(&b.id).is_empty())
        .collect();
    if content.is_empty() {
        debug!(remote = %remote.id, "no button carries content, stickers stay empty");
    }

    StickerSheet {
        layout: sheet_layout(state),
        state,
        icons: *icons,
        opts,
        content,
    }
}
