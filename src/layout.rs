//! Sticker sheet grid layout.
//!
//! Places identical labels on a page in row-major order. The computation is a
//! pure function of its scalar inputs; impossible requests (labels larger than
//! the usable area, more labels than fit on one page) come back as a valid
//! layout with `max_count == 0` or `pages > 1` for the caller to report.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::clamp::clamp;
use crate::log::{debug, warn};
use crate::types::Point;

pub const DEFAULT_MARGIN_X_MM: f64 = 8.0;
pub const DEFAULT_MARGIN_Y_MM: f64 = 8.0;
pub const DEFAULT_GAP_MM: f64 = 3.0;

/// Supported paper sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetSize {
    #[default]
    A4,
    Letter,
}

impl SheetSize {
    /// Page width and height in millimetres (portrait)
    pub const fn dimensions(self) -> (f64, f64) {
        match self {
            SheetSize::A4 => (210.0, 297.0),
            SheetSize::Letter => (215.9, 279.4),
        }
    }

    /// Parse a persisted sheet size name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "A4" => Some(SheetSize::A4),
            "Letter" => Some(SheetSize::Letter),
            _ => None,
        }
    }
}

/// Inputs to [`compute_layout`]. All fields are untrusted and get clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRequest {
    pub label_w: f64,
    pub label_h: f64,
    pub count: f64,
    pub sheet_w: f64,
    pub sheet_h: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub gap: f64,
}

impl LayoutRequest {
    /// A request on an A4 sheet with the default margins and gap
    pub fn new(label_w: f64, label_h: f64, count: f64) -> Self {
        let (sheet_w, sheet_h) = SheetSize::A4.dimensions();
        LayoutRequest {
            label_w,
            label_h,
            count,
            sheet_w,
            sheet_h,
            margin_x: DEFAULT_MARGIN_X_MM,
            margin_y: DEFAULT_MARGIN_Y_MM,
            gap: DEFAULT_GAP_MM,
        }
    }

    pub fn with_sheet(mut self, sheet_w: f64, sheet_h: f64) -> Self {
        self.sheet_w = sheet_w;
        self.sheet_h = sheet_h;
        self
    }

    pub fn with_sheet_size(self, size: SheetSize) -> Self {
        let (w, h) = size.dimensions();
        self.with_sheet(w, h)
    }

    pub fn with_margins(mut self, margin_x: f64, margin_y: f64) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn compute(&self) -> StickerSheetLayout {
        compute_layout(self)
    }
}

/// A computed sheet layout. Never mutated; recompute on any input change.
#[derive(Clone, Debug, PartialEq)]
pub struct StickerSheetLayout {
    pub sheet_w: f64,
    pub sheet_h: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub gap: f64,
    pub label_w: f64,
    pub label_h: f64,
    pub columns: u32,
    pub rows: u32,
    /// Slots per page
    pub max_count: u32,
    /// Requested label count after flooring
    pub count: u32,
    /// Labels placed on the first page
    pub effective_count: u32,
    pub pages: u32,
    /// Top-left corners of the first page's slots, row-major
    pub positions: Vec<Point>,
}

impl StickerSheetLayout {
    /// Label indices that land on `page`
    pub fn page_slots(&self, page: u32) -> Range<u32> {
        if page >= self.pages {
            return 0..0;
        }
        let start = page.saturating_mul(self.max_count);
        let end = start.saturating_add(self.max_count).min(self.count);
        start..end
    }

    /// True when the requested count does not fit on a single page
    pub fn overflows_page(&self) -> bool {
        self.pages > 1
    }
}

/// Compute the grid of label slots for one sheet.
pub fn compute_layout(req: &LayoutRequest) -> StickerSheetLayout {
    let (a4_w, a4_h) = SheetSize::A4.dimensions();
    let label_w = clamp(&req.label_w, 0.0, None, None);
    let label_h = clamp(&req.label_h, 0.0, None, None);
    let count = clamp(&req.count, 0.0, Some(0.0), None).floor() as u32;
    let sheet_w = clamp(&req.sheet_w, a4_w, Some(0.0), None);
    let sheet_h = clamp(&req.sheet_h, a4_h, Some(0.0), None);
    let margin_x = clamp(&req.margin_x, DEFAULT_MARGIN_X_MM, Some(0.0), None);
    let margin_y = clamp(&req.margin_y, DEFAULT_MARGIN_Y_MM, Some(0.0), None);
    let gap = clamp(&req.gap, DEFAULT_GAP_MM, Some(0.0), None);
    if !req.sheet_w.is_finite() || !req.sheet_h.is_finite() {
        warn!(sheet_w = req.sheet_w, sheet_h = req.sheet_h, "non-finite sheet size, using A4");
    }

    let mut layout = StickerSheetLayout {
        sheet_w,
        sheet_h,
        margin_x,
        margin_y,
        gap,
        label_w,
        label_h,
        columns: 0,
        rows: 0,
        max_count: 0,
        count,
        effective_count: 0,
        pages: 0,
        positions: Vec::new(),
    };

    if label_w <= 0.0 || label_h <= 0.0 {
        debug!(label_w, label_h, "non-positive label size, empty layout");
        return layout;
    }

    let usable_w = (sheet_w - 2.0 * margin_x).max(0.0);
    let usable_h = (sheet_h - 2.0 * margin_y).max(0.0);

    // N labels need N-1 gaps, hence the extra gap on the numerator.
    let columns = ((usable_w + gap) / (label_w + gap)).floor().max(0.0) as u32;
    let rows = ((usable_h + gap) / (label_h + gap)).floor().max(0.0) as u32;
    let max_count = columns.saturating_mul(rows);
    let effective_count = count.min(max_count);
    let pages = if max_count > 0 { count.div_ceil(max_count) } else { 0 };

    if max_count == 0 {
        debug!(label_w, label_h, sheet_w, sheet_h, "label does not fit on the sheet");
    }

    layout.columns = columns;
    layout.rows = rows;
    layout.max_count = max_count;
    layout.effective_count = effective_count;
    layout.pages = pages;
    layout.positions = (0..effective_count)
        .map(|i| {
            let col = f64::from(i % columns);
            let row = f64::from(i / columns);
            Point::new(
                margin_x + col * (label_w + gap),
                margin_y + row * (label_h + gap),
            )
        })
        .collect();
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn forty_by_thirty_on_a4() {
        let layout = LayoutRequest::new(40.0, 30.0, 6.0).compute();
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.rows, 8);
        assert_eq!(layout.max_count, 32);
        assert_eq!(layout.effective_count, 6);
        assert_eq!(layout.pages, 1);
        assert_eq!(layout.positions[0], Point::new(8.0, 8.0));
        assert_eq!(layout.positions[1], Point::new(51.0, 8.0));
        assert_eq!(layout.positions[4], Point::new(8.0, 41.0));
    }

    #[test]
    fn label_wider_than_sheet() {
        let layout = LayoutRequest::new(250.0, 30.0, 1.0).compute();
        assert_eq!(layout.columns, 0);
        assert_eq!(layout.max_count, 0);
        assert_eq!(layout.pages, 0);
        assert!(layout.positions.is_empty());
    }

    #[test]
    fn non_positive_label_is_degenerate() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0)] {
            let layout = LayoutRequest::new(w, h, 5.0).compute();
            assert_eq!(layout.columns, 0);
            assert_eq!(layout.rows, 0);
            assert_eq!(layout.max_count, 0);
            assert_eq!(layout.pages, 0);
            assert!(layout.positions.is_empty());
        }
    }

    #[test]
    fn non_finite_inputs_fall_back() {
        let layout = LayoutRequest::new(40.0, 30.0, f64::NAN)
            .with_sheet(f64::NAN, f64::INFINITY)
            .with_margins(f64::NAN, f64::NAN)
            .with_gap(f64::NAN)
            .compute();
        assert_eq!((layout.sheet_w, layout.sheet_h), (210.0, 297.0));
        assert_eq!((layout.margin_x, layout.margin_y, layout.gap), (8.0, 8.0, 3.0));
        assert_eq!(layout.count, 0);
        assert_eq!(layout.pages, 0);
        assert_eq!(layout.max_count, 32);
    }

    #[test]
    fn count_is_floored_and_non_negative() {
        assert_eq!(LayoutRequest::new(40.0, 30.0, 6.7).compute().count, 6);
        assert_eq!(LayoutRequest::new(40.0, 30.0, -3.0).compute().count, 0);
    }

    #[test]
    fn overflow_paginates() {
        let layout = LayoutRequest::new(40.0, 30.0, 70.0).compute();
        assert_eq!(layout.pages, 3);
        assert_eq!(layout.effective_count, 32);
        assert_eq!(layout.positions.len(), 32);
        assert!(layout.overflows_page());
        assert_eq!(layout.page_slots(0), 0..32);
        assert_eq!(layout.page_slots(2), 64..70);
        assert_eq!(layout.page_slots(3), 0..0);
    }

    #[test]
    fn letter_sheet() {
        let layout = LayoutRequest::new(40.0, 30.0, 1.0)
            .with_sheet_size(SheetSize::Letter)
            .compute();
        assert_eq!(layout.sheet_w, 215.9);
        // (215.9 - 16 + 3) / 43 = 4.71..., (279.4 - 16 + 3) / 33 = 8.07...
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.rows, 8);
    }

    #[test]
    fn exact_fit_uses_no_trailing_gap() {
        // 2 labels of 97 with one 0-gap fill 194 exactly.
        let layout = LayoutRequest::new(97.0, 10.0, 2.0)
            .with_margins(8.0, 8.0)
            .with_gap(0.0)
            .compute();
        assert_eq!(layout.columns, 2);
    }

    #[test]
    fn same_inputs_same_output() {
        let req = LayoutRequest::new(25.0, 12.0, 40.0).with_gap(1.5);
        assert_eq!(compute_layout(&req), compute_layout(&req));
    }

    proptest! {
        #[test]
        fn capacity_and_pagination_invariants(
            label_w in -10.0f64..300.0,
            label_h in -10.0f64..300.0,
            count in -5.0f64..500.0,
            margin_x in 0.0f64..60.0,
            margin_y in 0.0f64..60.0,
            gap in 0.0f64..10.0,
        ) {
            let layout = LayoutRequest::new(label_w, label_h, count)
                .with_margins(margin_x, margin_y)
                .with_gap(gap)
                .compute();
            prop_assert!(layout.effective_count <= layout.max_count);
            let product = u64::from(layout.columns) * u64::from(layout.rows);
            prop_assert_eq!(u64::from(layout.max_count), product.min(u64::from(u32::MAX)));
            prop_assert_eq!(layout.positions.len() as u32, layout.effective_count);
            if layout.max_count > 0 {
                prop_assert_eq!(layout.pages, layout.count.div_ceil(layout.max_count));
            } else {
                prop_assert_eq!(layout.pages, 0);
            }
        }

        #[test]
        fn positions_stay_inside_margins(
            label_w in 1.0f64..120.0,
            label_h in 1.0f64..120.0,
            count in 0.0f64..200.0,
            gap in 0.0f64..10.0,
            margin_x in 0.0f64..60.0,
            margin_y in 0.0f64..60.0,
            sheet_w in 50.0f64..450.0,
            sheet_h in 50.0f64..450.0,
            letter in any::<bool>(),
        ) {
            let req = LayoutRequest::new(label_w, label_h, count)
                .with_margins(margin_x, margin_y)
                .with_gap(gap);
            let req = if letter {
                req.with_sheet_size(SheetSize::Letter)
            } else {
                req.with_sheet(sheet_w, sheet_h)
            };
            let layout = req.compute();
            prop_assert_eq!((layout.margin_x, layout.margin_y), (margin_x, margin_y));
            let eps = 1e-9;
            for p in &layout.positions {
                prop_assert!(p.x >= layout.margin_x - eps);
                prop_assert!(p.x <= layout.sheet_w - layout.margin_x - layout.label_w + eps);
                prop_assert!(p.y >= layout.margin_y - eps);
                prop_assert!(p.y <= layout.sheet_h - layout.margin_y - layout.label_h + eps);
            }
        }
    }
}
