// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for a computed layout.
//!
//! Hosts that position children themselves can turn a [`LayoutResult`] into rectangles:
//! items advance left to right by their width plus the margin, rows advance top to bottom by the
//! row height plus the row gap. The indicator, when shown, sits right after the last item of the
//! indicator row and is `indicator_width` wide.
//!
//! Coordinates are relative to the container's content box (padding already removed).

use alloc::vec::Vec;
use kurbo::{Rect, Size};

use crate::params::LayoutParameters;
use crate::types::LayoutResult;

/// Rectangles for every visible item and the indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrangement<K> {
    /// Visible items in order, with their row index and rectangle.
    pub items: Vec<(K, usize, Rect)>,
    /// Indicator rectangle, if the indicator is shown.
    pub indicator: Option<Rect>,
}

impl<K> Arrangement<K> {
    /// Size of the union of all rectangles, anchored at the origin.
    pub fn content_size(&self) -> Size {
        let (w, h) = self
            .items
            .iter()
            .map(|(_, _, r)| *r)
            .chain(self.indicator)
            .fold((0.0_f64, 0.0_f64), |(w, h), r| (w.max(r.x1), h.max(r.y1)));
        Size::new(w, h)
    }
}

impl<K: Clone> LayoutResult<K> {
    /// Place rows of `row_height` according to `params`' margin and row gap.
    ///
    /// A result whose indicator is shown without any row (the degenerate zero-width case)
    /// places the indicator at the origin.
    pub fn arrange(&self, params: &LayoutParameters, row_height: f64) -> Arrangement<K> {
        let params = params.normalized();
        let row_height = row_height.max(0.0);
        let row_y = |r: usize| r as f64 * (row_height + params.row_gap);

        let mut items = Vec::with_capacity(self.visible_len());
        for (r, row) in self.rows.iter().enumerate() {
            let y0 = row_y(r);
            let mut x = 0.0;
            for (i, it) in row.items.iter().enumerate() {
                if i > 0 {
                    x += params.margin;
                }
                items.push((it.id.clone(), r, Rect::new(x, y0, x + it.width, y0 + row_height)));
                x += it.width;
            }
        }

        let indicator = self.show_indicator.then(|| {
            let (x0, y0) = match self.indicator_row() {
                Some(r) => (self.rows[r].width, row_y(r)),
                None => (0.0, 0.0),
            };
            Rect::new(x0, y0, x0 + params.indicator_width, y0 + row_height)
        });

        Arrangement { items, indicator }
    }
}
