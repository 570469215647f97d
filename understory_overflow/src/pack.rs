// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row packer: first-fit line wrapping into at most `max_rows` rows.
//!
//! ## Algorithm
//!
//! Items are walked in order. Each item occupies its width, plus the margin unless it starts
//! a row. An item that fits the current row is appended. One that does not fit moves to a new
//! row and is retried there while rows remain. Packing ends at the first item that fits neither
//! the last permitted row nor an empty row (later rows are never wider); that item and everything
//! after it are hidden.
//!
//! Space for the indicator is only reserved when something actually overflows:
//!
//! 1. Pack with the full width on every row. If every item lands in a row, that is the result
//!    and no indicator is shown.
//! 2. Otherwise pack again with the last permitted row reduced by `indicator_width`.
//! 3. Re-check the last row: while its width plus `indicator_width` exceeds the container,
//!    move its tail items to the front of the hidden suffix.
//!
//! Step 3 is a no-op after step 2 in exact arithmetic. It remains the single place that
//! guarantees the indicator fits, whatever the packing pass did.
//!
//! Comparisons use `<=`: an item that fits exactly at the boundary is placed.
//!
//! ## Degenerate inputs
//!
//! Parameters are [normalized](crate::LayoutParameters::normalized) first.
//! A container width of zero (or less) hides every item; the indicator is shown iff there is
//! at least one item. Negative or NaN item widths count as zero.

use alloc::vec::Vec;
use core::ops::Range;

use crate::item::Item;
use crate::params::{LayoutParameters, non_negative};
use crate::types::{LayoutResult, Row, RowItem};
use crate::width::{MeasuredWidths, WidthResolver};

/// A packed row as an index range into the input.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedRow {
    /// Indices of the items in this row.
    pub range: Range<usize>,
    /// Accumulated width of the row.
    pub width: f64,
}

impl PackedRow {
    fn starting_at(start: usize) -> Self {
        Self {
            range: start..start,
            width: 0.0,
        }
    }

    fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Index-based result of [`pack`].
///
/// Visible items are always the prefix `0..visible`, split into `rows` in order;
/// items `visible..len` are hidden.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Packing {
    /// Rows in order. Only the last row may be empty, and only when the indicator is shown.
    pub rows: Vec<PackedRow>,
    /// Number of leading items placed in rows.
    pub visible: usize,
    /// Number of items packed.
    pub len: usize,
    /// True when at least one item is hidden.
    pub show_indicator: bool,
}

impl Packing {
    fn all_hidden(len: usize) -> Self {
        Self {
            rows: Vec::new(),
            visible: 0,
            len,
            show_indicator: len > 0,
        }
    }

    /// Range of hidden item indices.
    pub fn hidden(&self) -> Range<usize> {
        self.visible..self.len
    }

    /// Map indices back to ids. `ids` and `widths` must be the sequences that were packed.
    ///
    /// # Panics
    ///
    /// Panics if `ids` or `widths` is shorter than [`len`](Self::len).
    pub fn to_result<K: Clone>(&self, ids: &[K], widths: &[f64]) -> LayoutResult<K> {
        assert!(
            ids.len() >= self.len && widths.len() >= self.len,
            "to_result needs {} ids and widths, got {} and {}",
            self.len,
            ids.len(),
            widths.len()
        );
        self.build_result(|i| ids[i].clone(), widths)
    }

    pub(crate) fn build_result<K>(
        &self,
        mut id_of: impl FnMut(usize) -> K,
        widths: &[f64],
    ) -> LayoutResult<K> {
        let rows = self
            .rows
            .iter()
            .map(|row| Row {
                items: row
                    .range
                    .clone()
                    .map(|i| RowItem {
                        id: id_of(i),
                        width: non_negative(widths[i]),
                    })
                    .collect(),
                width: row.width,
            })
            .collect();
        let hidden = self.hidden().map(id_of).collect();
        LayoutResult {
            rows,
            hidden,
            show_indicator: self.show_indicator,
        }
    }

    /// Pop tail items of the last row until the indicator fits beside it.
    fn reconcile_last_row(&mut self, widths: &[f64], params: &LayoutParameters) {
        if !self.show_indicator {
            return;
        }
        let Some(row) = self.rows.last_mut() else {
            return;
        };
        while !row.is_empty() && row.width + params.indicator_width > params.container_width {
            row.range.end -= 1;
            row.width = row_width(&widths[row.range.clone()], params.margin);
        }
        self.visible = row.range.end;
    }
}

/// Pack `widths` into rows according to `params`.
///
/// Pure: the result depends only on the arguments.
pub fn pack(widths: &[f64], params: &LayoutParameters) -> Packing {
    let params = params.normalized();
    if widths.is_empty() {
        return Packing::default();
    }
    if params.container_width <= 0.0 {
        return Packing::all_hidden(widths.len());
    }

    let optimistic = pack_rows(widths, &params, false);
    if !optimistic.show_indicator {
        return optimistic;
    }

    let mut reserved = pack_rows(widths, &params, true);
    reserved.reconcile_last_row(widths, &params);
    reserved.show_indicator = reserved.visible < reserved.len;
    reserved
}

/// Resolve widths for `items` and pack them.
pub fn layout<K: Ord + Clone, A>(
    items: &[Item<K, A>],
    params: &LayoutParameters,
    measured: &MeasuredWidths<K>,
    resolver: &WidthResolver,
) -> LayoutResult<K> {
    let widths = resolver.resolve_all(items, measured);
    pack(&widths, params).build_result(|i| items[i].id().clone(), &widths)
}

fn pack_rows(widths: &[f64], params: &LayoutParameters, reserve_last: bool) -> Packing {
    let last = params.max_rows - 1;
    let available = |row: usize| {
        if reserve_last && row == last {
            params.container_width - params.indicator_width
        } else {
            params.container_width
        }
    };

    let mut rows = Vec::with_capacity(params.max_rows.min(widths.len()));
    rows.push(PackedRow::starting_at(0));
    let mut visible = 0;
    'items: for (i, &w) in widths.iter().enumerate() {
        let w = non_negative(w);
        loop {
            let row_idx = rows.len() - 1;
            let row = &mut rows[row_idx];
            let occupied = if row.is_empty() {
                w
            } else {
                row.width + params.margin + w
            };
            if occupied <= available(row_idx) {
                row.range.end = i + 1;
                row.width = occupied;
                break;
            }
            if row_idx < last && !row.is_empty() {
                rows.push(PackedRow::starting_at(i));
            } else {
                break 'items;
            }
        }
        visible = i + 1;
    }

    Packing {
        rows,
        visible,
        len: widths.len(),
        show_indicator: visible < widths.len(),
    }
}

/// Width of a row holding `widths`, accumulated left to right like the packer does.
fn row_width(widths: &[f64], margin: f64) -> f64 {
    let mut it = widths.iter().map(|&w| non_negative(w));
    let Some(first) = it.next() else {
        return 0.0;
    };
    it.fold(first, |acc, w| acc + margin + w)
}
