// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout results: rows of visible items, hidden items, and the indicator decision.

use alloc::vec::Vec;

/// A visible item placed in a row, with the width it was packed at.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowItem<K> {
    /// Item identity.
    pub id: K,
    /// Resolved width used for packing.
    pub width: f64,
}

/// One row of visible items, left to right.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row<K> {
    /// Items in input order.
    pub items: Vec<RowItem<K>>,
    /// Sum of item widths plus one margin between each adjacent pair.
    pub width: f64,
}

impl<K> Default for Row<K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            width: 0.0,
        }
    }
}

impl<K> Row<K> {
    /// Number of items in the row.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the row holds no items.
    ///
    /// Only the indicator row can be empty, when the item that should have started it
    /// did not fit even alone.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.items.iter().map(|it| &it.id)
    }
}

/// Outcome of one layout pass.
///
/// Invariants, for the item sequence the pass was computed from:
///
/// - every item appears exactly once, either in a row or in [`hidden`](Self::hidden);
/// - rows, read in order, and `hidden` each preserve the input order;
/// - visible items always form a prefix of the input and hidden items the remaining suffix;
/// - there are at most `max_rows` rows;
/// - [`show_indicator`](Self::show_indicator) is true exactly when `hidden` is non-empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult<K> {
    pub(crate) rows: Vec<Row<K>>,
    pub(crate) hidden: Vec<K>,
    pub(crate) show_indicator: bool,
}

impl<K> Default for LayoutResult<K> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            hidden: Vec::new(),
            show_indicator: false,
        }
    }
}

impl<K> LayoutResult<K> {
    /// Rows of visible items.
    pub fn rows(&self) -> &[Row<K>] {
        &self.rows
    }

    /// Hidden items, in input order.
    pub fn hidden(&self) -> &[K] {
        &self.hidden
    }

    /// Whether the host should render the overflow indicator.
    pub fn show_indicator(&self) -> bool {
        self.show_indicator
    }

    /// Index of the row the indicator follows, if it is shown and any row exists.
    ///
    /// This is always the last row: items are only hidden once the last permitted row is full.
    pub fn indicator_row(&self) -> Option<usize> {
        if self.show_indicator {
            self.rows.len().checked_sub(1)
        } else {
            None
        }
    }

    /// Visible items with their row index, in order.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &K)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.ids().map(move |id| (r, id)))
    }

    /// Number of visible items.
    pub fn visible_len(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Total number of items the result covers.
    pub fn len(&self) -> usize {
        self.visible_len() + self.hidden.len()
    }

    /// True if the result covers no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: PartialEq> LayoutResult<K> {
    /// Row holding `id`, or `None` if it is hidden or unknown.
    pub fn row_of(&self, id: &K) -> Option<usize> {
        self.visible().find(|(_, k)| *k == id).map(|(r, _)| r)
    }

    /// True if `id` is hidden behind the indicator.
    pub fn is_hidden(&self, id: &K) -> bool {
        self.hidden.contains(id)
    }

    /// True if `id` appears anywhere in the result.
    pub fn contains(&self, id: &K) -> bool {
        self.is_hidden(id) || self.row_of(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> LayoutResult<u32> {
        LayoutResult {
            rows: vec![
                Row {
                    items: vec![RowItem { id: 1, width: 10.0 }, RowItem { id: 2, width: 20.0 }],
                    width: 38.0,
                },
                Row {
                    items: vec![RowItem { id: 3, width: 5.0 }],
                    width: 5.0,
                },
            ],
            hidden: vec![4, 5],
            show_indicator: true,
        }
    }

    #[test]
    fn accessors_follow_rows_and_hidden() {
        let r = sample();
        let visible: Vec<(usize, u32)> = r.visible().map(|(row, id)| (row, *id)).collect();
        assert_eq!(visible, vec![(0, 1), (0, 2), (1, 3)]);
        assert_eq!(r.visible_len(), 3);
        assert_eq!(r.len(), 5);
        assert_eq!(r.row_of(&3), Some(1));
        assert_eq!(r.row_of(&4), None);
        assert!(r.is_hidden(&5));
        assert!(r.contains(&1));
        assert!(!r.contains(&9));
        assert_eq!(r.indicator_row(), Some(1));
    }

    #[test]
    fn default_is_empty_without_indicator() {
        let r: LayoutResult<u32> = LayoutResult::default();
        assert!(r.is_empty());
        assert!(!r.show_indicator());
        assert_eq!(r.indicator_row(), None);
    }
}
