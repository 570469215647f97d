// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width resolution: measured widths with a label-based estimate as fallback.
//!
//! The packer consumes plain numbers. This module decides where each number comes from:
//!
//! - [`WidthStrategy::Measured`] uses a width the host read back from a render pass of that
//!   exact item, and estimates only while no measurement exists yet.
//! - [`WidthStrategy::Estimated`] always estimates, for hosts that do not render invisibly
//!   to measure.
//!
//! Estimation is approximate by nature (variable-width fonts, icons, padding), so hosts should
//! supply measurements as soon as they have them. Estimates count Unicode display columns
//! rather than chars, which keeps wide scripts such as CJK from being underestimated by half.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use unicode_width::UnicodeWidthStr;

use crate::item::Item;
use crate::params::non_negative;

/// Heuristic width for a label: `max(min, base + per_column * columns)`.
///
/// Monotonic in the label's display width.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimator {
    /// Fixed part covering button padding and borders.
    pub base: f64,
    /// Width added per display column of the label.
    pub per_column: f64,
    /// Lower bound for any estimate.
    pub min: f64,
}

impl Estimator {
    /// Conservative defaults that tend to overestimate slightly, so estimated layouts
    /// rarely overflow once real widths arrive.
    pub const DEFAULT: Self = Self {
        base: 40.0,
        per_column: 10.0,
        min: 80.0,
    };

    /// Estimate the rendered width of `label`.
    pub fn estimate(&self, label: &str) -> f64 {
        let columns = label.width() as f64;
        non_negative((self.base + self.per_column * columns).max(self.min))
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where item widths come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidthStrategy {
    /// Prefer measured widths; estimate items that have not been measured yet.
    #[default]
    Measured,
    /// Always estimate from the label, ignoring measurements.
    Estimated,
}

/// Measured widths keyed by item id.
///
/// Stored widths are clamped to `>= 0` (NaN becomes `0`).
#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredWidths<K> {
    widths: BTreeMap<K, f64>,
}

impl<K> Default for MeasuredWidths<K> {
    fn default() -> Self {
        Self {
            widths: BTreeMap::new(),
        }
    }
}

impl<K: Ord> MeasuredWidths<K> {
    /// Create an empty set of measurements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measured width for `id`, if any.
    pub fn get(&self, id: &K) -> Option<f64> {
        self.widths.get(id).copied()
    }

    /// Record a measurement. Returns `true` if the stored value changed.
    pub fn set(&mut self, id: K, width: f64) -> bool {
        let width = non_negative(width);
        match self.widths.insert(id, width) {
            Some(old) => old != width,
            None => true,
        }
    }

    /// Forget the measurement for `id`. Returns `true` if one existed.
    pub fn remove(&mut self, id: &K) -> bool {
        self.widths.remove(id).is_some()
    }

    /// Keep only measurements whose id satisfies `keep`.
    pub fn retain_ids(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.widths.retain(|k, _| keep(k));
    }

    /// Number of stored measurements.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// True if nothing has been measured.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Drop all measurements, e.g. after a style change invalidates them.
    pub fn clear(&mut self) {
        self.widths.clear();
    }
}

impl<K: Ord> FromIterator<(K, f64)> for MeasuredWidths<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, w) in iter {
            let _ = out.set(k, w);
        }
        out
    }
}

/// Resolves each item's width according to a [`WidthStrategy`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthResolver {
    /// Selected strategy.
    pub strategy: WidthStrategy,
    /// Estimator used for unmeasured items (and for everything under [`WidthStrategy::Estimated`]).
    pub estimator: Estimator,
}

impl WidthResolver {
    /// Resolver preferring measurements, with the default estimator.
    pub const fn measured() -> Self {
        Self {
            strategy: WidthStrategy::Measured,
            estimator: Estimator::DEFAULT,
        }
    }

    /// Resolver that only estimates, with the default estimator.
    pub const fn estimated() -> Self {
        Self {
            strategy: WidthStrategy::Estimated,
            estimator: Estimator::DEFAULT,
        }
    }

    /// Use a custom estimator.
    pub const fn with_estimator(mut self, estimator: Estimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Width of `item`, falling back to estimation when no measurement exists.
    pub fn resolve<K: Ord, A>(&self, item: &Item<K, A>, measured: &MeasuredWidths<K>) -> f64 {
        match self.strategy {
            WidthStrategy::Measured => measured
                .get(item.id())
                .unwrap_or_else(|| self.estimator.estimate(item.label())),
            WidthStrategy::Estimated => self.estimator.estimate(item.label()),
        }
    }

    /// True if `item` would be sized by estimation.
    pub fn is_estimated<K: Ord, A>(&self, item: &Item<K, A>, measured: &MeasuredWidths<K>) -> bool {
        match self.strategy {
            WidthStrategy::Measured => measured.get(item.id()).is_none(),
            WidthStrategy::Estimated => true,
        }
    }

    /// True if measurements influence the widths this resolver produces.
    pub fn uses_measurements(&self) -> bool {
        self.strategy == WidthStrategy::Measured
    }

    /// Resolve every item, preserving order.
    pub fn resolve_all<K: Ord, A>(
        &self,
        items: &[Item<K, A>],
        measured: &MeasuredWidths<K>,
    ) -> Vec<f64> {
        items.iter().map(|it| self.resolve(it, measured)).collect()
    }
}
