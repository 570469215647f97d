// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout parameters: container width, spacing, row limit, and indicator reservation.
//!
//! Parameters are plain values handed to every layout pass.
//! Nothing here is ambient state; two passes with equal parameters and equal items
//! always produce equal results.
//!
//! ## Normalization
//!
//! A layout engine that runs inside a render/measure cycle must not fail.
//! [`LayoutParameters::normalized`] clamps whatever the host supplied into a usable shape:
//!
//! - negative or NaN widths and spacings become `0.0`,
//! - `max_rows == 0` becomes `1`.
//!
//! Hosts that want to surface bad configuration can call [`LayoutParameters::validate`] first;
//! the packer itself never looks at the error.

use thiserror::Error;

/// Inputs to a layout pass other than the items themselves.
///
/// All lengths are in the host's pixel units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutParameters {
    /// Width available for items, with the container's internal padding already removed.
    ///
    /// See [`LayoutParameters::with_outer_width`] to derive it from a padded container.
    pub container_width: f64,
    /// Horizontal space between two adjacent items of the same row.
    pub margin: f64,
    /// Vertical space between rows. Only used when arranging geometry.
    pub row_gap: f64,
    /// Maximum number of rows visible items may occupy.
    pub max_rows: usize,
    /// Width reserved for the overflow indicator, including any spacing before it.
    pub indicator_width: f64,
}

impl LayoutParameters {
    /// Common toolbar defaults: 8px spacing, one row, 50px indicator.
    pub const DEFAULT: Self = Self {
        container_width: 0.0,
        margin: 8.0,
        row_gap: 8.0,
        max_rows: 1,
        indicator_width: 50.0,
    };

    /// Create parameters for the given available width, other fields at their defaults.
    pub const fn new(container_width: f64) -> Self {
        Self {
            container_width,
            ..Self::DEFAULT
        }
    }

    /// Set the available width.
    pub const fn with_container_width(mut self, container_width: f64) -> Self {
        self.container_width = container_width;
        self
    }

    /// Derive the available width from an outer width minus the total horizontal padding.
    pub fn with_outer_width(mut self, outer_width: f64, horizontal_padding: f64) -> Self {
        self.container_width = outer_width - non_negative(horizontal_padding);
        self
    }

    /// Set the inter-item margin.
    pub const fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the inter-row gap.
    pub const fn with_row_gap(mut self, row_gap: f64) -> Self {
        self.row_gap = row_gap;
        self
    }

    /// Set the row limit.
    pub const fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Set the reserved indicator width.
    pub const fn with_indicator_width(mut self, indicator_width: f64) -> Self {
        self.indicator_width = indicator_width;
        self
    }

    /// Clamp every field into its valid range.
    ///
    /// Idempotent: normalizing twice equals normalizing once.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            container_width: non_negative(self.container_width),
            margin: non_negative(self.margin),
            row_gap: non_negative(self.row_gap),
            max_rows: self.max_rows.max(1),
            indicator_width: non_negative(self.indicator_width),
        }
    }

    /// Report the first field that [`normalized`](Self::normalized) would have to change.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !is_valid_length(self.container_width) {
            return Err(ParameterError::ContainerWidth(self.container_width));
        }
        if !is_valid_length(self.margin) {
            return Err(ParameterError::Margin(self.margin));
        }
        if !is_valid_length(self.row_gap) {
            return Err(ParameterError::RowGap(self.row_gap));
        }
        if self.max_rows == 0 {
            return Err(ParameterError::ZeroRows);
        }
        if !is_valid_length(self.indicator_width) {
            return Err(ParameterError::IndicatorWidth(self.indicator_width));
        }
        Ok(())
    }
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A parameter outside its valid range, as reported by [`LayoutParameters::validate`].
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ParameterError {
    /// The available width is negative, NaN, or infinite.
    #[error("container width must be finite and non-negative, got {0}")]
    ContainerWidth(f64),
    /// The inter-item margin is negative, NaN, or infinite.
    #[error("margin must be finite and non-negative, got {0}")]
    Margin(f64),
    /// The row gap is negative, NaN, or infinite.
    #[error("row gap must be finite and non-negative, got {0}")]
    RowGap(f64),
    /// The row limit is zero.
    #[error("max rows must be at least 1")]
    ZeroRows,
    /// The indicator width is negative, NaN, or infinite.
    #[error("indicator width must be finite and non-negative, got {0}")]
    IndicatorWidth(f64),
}

/// Clamp a length to `>= 0`, mapping NaN to zero.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

fn is_valid_length(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}
