// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overflow --heading-base-level=0

//! Understory Overflow: deterministic overflow layout for toolbars.
//!
//! Given an ordered set of items, a container width, and a row limit, this crate decides which
//! items are shown in which row and which are collapsed behind a trailing "more" indicator.
//!
//! - Items keep their input order: visible items are always a prefix, hidden items the suffix.
//! - The indicator only takes space when something overflows, and then always fits on the last row.
//! - Widths come from host measurements when available, falling back to a label-based estimate.
//! - Recomputation is explicit and re-entrancy safe: applying a result never triggers another pass.
//!
//! ## Where this fits
//!
//! This crate decides placement, not pixels. A host (a retained widget tree, an immediate-mode UI,
//! or a terminal renderer) feeds it widths and parameters, then shows and hides its own item
//! widgets from the [`LayoutResult`]. [`LayoutResult::arrange`] turns a result into
//! [`kurbo::Rect`]s for hosts that position children themselves.
//!
//! ## API overview
//!
//! - [`pack`] and [`layout`]: the pure packer, over raw widths or over [`Item`]s.
//! - [`LayoutParameters`]: container width, margin, row gap, row limit, indicator width.
//! - [`WidthResolver`]: measured-or-estimated width per item; see [`Estimator`].
//! - [`OverflowEngine`]: owns items, parameters, and measurements; runs passes on demand,
//!   after frames, and on a settle schedule after mount.
//! - [`Invalidation`]: why a pass is needed.
//!
//! ### Pure packing
//!
//! ```
//! use understory_overflow::{LayoutParameters, pack};
//!
//! let params = LayoutParameters::new(350.0)
//!     .with_margin(8.0)
//!     .with_max_rows(2)
//!     .with_indicator_width(50.0);
//! let packing = pack(&[100.0; 7], &params);
//!
//! // Three items on the first row, two beside the indicator on the second.
//! assert_eq!(packing.rows.len(), 2);
//! assert_eq!(packing.rows[0].range, 0..3);
//! assert_eq!(packing.rows[1].range, 3..5);
//! assert_eq!(packing.hidden(), 5..7);
//! assert!(packing.show_indicator);
//! ```
//!
//! ### Engine with estimated widths
//!
//! ```
//! use understory_overflow::{Item, LayoutParameters, OverflowEngine, WidthResolver};
//!
//! let mut engine = OverflowEngine::new(LayoutParameters::new(300.0))
//!     .with_resolver(WidthResolver::estimated());
//! engine.set_items([
//!     Item::with_action("save", "Save", 1),
//!     Item::with_action("open", "Open", 2),
//!     Item::with_action("export", "Export as PDF", 3),
//! ]);
//!
//! let result = engine.recompute();
//! assert_eq!(result.hidden(), &["export"]);
//!
//! let entries: Vec<_> = engine.overflow_entries().map(|e| (e.label, *e.action)).collect();
//! assert_eq!(entries, [("Export as PDF", 3)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `tracing` feature for structured logs of
//! each pass and of ignored re-entrant triggers, and `serde` to serialize parameters and results.

#![no_std]

extern crate alloc;

mod logging;

pub mod arrange;
pub mod engine;
pub mod item;
pub mod pack;
pub mod params;
pub mod recalc;
pub mod types;
pub mod width;

pub use arrange::Arrangement;
pub use engine::{Feedback, OverflowEngine, OverflowEntry};
pub use item::Item;
pub use pack::{PackedRow, Packing, layout, pack};
pub use params::{LayoutParameters, ParameterError};
pub use recalc::{Invalidation, Recalc, SettleSchedule, TimerId, Timers};
pub use types::{LayoutResult, Row, RowItem};
pub use width::{Estimator, MeasuredWidths, WidthResolver, WidthStrategy};
