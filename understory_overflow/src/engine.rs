// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overflow engine: owned inputs, trigger policy, and the latest layout.
//!
//! ## Owned input
//!
//! The engine owns the item set, the parameters, and the measured widths. Hosts change them
//! through setters instead of letting the engine infer changes from rendered output.
//! Each setter compares against the current value and only invalidates on a real change,
//! returning whether it did.
//!
//! ## Running passes
//!
//! - [`OverflowEngine::run`] recomputes now if anything is pending.
//! - [`OverflowEngine::request_frame`] defers one recomputation to the next [`tick`](OverflowEngine::tick)
//!   at or after `now`; repeated requests coalesce.
//! - [`OverflowEngine::mount`] schedules the settle passes of the engine's [`SettleSchedule`].
//! - [`OverflowEngine::dispose`] cancels every pending timer; a disposed engine ignores all
//!   further triggers and keeps its last result.
//!
//! `run` and `tick` take an `apply` callback that receives the new [`LayoutResult`] and a
//! [`Feedback`] handle. Structural changes reported through `Feedback` while applying are the
//! engine's own doing and are ignored; invalidations reported there queue exactly one rerun,
//! which runs right after the current pass.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_overflow::{Item, LayoutParameters, OverflowEngine};
//!
//! let mut engine = OverflowEngine::new(LayoutParameters::new(400.0).with_max_rows(1));
//! engine.set_items((1..=5).map(|i| Item::new(i, "Action")));
//! for i in 1..=5 {
//!     engine.set_measured_width(&i, 100.0);
//! }
//! engine.run(|_, _| {});
//!
//! let result = engine.result();
//! assert_eq!(result.visible_len(), 3);
//! assert_eq!(result.hidden(), &[4, 5]);
//! assert!(result.show_indicator());
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use crate::item::Item;
use crate::logging::{debug, trace};
use crate::pack::layout;
use crate::params::LayoutParameters;
use crate::recalc::{Invalidation, Recalc, SettleSchedule, TimerId, Timers};
use crate::types::LayoutResult;
use crate::width::{MeasuredWidths, WidthResolver};

/// Side-channel for the `apply` callback of [`OverflowEngine::run`] and [`OverflowEngine::tick`].
#[derive(Clone, Debug, Default)]
pub struct Feedback {
    invalidated: Invalidation,
    structure_signals: usize,
}

impl Feedback {
    /// Report a structural change observed while applying the result.
    ///
    /// Ignored: the pass that is being applied caused it.
    pub fn structure_changed(&mut self) {
        self.structure_signals += 1;
    }

    /// Report a change that needs another pass, such as a fresh measurement.
    pub fn invalidate(&mut self, why: Invalidation) {
        self.invalidated |= why;
    }
}

/// A hidden item as presented by the "more" surface.
#[derive(Debug)]
pub struct OverflowEntry<'a, K, A> {
    /// Item identity.
    pub id: &'a K,
    /// Display label.
    pub label: &'a str,
    /// Activation payload; the host invokes it when the entry is chosen.
    pub action: &'a A,
}

/// Overflow layout engine for one toolbar.
pub struct OverflowEngine<K, A = ()> {
    items: Vec<Item<K, A>>,
    params: LayoutParameters,
    measured: MeasuredWidths<K>,
    resolver: WidthResolver,
    settle: SettleSchedule,
    recalc: Recalc,
    timers: Timers,
    frame: Option<TimerId>,
    result: LayoutResult<K>,
    last_reasons: Invalidation,
    passes: u64,
    disposed: bool,
}

impl<K: core::fmt::Debug, A> core::fmt::Debug for OverflowEngine<K, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverflowEngine")
            .field("items", &self.items.len())
            .field("params", &self.params)
            .field("resolver", &self.resolver)
            .field("pending", &self.recalc.pending())
            .field("timers", &self.timers.len())
            .field("passes", &self.passes)
            .field("disposed", &self.disposed)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl<K: Ord + Clone, A> OverflowEngine<K, A> {
    /// Create an engine with no items.
    ///
    /// The first [`run`](Self::run) always computes.
    pub fn new(params: LayoutParameters) -> Self {
        let mut recalc = Recalc::new();
        recalc.invalidate(Invalidation::PARAMETERS);
        Self {
            items: Vec::new(),
            params,
            measured: MeasuredWidths::new(),
            resolver: WidthResolver::default(),
            settle: SettleSchedule::default(),
            recalc,
            timers: Timers::new(),
            frame: None,
            result: LayoutResult::default(),
            last_reasons: Invalidation::empty(),
            passes: 0,
            disposed: false,
        }
    }

    /// Use `resolver` for item widths.
    pub fn with_resolver(mut self, resolver: WidthResolver) -> Self {
        let _ = self.set_resolver(resolver);
        self
    }

    /// Use `settle` for [`mount`](Self::mount).
    pub fn with_settle_schedule(mut self, settle: SettleSchedule) -> Self {
        self.settle = settle;
        self
    }

    /// Current items, in order.
    pub fn items(&self) -> &[Item<K, A>] {
        &self.items
    }

    /// Current parameters, as supplied (not normalized).
    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    /// Current measurements.
    pub fn measured(&self) -> &MeasuredWidths<K> {
        &self.measured
    }

    /// Current width resolver.
    pub fn resolver(&self) -> &WidthResolver {
        &self.resolver
    }

    /// Most recent layout. Stale while [`is_dirty`](Self::is_dirty) is true.
    pub fn result(&self) -> &LayoutResult<K> {
        &self.result
    }

    /// Reasons that produced the most recent layout.
    pub fn last_reasons(&self) -> Invalidation {
        self.last_reasons
    }

    /// Reasons recorded since the last pass.
    pub fn pending(&self) -> Invalidation {
        self.recalc.pending()
    }

    /// True if inputs changed since the last pass.
    pub fn is_dirty(&self) -> bool {
        self.recalc.is_dirty()
    }

    /// Number of completed layout passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// True after [`dispose`](Self::dispose).
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Pending timers (settle passes and deferred frames).
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    fn invalidate(&mut self, why: Invalidation) -> bool {
        if self.disposed || why.is_empty() {
            return false;
        }
        self.recalc.invalidate(why);
        true
    }

    /// Set the available width (resize).
    pub fn set_container_width(&mut self, width: f64) -> bool {
        if self.disposed || same_length(self.params.container_width, width) {
            return false;
        }
        self.params.container_width = width;
        self.invalidate(Invalidation::CONTAINER_WIDTH)
    }

    /// Set the row limit.
    pub fn set_max_rows(&mut self, max_rows: usize) -> bool {
        if self.disposed || self.params.max_rows == max_rows {
            return false;
        }
        self.params.max_rows = max_rows;
        self.invalidate(Invalidation::MAX_ROWS)
    }

    /// Replace all parameters, invalidating for whichever fields changed.
    pub fn set_parameters(&mut self, params: LayoutParameters) -> bool {
        if self.disposed {
            return false;
        }
        let old = self.params;
        let mut why = Invalidation::empty();
        if !same_length(old.container_width, params.container_width) {
            why |= Invalidation::CONTAINER_WIDTH;
        }
        if old.max_rows != params.max_rows {
            why |= Invalidation::MAX_ROWS;
        }
        if !same_length(old.margin, params.margin)
            || !same_length(old.row_gap, params.row_gap)
            || !same_length(old.indicator_width, params.indicator_width)
        {
            why |= Invalidation::PARAMETERS;
        }
        self.params = params;
        self.invalidate(why)
    }

    /// Switch width strategy or estimator.
    pub fn set_resolver(&mut self, resolver: WidthResolver) -> bool {
        if self.disposed || self.resolver == resolver {
            return false;
        }
        self.resolver = resolver;
        self.invalidate(Invalidation::MEASUREMENT)
    }

    /// Replace the item set.
    ///
    /// Measurements of items that are no longer present are dropped. Replacing items with the
    /// same ids and labels in the same order swaps their actions without invalidating.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item<K, A>>) -> bool {
        if self.disposed {
            return false;
        }
        let items: Vec<_> = items.into_iter().collect();
        let same_layout_inputs = items.len() == self.items.len()
            && items
                .iter()
                .zip(&self.items)
                .all(|(a, b)| a.id() == b.id() && a.label() == b.label());
        self.items = items;
        self.prune_measurements();
        if same_layout_inputs {
            return false;
        }
        self.invalidate(Invalidation::ITEMS)
    }

    /// Append an item.
    pub fn push_item(&mut self, item: Item<K, A>) -> bool {
        if self.disposed {
            return false;
        }
        self.items.push(item);
        self.invalidate(Invalidation::ITEMS)
    }

    /// Insert an item at `index` (clamped to the end).
    pub fn insert_item(&mut self, index: usize, item: Item<K, A>) -> bool {
        if self.disposed {
            return false;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.invalidate(Invalidation::ITEMS)
    }

    /// Remove the item with `id`, along with its measurement.
    pub fn remove_item(&mut self, id: &K) -> Option<Item<K, A>> {
        if self.disposed {
            return None;
        }
        let pos = self.items.iter().position(|it| it.id() == id)?;
        let removed = self.items.remove(pos);
        let _ = self.measured.remove(id);
        let _ = self.invalidate(Invalidation::ITEMS);
        Some(removed)
    }

    /// Keep only items satisfying `keep`. Returns `true` if any were removed.
    pub fn retain_items(&mut self, mut keep: impl FnMut(&Item<K, A>) -> bool) -> bool {
        if self.disposed {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|it| keep(it));
        if self.items.len() == before {
            return false;
        }
        self.prune_measurements();
        self.invalidate(Invalidation::ITEMS)
    }

    /// Record a measured width for an item.
    ///
    /// Measurements for unknown ids are discarded. Returns `true` if the layout was invalidated,
    /// which only happens when the value changed and the resolver uses measurements.
    pub fn set_measured_width(&mut self, id: &K, width: f64) -> bool {
        if self.disposed || !self.items.iter().any(|it| it.id() == id) {
            return false;
        }
        let changed = self.measured.set(id.clone(), width);
        if !changed || !self.resolver.uses_measurements() {
            return false;
        }
        self.invalidate(Invalidation::MEASUREMENT)
    }

    /// Forget an item's measurement so it falls back to estimation.
    pub fn clear_measured_width(&mut self, id: &K) -> bool {
        if self.disposed || !self.measured.remove(id) || !self.resolver.uses_measurements() {
            return false;
        }
        self.invalidate(Invalidation::MEASUREMENT)
    }

    /// Items currently sized by estimation, in order.
    pub fn unmeasured(&self) -> impl Iterator<Item = &Item<K, A>> + '_ {
        self.items
            .iter()
            .filter(|it| self.resolver.is_estimated(it, &self.measured))
    }

    /// Report a structural change the host observed outside the engine.
    ///
    /// Returns `false` if the signal was ignored.
    pub fn observe_structure(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.recalc.observe_structure()
    }

    /// Schedule the settle passes relative to `now`.
    pub fn mount(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        for &delay in self.settle.delays() {
            let _ = self.timers.schedule(now, delay, Invalidation::SETTLE);
        }
        debug!(
            settle_passes = self.settle.delays().len(),
            "overflow engine mounted"
        );
    }

    /// Defer one recomputation to the next [`tick`](Self::tick) at or after `now`.
    ///
    /// Returns `false` if a frame was already requested (or the engine is disposed).
    pub fn request_frame(&mut self, now: Duration) -> bool {
        if self.disposed {
            return false;
        }
        if self.frame.is_some_and(|id| self.timers.contains(id)) {
            return false;
        }
        self.frame = Some(
            self.timers
                .schedule(now, Duration::ZERO, Invalidation::empty()),
        );
        true
    }

    /// Fire timers due at `now` and run a pass if any fired and something is pending.
    ///
    /// Returns `true` if a pass ran.
    pub fn tick<F>(&mut self, now: Duration, apply: F) -> bool
    where
        F: FnMut(&LayoutResult<K>, &mut Feedback),
    {
        if self.disposed {
            return false;
        }
        let Some(why) = self.timers.take_due(now) else {
            return false;
        };
        self.recalc.invalidate(why);
        self.run(apply)
    }

    /// Recompute now if anything is pending, then let `apply` present the result.
    ///
    /// Runs at most two passes: the pending one, plus one rerun if `apply` reported an
    /// invalidation. Anything reported during the rerun stays pending for the next trigger.
    /// Returns `true` if a pass ran.
    pub fn run<F>(&mut self, mut apply: F) -> bool
    where
        F: FnMut(&LayoutResult<K>, &mut Feedback),
    {
        if self.disposed || !self.pass(&mut apply) {
            return false;
        }
        if self.recalc.is_dirty() {
            trace!("running queued layout pass");
            let _ = self.pass(&mut apply);
        }
        true
    }

    /// Recompute if needed without a presentation callback, and return the result.
    pub fn recompute(&mut self) -> &LayoutResult<K> {
        let _ = self.run(|_, _| {});
        &self.result
    }

    /// Cancel pending timers and stop reacting to triggers.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!(canceled = self.timers.len(), "overflow engine disposed");
        let _ = self.timers.cancel_all();
        self.frame = None;
        self.disposed = true;
    }

    /// Hidden items for the "more" surface, in order.
    pub fn overflow_entries(&self) -> impl Iterator<Item = OverflowEntry<'_, K, A>> + '_ {
        self.result
            .hidden()
            .iter()
            .filter_map(|id| self.item(id))
            .map(|it| OverflowEntry {
                id: it.id(),
                label: it.label(),
                action: it.action(),
            })
    }

    /// Activation payload of the item with `id`.
    pub fn action(&self, id: &K) -> Option<&A> {
        self.item(id).map(Item::action)
    }

    fn item(&self, id: &K) -> Option<&Item<K, A>> {
        self.items.iter().find(|it| it.id() == id)
    }

    fn prune_measurements(&mut self) {
        let items = &self.items;
        self.measured
            .retain_ids(|k| items.iter().any(|it| it.id() == k));
    }

    fn pass(&mut self, apply: &mut impl FnMut(&LayoutResult<K>, &mut Feedback)) -> bool {
        let Some(why) = self.recalc.begin() else {
            return false;
        };
        self.result = layout(&self.items, &self.params, &self.measured, &self.resolver);
        self.last_reasons = why;
        self.passes += 1;
        debug!(
            reasons = ?self.last_reasons,
            container_width = self.params.container_width,
            max_rows = self.params.max_rows,
            rows = self.result.rows().len(),
            visible = self.result.visible_len(),
            hidden = self.result.hidden().len(),
            "overflow layout computed"
        );
        #[cfg(feature = "tracing")]
        for (i, row) in self.result.rows().iter().enumerate() {
            trace!(row = i, width = row.width, items = row.len(), "overflow row");
        }

        let mut feedback = Feedback::default();
        apply(&self.result, &mut feedback);
        for _ in 0..feedback.structure_signals {
            let _ = self.recalc.observe_structure();
        }
        self.recalc.invalidate(feedback.invalidated);
        let _ = self.recalc.finish();
        true
    }
}

fn same_length(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn engine_with(n: u32, width: f64, params: LayoutParameters) -> OverflowEngine<u32> {
        let mut e = OverflowEngine::new(params);
        let _ = e.set_items((1..=n).map(|i| Item::new(i, "Action")));
        for i in 1..=n {
            let _ = e.set_measured_width(&i, width);
        }
        e
    }

    fn one_row(container: f64) -> LayoutParameters {
        LayoutParameters::new(container)
            .with_margin(8.0)
            .with_max_rows(1)
            .with_indicator_width(50.0)
    }

    fn hidden(e: &OverflowEngine<u32>) -> Vec<u32> {
        e.result().hidden().to_vec()
    }

    #[test]
    fn first_run_always_computes() {
        let mut e: OverflowEngine<u32> = OverflowEngine::new(LayoutParameters::new(100.0));
        assert!(e.is_dirty());
        assert!(e.run(|_, _| {}));
        assert_eq!(e.passes(), 1);
        assert!(e.result().is_empty());
        assert!(!e.run(|_, _| {}), "clean engine does not recompute");
    }

    #[test]
    fn resize_triggers_full_recompute() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let _ = e.recompute();
        assert_eq!(hidden(&e), vec![4, 5]);

        assert!(e.set_container_width(1000.0));
        assert!(!e.set_container_width(1000.0), "same width is not a change");
        assert_eq!(e.pending(), Invalidation::CONTAINER_WIDTH);
        let _ = e.recompute();
        assert!(hidden(&e).is_empty());
        assert!(!e.result().show_indicator());
        assert_eq!(e.last_reasons(), Invalidation::CONTAINER_WIDTH);
    }

    #[test]
    fn max_rows_change_triggers_recompute() {
        let mut e = engine_with(7, 100.0, one_row(350.0));
        let _ = e.recompute();
        assert_eq!(e.result().visible_len(), 2);
        assert!(e.set_max_rows(2));
        let _ = e.recompute();
        assert_eq!(e.result().visible_len(), 5);
        assert_eq!(e.result().rows().len(), 2);
    }

    #[test]
    fn removed_item_leaves_no_trace() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let _ = e.recompute();
        assert!(e.result().contains(&2));

        let removed = e.remove_item(&2).expect("item 2 exists");
        assert_eq!(*removed.id(), 2);
        assert_eq!(e.measured().get(&2), None);
        assert_eq!(e.pending(), Invalidation::ITEMS);

        let result = e.recompute().clone();
        assert!(!result.contains(&2));
        assert_eq!(result.len(), 4);
        assert_eq!(result.hidden(), &[5]);
        assert!(e.remove_item(&2).is_none());
    }

    #[test]
    fn measurements_invalidate_only_on_change() {
        let mut e = OverflowEngine::new(one_row(400.0));
        let _ = e.set_items([Item::new(1_u32, "Save"), Item::new(2, "Open")]);
        let _ = e.recompute();
        assert_eq!(e.unmeasured().count(), 2);

        assert!(e.set_measured_width(&1, 60.0));
        assert!(!e.set_measured_width(&1, 60.0));
        assert!(!e.set_measured_width(&9, 60.0), "unknown ids are discarded");
        assert_eq!(e.measured().get(&9), None);
        let _ = e.recompute();
        assert_eq!(e.result().rows()[0].items[0].width, 60.0);
        assert_eq!(e.unmeasured().count(), 1);

        assert!(e.clear_measured_width(&1));
        assert!(!e.clear_measured_width(&1));
        let _ = e.recompute();
        assert_eq!(e.result().rows()[0].items[0].width, 80.0);
    }

    #[test]
    fn estimated_strategy_ignores_measurement_updates() {
        let mut e = OverflowEngine::new(one_row(400.0)).with_resolver(WidthResolver::estimated());
        let _ = e.set_items([Item::new(1_u32, "Save")]);
        let _ = e.recompute();
        assert!(!e.set_measured_width(&1, 10.0));
        assert!(!e.is_dirty());
        assert!(e.set_resolver(WidthResolver::measured()));
        let _ = e.recompute();
        assert_eq!(e.result().rows()[0].items[0].width, 10.0);
    }

    #[test]
    fn set_items_detects_layout_relevant_changes() {
        let mut e = OverflowEngine::new(one_row(400.0));
        assert!(e.set_items([Item::new(1_u32, "A"), Item::new(2, "B")]));
        let _ = e.recompute();
        assert!(!e.set_items([Item::new(1_u32, "A"), Item::new(2, "B")]));
        assert!(e.set_items([Item::new(2_u32, "B"), Item::new(1, "A")]));
        assert!(e.set_items([Item::new(2_u32, "B"), Item::new(1, "A2")]));
    }

    #[test]
    fn set_items_drops_stale_measurements() {
        let mut e = engine_with(3, 100.0, one_row(400.0));
        let _ = e.set_items([Item::new(1_u32, "Action")]);
        assert_eq!(e.measured().len(), 1);
        assert!(e.retain_items(|_| false));
        assert!(e.measured().is_empty());
        assert!(!e.retain_items(|_| false));
    }

    #[test]
    fn insert_and_push_preserve_order() {
        let mut e = engine_with(2, 100.0, one_row(1000.0));
        let _ = e.push_item(Item::new(4, "Action"));
        let _ = e.insert_item(2, Item::new(3, "Action"));
        let _ = e.insert_item(99, Item::new(5, "Action"));
        let ids: Vec<u32> = e.recompute().visible().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn set_parameters_reports_changed_fields() {
        let mut e: OverflowEngine<u32> = OverflowEngine::new(one_row(400.0));
        let _ = e.recompute();
        assert!(!e.set_parameters(one_row(400.0)));
        assert!(e.set_parameters(one_row(500.0).with_max_rows(2).with_margin(4.0)));
        assert_eq!(
            e.pending(),
            Invalidation::CONTAINER_WIDTH | Invalidation::MAX_ROWS | Invalidation::PARAMETERS
        );
    }

    #[test]
    fn structure_changes_while_applying_are_ignored() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let mut applied = 0;
        assert!(e.run(|_, fb| {
            applied += 1;
            // Showing and hiding items mutates the rendered structure.
            fb.structure_changed();
        }));
        assert_eq!(applied, 1);
        assert_eq!(e.passes(), 1);
        assert!(!e.is_dirty());

        // Outside a pass the same signal is a real trigger.
        assert!(e.observe_structure());
        assert_eq!(e.pending(), Invalidation::STRUCTURE);
    }

    #[test]
    fn invalidation_while_applying_queues_one_rerun() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let mut applied = 0;
        assert!(e.run(|_, fb| {
            applied += 1;
            // Keeps asking for more passes; only one rerun may follow.
            fb.invalidate(Invalidation::MEASUREMENT);
        }));
        assert_eq!(applied, 2);
        assert_eq!(e.passes(), 2);
        assert_eq!(e.pending(), Invalidation::MEASUREMENT);
    }

    #[test]
    fn measurement_reported_during_apply_is_picked_up() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let _ = e.clear_measured_width(&5);
        // Estimated until the host reports a real width.
        let mut seen = Vec::new();
        let _ = e.run(|r, fb| {
            seen.push(r.hidden().len());
            fb.invalidate(Invalidation::MEASUREMENT);
        });
        assert_eq!(seen, vec![2, 2]);
        assert_eq!(e.passes(), 2);
    }

    #[test]
    fn settle_passes_run_after_mount() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        e.mount(ms(0));
        assert_eq!(e.timers().len(), 4);
        assert!(e.tick(ms(0), |_, _| {}));
        assert!(!e.tick(ms(50), |_, _| {}), "nothing due yet");
        assert!(e.tick(ms(100), |_, _| {}));
        assert_eq!(e.last_reasons(), Invalidation::SETTLE);
        // The two late passes fire together and converge on the same result.
        let before = e.result().clone();
        assert!(e.tick(ms(1_000), |_, _| {}));
        assert_eq!(e.result(), &before);
        assert_eq!(e.passes(), 3);
        assert!(e.timers().is_empty());
    }

    #[test]
    fn frame_requests_coalesce() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let _ = e.recompute();
        let _ = e.set_container_width(1000.0);
        assert!(e.request_frame(ms(10)));
        assert!(!e.request_frame(ms(11)));
        assert_eq!(e.timers().len(), 1);
        assert!(e.tick(ms(16), |_, _| {}));
        assert!(!e.result().show_indicator());
        assert!(e.request_frame(ms(20)), "fired frame can be requested again");
        assert!(!e.tick(ms(20), |_, _| {}), "nothing pending, nothing to run");
    }

    #[test]
    fn dispose_cancels_timers_and_ignores_triggers() {
        let mut e = engine_with(5, 100.0, one_row(400.0));
        let _ = e.recompute();
        e.mount(ms(0));
        let _ = e.request_frame(ms(0));
        e.dispose();
        assert!(e.is_disposed());
        assert!(e.timers().is_empty());
        assert!(!e.set_container_width(10.0));
        assert!(!e.observe_structure());
        assert!(!e.tick(ms(1_000), |_, _| {}));
        assert!(!e.run(|_, _| {}));
        assert_eq!(e.passes(), 1);
        assert_eq!(hidden(&e), vec![4, 5], "last result is kept");
    }

    #[test]
    fn overflow_entries_expose_hidden_actions() {
        let clicks = Rc::new(Cell::new(0_u32));
        let make = |id: u32, label: &str| {
            let clicks = clicks.clone();
            Item::with_action(id, label, move || clicks.set(clicks.get() + id))
        };
        let mut e = OverflowEngine::new(one_row(400.0));
        let _ = e.set_items((1..=5).map(|i| make(i, "Action")));
        for i in 1..=5 {
            let _ = e.set_measured_width(&i, 100.0);
        }
        let _ = e.recompute();

        let entries: Vec<_> = e.overflow_entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(*entries[0].id, 4);
        assert_eq!(entries[1].label, "Action");
        (entries[0].action)();
        (entries[1].action)();
        assert_eq!(clicks.get(), 9);

        (e.action(&1).expect("item 1 exists"))();
        assert_eq!(clicks.get(), 10);
    }
}
