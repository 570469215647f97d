// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recalculation policy: when to run the packer, and how to keep it from re-entering itself.
//!
//! ## Triggers
//!
//! Every change that can move an item between rows or behind the indicator is an
//! [`Invalidation`]: container width, row limit, other parameters, the item set, a measured width,
//! an externally observed structural change, or a scheduled settle pass.
//! Each one causes a full recompute; results are never patched incrementally.
//!
//! ## Re-entrancy
//!
//! [`Recalc`] is the single in-flight flag. While a pass is in flight:
//!
//! - [`Recalc::observe_structure`] is ignored. Applying a result (showing and hiding items)
//!   is itself a structural change, and observing it must not trigger another pass.
//! - [`Recalc::invalidate`] is recorded. All such invalidations coalesce into at most one
//!   queued rerun, reported by [`Recalc::finish`].
//!
//! ## Deferral
//!
//! Measurements are only trustworthy once the host has painted, so recomputation is often
//! deferred. [`Timers`] is a host-clocked set of single-shot, cancelable timers: the host passes
//! its monotonic "now" and collects due timers with [`Timers::take_due`]. [`SettleSchedule`] lists
//! the delays of the settle passes run after mount.
//! Redundant passes are harmless because packing is idempotent for unchanged inputs.

use alloc::vec::Vec;
use core::time::Duration;

use bitflags::bitflags;

use crate::logging::{debug, trace};

bitflags! {
    /// Reasons a layout must be recomputed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The available width changed (resize).
        const CONTAINER_WIDTH = 0b0000_0001;
        /// The row limit changed.
        const MAX_ROWS        = 0b0000_0010;
        /// Margin, row gap, or indicator width changed.
        const PARAMETERS      = 0b0000_0100;
        /// Items were added, removed, reordered, or relabeled.
        const ITEMS           = 0b0000_1000;
        /// A measured width appeared, changed, or was dropped; or the width strategy changed.
        const MEASUREMENT     = 0b0001_0000;
        /// The host observed a structural change in the rendered items it did not route through the engine.
        const STRUCTURE       = 0b0010_0000;
        /// A scheduled settle pass after mount.
        const SETTLE          = 0b0100_0000;
    }
}

/// In-flight gate serializing layout passes.
#[derive(Clone, Debug, Default)]
pub struct Recalc {
    pending: Invalidation,
    in_flight: bool,
}

impl Recalc {
    /// Create a gate with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record reasons to recompute.
    ///
    /// While a pass is in flight this queues (at most) one rerun.
    pub fn invalidate(&mut self, why: Invalidation) {
        if why.is_empty() {
            return;
        }
        if self.in_flight {
            trace!(reasons = ?why, "invalidation queued behind in-flight pass");
        }
        self.pending |= why;
    }

    /// Record a structural-change observation.
    ///
    /// Returns `false` (and records nothing) while a pass is in flight.
    pub fn observe_structure(&mut self) -> bool {
        if self.in_flight {
            debug!("structure change ignored while a layout pass is in flight");
            return false;
        }
        self.pending |= Invalidation::STRUCTURE;
        true
    }

    /// Reasons recorded so far.
    pub fn pending(&self) -> Invalidation {
        self.pending
    }

    /// True if a pass is needed.
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True between [`begin`](Self::begin) and [`finish`](Self::finish).
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a pass, taking the pending reasons.
    ///
    /// Returns `None` if nothing is pending or a pass is already in flight.
    pub fn begin(&mut self) -> Option<Invalidation> {
        if self.in_flight || self.pending.is_empty() {
            return None;
        }
        self.in_flight = true;
        Some(core::mem::take(&mut self.pending))
    }

    /// End the pass. Returns `true` if a rerun was queued while it was in flight.
    pub fn finish(&mut self) -> bool {
        self.in_flight = false;
        self.is_dirty()
    }
}

/// Handle to a scheduled timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    deadline: Duration,
    why: Invalidation,
}

/// Host-clocked single-shot timers.
///
/// Times are offsets on any monotonic clock the host chooses; only their order matters.
#[derive(Clone, Debug, Default)]
pub struct Timers {
    next_id: u64,
    timers: Vec<Timer>,
}

impl Timers {
    /// Create an empty timer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `why` once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, why: Invalidation) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            deadline: now.saturating_add(delay),
            why,
        });
        id
    }

    /// Cancel a timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer, returning how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }

    /// True if `id` has neither fired nor been canceled.
    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Remove every timer due at `now`.
    ///
    /// Returns the union of their reasons, or `None` if no timer was due.
    pub fn take_due(&mut self, now: Duration) -> Option<Invalidation> {
        let mut fired = None;
        self.timers.retain(|t| {
            if t.deadline <= now {
                fired = Some(fired.unwrap_or(Invalidation::empty()) | t.why);
                false
            } else {
                true
            }
        });
        fired
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Delays of the settle passes scheduled after mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettleSchedule {
    delays: Vec<Duration>,
}

impl SettleSchedule {
    /// Create a schedule from explicit delays.
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            delays: delays.into_iter().collect(),
        }
    }

    /// No settle passes; the host recomputes explicitly.
    pub fn none() -> Self {
        Self { delays: Vec::new() }
    }

    /// Delays, in scheduling order.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

impl Default for SettleSchedule {
    /// Immediately, then after 100ms, 300ms, and 600ms: first paint, then font loads.
    fn default() -> Self {
        Self::new([
            Duration::ZERO,
            Duration::from_millis(100),
            Duration::from_millis(300),
            Duration::from_millis(600),
        ])
    }
}
