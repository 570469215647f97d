// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolbar items.

use alloc::string::String;

/// A single actionable control in the toolbar.
///
/// - `K` is the item identity. It must be unique within one item set and is what layout
///   results refer to.
/// - `A` is whatever the host runs on activation: a closure, a command enum, or `()` when the
///   host keeps actions elsewhere.
///
/// Items are immutable once created. Replace the item (or the whole set) to change one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K, A = ()> {
    id: K,
    label: String,
    action: A,
}

impl<K> Item<K> {
    /// Create an item without an action payload.
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self::with_action(id, label, ())
    }
}

impl<K, A> Item<K, A> {
    /// Create an item carrying an activation payload.
    pub fn with_action(id: K, label: impl Into<String>, action: A) -> Self {
        Self {
            id,
            label: label.into(),
            action,
        }
    }

    /// Identity of the item.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Activation payload.
    pub fn action(&self) -> &A {
        &self.action
    }
}
