// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow engine lifecycle.
//!
//! Mount an engine, feed it measurements as a host would after paint, resize it, and remove an
//! item while it is hidden. Settle passes are driven by a simulated clock.
//!
//! Run:
//! - `cargo run -p understory_examples --example overflow_engine`

use core::time::Duration;

use understory_overflow::{Invalidation, Item, LayoutParameters, OverflowEngine};

fn main() {
    let mut engine = OverflowEngine::new(LayoutParameters::new(420.0).with_max_rows(1));
    let _ = engine.set_items(
        ["Bold", "Italic", "Underline", "Link", "Quote", "Code", "Clear formatting"]
            .into_iter()
            .enumerate()
            .map(|(i, label)| Item::with_action(i, label, label.len())),
    );
    engine.mount(Duration::ZERO);

    // The host paints once with estimated widths, then measures the real ones.
    let measured = [48.0, 52.0, 90.0, 44.0, 60.0, 50.0, 140.0];
    let mut now = Duration::ZERO;
    while let Some(deadline) = engine.timers().next_deadline() {
        now = deadline;
        let ran = engine.tick(now, |result, feedback| {
            // Showing and hiding items is a structural change the host would observe.
            feedback.structure_changed();
            println!(
                "{:>4}ms: {} visible, more = {:?}",
                now.as_millis(),
                result.visible_len(),
                result.hidden()
            );
        });
        if ran && now == Duration::ZERO {
            for (id, width) in measured.iter().enumerate() {
                let _ = engine.set_measured_width(&id, *width);
            }
        }
    }
    println!("passes after settling: {}", engine.passes());

    // Resize: widths are already measured, so a single pass suffices.
    let _ = engine.set_container_width(300.0);
    let _ = engine.run(|result, _| println!("resized: more = {:?}", result.hidden()));
    for entry in engine.overflow_entries() {
        println!("  more entry {:?} (payload {})", entry.label, entry.action);
    }

    // Remove a hidden item; it leaves the overflow menu with the next pass.
    let _ = engine.remove_item(&6);
    assert_eq!(engine.pending(), Invalidation::ITEMS);
    let _ = engine.run(|result, _| println!("removed: more = {:?}", result.hidden()));

    engine.dispose();
    assert!(!engine.set_container_width(1000.0));
}
