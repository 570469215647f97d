// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow basics.
//!
//! Pack a toolbar at a few container widths and print which items end up in the "more" menu.
//!
//! Run:
//! - `cargo run -p understory_examples --example overflow_basics`

use kurbo::Size;
use understory_overflow::{Item, LayoutParameters, MeasuredWidths, WidthResolver, layout};

fn main() {
    let items = [
        Item::new("new", "New"),
        Item::new("open", "Open"),
        Item::new("save", "Save"),
        Item::new("share", "Share"),
        Item::new("export", "Export as PDF"),
        Item::new("print", "Print"),
        Item::new("settings", "Settings"),
    ];
    let resolver = WidthResolver::estimated();
    let measured = MeasuredWidths::new();

    for max_rows in [1, 2] {
        for width in [200.0, 400.0, 600.0, 900.0] {
            let params = LayoutParameters::new(width).with_max_rows(max_rows);
            let result = layout(&items, &params, &measured, &resolver);
            println!("width {width:>5}, max rows {max_rows}:");
            for (r, row) in result.rows().iter().enumerate() {
                let ids: Vec<_> = row.ids().copied().collect();
                println!("  row {r} ({:>5.1}): {:?}", row.width, ids);
            }
            if result.show_indicator() {
                println!("  more: {:?}", result.hidden());
            }
        }
    }

    // Geometry for hosts that place children themselves.
    let params = LayoutParameters::new(400.0).with_max_rows(2);
    let result = layout(&items, &params, &measured, &resolver);
    let arrangement = result.arrange(&params, 32.0);
    for (id, row, rect) in &arrangement.items {
        println!("{id:>8} row {row}: {rect:?}");
    }
    if let Some(rect) = arrangement.indicator {
        println!("{:>8}      : {rect:?}", "more");
        // A click in the middle of the indicator opens the "more" surface.
        let click = rect.center();
        assert!(rect.contains(click));
        let hit = arrangement
            .items
            .iter()
            .any(|(_, _, r)| r.contains(click));
        println!("click at {click:?} hits an item: {hit}");
    }

    // Size the toolbar to its content, at least one row tall.
    let size = arrangement.content_size();
    let toolbar = Size::new(params.container_width, size.height.max(32.0));
    println!("content size: {size:?}, toolbar size: {toolbar:?}");
}
