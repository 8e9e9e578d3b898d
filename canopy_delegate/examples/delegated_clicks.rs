// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegated clicks over a small element tree.
//!
//! Builds a toolbar, registers one delegated listener for all of its buttons, and emits a
//! few synthetic clicks to show target resolution, one-shot removal, and cleanup.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p canopy_delegate --example delegated_clicks --features dom_adapter
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use canopy_delegate::{Delegate, Handler, Options};
use canopy_dom::{Dom, ElementData};

fn main() {
    // html > nav#toolbar > (button.save, button.load > span)
    let mut dom = Dom::new();
    let toolbar = dom.insert(None, ElementData::new("nav").with_id("toolbar"));
    let save = dom.insert(Some(toolbar), ElementData::new("button").with_class("save"));
    let load = dom.insert(Some(toolbar), ElementData::new("button").with_class("load"));
    let icon = dom.insert(Some(load), ElementData::new("span"));

    let mut delegate: Delegate<Dom> = Delegate::new();

    let clicks = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&clicks);
    let on_button = Handler::new(move |target, _event| {
        *counter.borrow_mut() += 1;
        println!("button clicked: {target:?}");
    });
    delegate.on(&mut dom, "click", "button", &on_button, Options::default());

    let greet = Handler::new(|_, _| println!("first click only"));
    delegate.on(&mut dom, "click", "#toolbar", &greet, Options::default().once());

    println!(
        "{} registrations share {} native listener(s)",
        delegate.registration_count(),
        dom.total_listener_count()
    );

    // A click on the icon resolves upward to its button.
    delegate.emit(&mut dom, "click", Some(icon), None);
    delegate.emit(&mut dom, "click", Some(save), None);
    // The toolbar itself matches no "button" selector entry.
    delegate.emit(&mut dom, "click", Some(toolbar), None);

    println!("delegated clicks delivered: {}", clicks.borrow());

    delegate.off(&mut dom, "click", "button", &on_button, Options::default());
    println!(
        "after removal: {} registrations, {} native listener(s)",
        delegate.registration_count(),
        dom.total_listener_count()
    );
}
