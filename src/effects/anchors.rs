use yew::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom::{self, Listener};

/// `#` alone means "top of page" to the browser, so only longer hashes are
/// treated as in-page targets.
pub fn is_in_page_target(href: &str) -> bool {
    href.starts_with('#') && href.len() > 1
}

/// Smooth-scrolls same-page hash links and calls `on_navigate` after each
/// intercepted click.
#[hook]
pub fn use_smooth_anchor_scroll(on_navigate: Callback<()>) {
    use_effect_with_deps(move |_| {
        let listener = dom::document().and_then(|document| {
            Listener::new(&document, "click", move |e: Event| {
                if scroll_to_anchor(&e) {
                    on_navigate.emit(());
                }
            })
        });
        move || drop(listener)
    }, ());
}

fn scroll_to_anchor(event: &Event) -> bool {
    let Some(clicked) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    let Some(link) = clicked.closest("a[href^='#']").ok().flatten() else {
        return false;
    };
    let Some(href) = link.get_attribute("href") else {
        return false;
    };
    if !is_in_page_target(&href) {
        return false;
    }
    // An href like "#1st" is not a valid selector; let the browser handle it.
    let Some(destination) = dom::query::<Element>(&href) else {
        debug!("No anchor target for {}", href);
        return false;
    };

    event.prevent_default();
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    destination.scroll_into_view_with_scroll_into_view_options(&options);
    true
}
