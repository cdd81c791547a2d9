use yew::prelude::*;
use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config;
use crate::dom;

/// Inline styles that take an element out of its pre-reveal state.
pub const REVEALED_STYLE: [(&str, &str); 2] = [("opacity", "1"), ("transform", "none")];

fn reveal(element: &Element) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        for (property, value) in REVEALED_STYLE {
            dom::set_style(element, property, value);
        }
    }
}

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

fn observer_supported() -> bool {
    dom::window()
        .map(|window| Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

fn observe(targets: &[Element]) -> Option<RevealObserver> {
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            reveal(&target);
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config::REVEAL_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    for target in targets {
        observer.observe(target);
    }
    Some(RevealObserver { observer, _callback: callback })
}

/// Fades cards, slides and destinations in the first time they scroll into
/// view. Reveals are one-shot.
#[hook]
pub fn use_reveal_on_scroll() {
    use_effect_with_deps(|_| {
        let targets = dom::query_all::<Element>(config::REVEAL_SELECTORS);
        debug!("Reveal targets: {}", targets.len());

        let observer = if observer_supported() {
            observe(&targets)
        } else {
            None
        };
        if observer.is_none() {
            info!("IntersectionObserver unavailable, revealing everything");
            targets.iter().for_each(reveal);
        }

        move || {
            if let Some(observer) = observer {
                observer.observer.disconnect();
            }
        }
    }, ());
}
