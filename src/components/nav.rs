use yew::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent};

use crate::config;
use crate::dom::{self, Listener};
use crate::effects::anchors::use_smooth_anchor_scroll;

/// Open/closed state of the mobile menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    pub fn menu_class(self) -> &'static str {
        if self.open { "nav-links open" } else { "nav-links" }
    }

    /// Escape dismisses an open menu; every other key is left to the page.
    pub fn closes_on(self, key: &str) -> bool {
        self.open && key == "Escape"
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu = use_state(MenuState::default);
    let toggle_ref = use_node_ref();

    // Escape closes an open menu and hands focus back to the toggle.
    {
        let open = menu.is_open();
        let menu = menu.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with_deps(move |open: &bool| {
            let listener = if *open {
                let state = MenuState { open: *open };
                dom::window().and_then(|window| {
                    Listener::new(&window, "keydown", move |e: Event| {
                        let closes = e
                            .dyn_ref::<KeyboardEvent>()
                            .map(|key| state.closes_on(&key.key()))
                            .unwrap_or(false);
                        if !closes {
                            return;
                        }
                        debug!("Escape pressed, closing menu");
                        menu.set(MenuState::closed());
                        if let Some(toggle) = toggle_ref.cast::<HtmlElement>() {
                            let _ = toggle.focus();
                        }
                    })
                })
            } else {
                None
            };
            move || drop(listener)
        }, open);
    }

    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: ()| menu.set(MenuState::closed()))
    };
    use_smooth_anchor_scroll(close_menu);

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu.set(menu.toggled());
        })
    };

    html! {
        <header class="site-header">
            <nav class="top-nav" aria-label="Primary">
                <a href="#top" class="nav-logo">{config::SITE_NAME}</a>

                <button
                    id="menu-toggle"
                    class="menu-toggle"
                    ref={toggle_ref}
                    aria-controls="menu"
                    aria-expanded={menu.aria_expanded()}
                    onclick={toggle_menu}
                >
                    <span class="visually-hidden">{"Menu"}</span>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <ul id="menu" class={menu.menu_class()}>
                    <li><a href="#services" class="nav-link">{"Services"}</a></li>
                    <li><a href="#destinations" class="nav-link">{"Destinations"}</a></li>
                    <li><a href="#stories" class="nav-link">{"Stories"}</a></li>
                    <li><a href="#contact" class="nav-link nav-cta">{"Contact"}</a></li>
                </ul>
            </nav>
        </header>
    }
}
