use yew::prelude::*;
use log::{info, Level};

mod config;
mod dom;
mod components {
    pub mod contact;
    pub mod footer;
    pub mod nav;
    pub mod parallax;
    pub mod slider;
}
mod effects {
    pub mod anchors;
    pub mod reveal;
}
mod pages {
    pub mod home;
}

use components::{footer::Footer, nav::Nav};
use effects::reveal::use_reveal_on_scroll;
use pages::home::Home;

#[function_component]
fn App() -> Html {
    use_reveal_on_scroll();

    html! {
        <>
            <Nav />
            <Home />
            <Footer />
        </>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting {}", config::SITE_NAME);
    yew::Renderer::<App>::new().render();
}
