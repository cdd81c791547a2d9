use yew::prelude::*;
use chrono::{Datelike, Local};

use crate::config;
use crate::dom;

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn rights_notice() -> String {
    format!(" {}. All rights reserved.", config::SITE_NAME)
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = current_year();

    // Fills every `.year` placeholder, including any outside the app root.
    use_effect_with_deps(move |year: &i32| {
        for placeholder in dom::query_all::<web_sys::Element>(".year") {
            placeholder.set_text_content(Some(&year.to_string()));
        }
        || ()
    }, year);

    html! {
        <footer class="site-footer">
            <div class="contact-card">
                <h3>{"Visit us"}</h3>
                <p>{"14 Quay Street, Galway"}</p>
                <p><a href="mailto:hello@harborandvale.travel">{"hello@harborandvale.travel"}</a></p>
            </div>
            <p class="copyright">
                {"© "}<span class="year"></span>{rights_notice()}
            </p>
            <a href="#top" class="back-to-top">{"Back to top"}</a>
        </footer>
    }
}
