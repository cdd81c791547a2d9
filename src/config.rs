/// Always the page's own origin so same-origin credentials apply. In
/// development `trunk serve` proxies `/api` to the local backend (Trunk.toml).
pub fn get_backend_url() -> &'static str {
    ""
}

pub fn contact_endpoint() -> String {
    format!("{}/api/contact", get_backend_url())
}

pub const SITE_NAME: &str = "Harbor & Vale";

// Parallax
pub const PARALLAX_FACTOR: f64 = 0.18;
pub const PARALLAX_MAX_PX: f64 = 140.0;
pub const PARALLAX_MIN_WIDTH: f64 = 680.0;
pub const SCROLL_THROTTLE_MS: f64 = 16.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 120;

// Reveal
pub const REVEAL_THRESHOLD: f64 = 0.12;
pub const REVEAL_SELECTORS: &str = ".card, .slide, .dest, .contact-card";

// Slider
pub const SLIDER_INTERVAL_MS: u32 = 5000;

// Contact form
pub const REENABLE_DELAY_MS: u32 = 600;
