use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;
use log::debug;
use gloo_timers::callback::Timeout;
use web_sys::{Event, HtmlElement};

use crate::config;
use crate::dom::{self, Listener};

/// Vertical offset of the hero decoration in px. Narrow viewports get none.
pub fn parallax_offset(scroll_y: f64, viewport_width: f64) -> f64 {
    if viewport_width < config::PARALLAX_MIN_WIDTH {
        return 0.0;
    }
    (scroll_y * config::PARALLAX_FACTOR).clamp(0.0, config::PARALLAX_MAX_PX)
}

/// The transform to write, or `None` when motion is reduced and the element
/// must be left alone.
pub fn hero_transform(reduced_motion: bool, scroll_y: f64, viewport_width: f64) -> Option<String> {
    if reduced_motion {
        return None;
    }
    let offset = parallax_offset(scroll_y, viewport_width);
    Some(format!("translate3d(0, {}px, 0)", offset))
}

/// What a throttled scroll event should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    Run,
    /// Too soon; run once more after this many ms so the resting position
    /// is applied.
    Defer(u32),
    /// Too soon and a trailing run is already scheduled.
    Skip,
}

/// One call per interval, plus a single trailing call for events that land
/// inside the window.
#[derive(Debug)]
pub struct Throttle {
    interval_ms: f64,
    last: Option<f64>,
    trailing: bool,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last: None, trailing: false }
    }

    pub fn poll(&mut self, now_ms: f64) -> Tick {
        match self.last {
            Some(last) if now_ms - last < self.interval_ms => {
                if self.trailing {
                    return Tick::Skip;
                }
                self.trailing = true;
                Tick::Defer((self.interval_ms - (now_ms - last)).ceil() as u32)
            }
            _ => {
                self.last = Some(now_ms);
                Tick::Run
            }
        }
    }

    /// Records that the deferred call ran at `now_ms`.
    pub fn trailing_fired(&mut self, now_ms: f64) {
        self.trailing = false;
        self.last = Some(now_ms);
    }
}

fn apply_transform(art: &HtmlElement) {
    if let Some(transform) = hero_transform(false, dom::scroll_y(), dom::viewport_width()) {
        dom::set_style(art, "transform", &transform);
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let art_ref = use_node_ref();

    {
        let art_ref = art_ref.clone();
        use_effect_with_deps(move |_| {
            let mut listeners = Vec::new();
            match (art_ref.cast::<HtmlElement>(), dom::window()) {
                _ if dom::prefers_reduced_motion() => {
                    debug!("Reduced motion preferred, parallax disabled");
                }
                (Some(art), Some(window)) => {
                    apply_transform(&art);

                    let scroll_art = art.clone();
                    let throttle = Rc::new(RefCell::new(Throttle::new(config::SCROLL_THROTTLE_MS)));
                    let trailing: RefCell<Option<Timeout>> = RefCell::new(None);
                    listeners.extend(Listener::new(&window, "scroll", move |_: Event| {
                        let tick = throttle.borrow_mut().poll(dom::now_ms());
                        match tick {
                            Tick::Run => apply_transform(&scroll_art),
                            Tick::Defer(delay) => {
                                let throttle = throttle.clone();
                                let art = scroll_art.clone();
                                // Reads scroll_y when it fires, not when scheduled.
                                *trailing.borrow_mut() = Some(Timeout::new(delay, move || {
                                    throttle.borrow_mut().trailing_fired(dom::now_ms());
                                    apply_transform(&art);
                                }));
                            }
                            Tick::Skip => {}
                        }
                    }));

                    let pending: RefCell<Option<Timeout>> = RefCell::new(None);
                    listeners.extend(Listener::new(&window, "resize", move |_: Event| {
                        let art = art.clone();
                        // Replacing the handle cancels the previous timeout.
                        *pending.borrow_mut() = Some(Timeout::new(config::RESIZE_DEBOUNCE_MS, move || {
                            apply_transform(&art);
                        }));
                    }));
                }
                _ => debug!("Hero art not found, parallax skipped"),
            }
            move || drop(listeners)
        }, ());
    }

    html! {
        <section id="top" class="hero">
            <div class="hero-art" ref={art_ref} aria-hidden="true"></div>
            <div class="hero-content">
                <h1>{props.title.clone()}</h1>
                <p class="hero-subtitle">{props.subtitle.clone()}</p>
                <a href="#contact" class="hero-cta">{"Plan your trip"}</a>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: f64 = 1280.0;

    #[test]
    fn offset_scales_with_scroll() {
        assert_eq!(parallax_offset(0.0, WIDE), 0.0);
        assert!((parallax_offset(100.0, WIDE) - 18.0).abs() < 1e-9);
        assert!((parallax_offset(500.0, WIDE) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn offset_is_capped() {
        assert_eq!(parallax_offset(10_000.0, WIDE), 140.0);
        assert_eq!(parallax_offset(140.0 / 0.18 + 1.0, WIDE), 140.0);
    }

    #[test]
    fn overscroll_does_not_go_negative() {
        assert_eq!(parallax_offset(-50.0, WIDE), 0.0);
    }

    #[test]
    fn narrow_viewports_are_suppressed() {
        assert_eq!(parallax_offset(400.0, 679.0), 0.0);
        assert!(parallax_offset(400.0, 680.0) > 0.0);
    }

    #[test]
    fn reduced_motion_never_yields_a_transform() {
        for scroll in [0.0, 12.5, 300.0, 1_000.0, 50_000.0] {
            for width in [320.0, 680.0, WIDE] {
                assert_eq!(hero_transform(true, scroll, width), None);
            }
        }
    }

    #[test]
    fn transform_string() {
        assert_eq!(
            hero_transform(false, 100.0, WIDE).as_deref(),
            Some("translate3d(0, 18px, 0)")
        );
        assert_eq!(
            hero_transform(false, 100.0, 400.0).as_deref(),
            Some("translate3d(0, 0px, 0)")
        );
    }

    #[test]
    fn throttle_lets_one_call_per_interval() {
        let mut throttle = Throttle::new(16.0);
        assert_eq!(throttle.poll(0.0), Tick::Run);
        assert_eq!(throttle.poll(5.0), Tick::Defer(11));
        assert_eq!(throttle.poll(15.9), Tick::Skip);
        throttle.trailing_fired(16.0);
        assert_eq!(throttle.poll(20.0), Tick::Defer(12));
        throttle.trailing_fired(32.0);
        assert_eq!(throttle.poll(48.0), Tick::Run);
    }

    #[test]
    fn first_event_after_a_quiet_window_runs_immediately() {
        let mut throttle = Throttle::new(16.0);
        assert_eq!(throttle.poll(100.0), Tick::Run);
        assert_eq!(throttle.poll(116.0), Tick::Run);
    }

    /// Replays scroll events through the throttle the way the hero's listener
    /// does, firing deferred calls with the scroll position at fire time.
    fn replay(events: &[(f64, f64)]) -> Option<String> {
        let mut throttle = Throttle::new(16.0);
        let mut scroll_y = 0.0;
        let mut applied = None;
        let mut deferred_until: Option<f64> = None;

        for &(at, y) in events {
            if let Some(due) = deferred_until.filter(|due| *due <= at) {
                throttle.trailing_fired(due);
                applied = hero_transform(false, scroll_y, WIDE);
                deferred_until = None;
            }
            scroll_y = y;
            match throttle.poll(at) {
                Tick::Run => applied = hero_transform(false, scroll_y, WIDE),
                Tick::Defer(delay) => deferred_until = Some(at + f64::from(delay)),
                Tick::Skip => {}
            }
        }
        // Scrolling has stopped; pending timeouts still fire.
        if let Some(due) = deferred_until {
            throttle.trailing_fired(due);
            applied = hero_transform(false, scroll_y, WIDE);
        }
        applied
    }

    #[test]
    fn resting_position_is_applied_after_scrolling_stops() {
        let applied = replay(&[(0.0, 100.0), (10.0, 300.0)]);
        assert_eq!(applied, hero_transform(false, 300.0, WIDE));
        assert_eq!(applied.as_deref(), Some("translate3d(0, 54px, 0)"));
    }

    #[test]
    fn burst_inside_one_window_ends_on_the_last_position() {
        let applied = replay(&[(0.0, 0.0), (4.0, 50.0), (8.0, 100.0), (12.0, 200.0)]);
        assert_eq!(applied, hero_transform(false, 200.0, WIDE));
    }
}
