use std::rc::Rc;

use yew::prelude::*;
use log::debug;
use gloo_timers::callback::Interval;
use web_sys::KeyboardEvent;

use crate::config;

/// Which slide is showing. `index` stays in `[0, len)`; an empty slider
/// never moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderState {
    index: usize,
    len: usize,
}

impl SliderState {
    pub fn new(initial: usize, len: usize) -> Self {
        let index = if initial < len { initial } else { 0 };
        Self { index, len }
    }

    /// Starts on the first slide marked active, falling back to the first.
    pub fn from_marked(active: impl IntoIterator<Item = bool>) -> Self {
        let mut len = 0;
        let mut initial = None;
        for (i, is_active) in active.into_iter().enumerate() {
            if is_active && initial.is_none() {
                initial = Some(i);
            }
            len += 1;
        }
        Self::new(initial.unwrap_or(0), len)
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn len(self) -> usize {
        self.len
    }

    pub fn advanced(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self { index: (self.index + 1) % self.len, ..self }
    }

    pub fn retreated(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self { index: (self.index + self.len - 1) % self.len, ..self }
    }
}

pub enum SliderAction {
    Advance,
    Retreat,
}

impl Reducible for SliderState {
    type Action = SliderAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            SliderAction::Advance => self.advanced(),
            SliderAction::Retreat => self.retreated(),
        };
        Rc::new(next)
    }
}

pub fn key_action(key: &str) -> Option<SliderAction> {
    match key {
        "ArrowRight" => Some(SliderAction::Advance),
        "ArrowLeft" => Some(SliderAction::Retreat),
        _ => None,
    }
}

#[derive(Clone, PartialEq)]
pub struct Slide {
    pub image: &'static str,
    pub quote: &'static str,
    pub author: &'static str,
    pub active: bool,
}

#[derive(Properties, PartialEq)]
pub struct SliderProps {
    pub slides: Vec<Slide>,
}

#[function_component(Slider)]
pub fn slider(props: &SliderProps) -> Html {
    let state = {
        let slides = props.slides.clone();
        use_reducer(move || SliderState::from_marked(slides.iter().map(|s| s.active)))
    };
    let timer = use_mut_ref(|| None::<Interval>);

    let start_timer = {
        let dispatcher = state.dispatcher();
        let timer = timer.clone();
        let len = state.len();
        Rc::new(move || {
            if len < 2 {
                return;
            }
            let dispatcher = dispatcher.clone();
            *timer.borrow_mut() = Some(Interval::new(config::SLIDER_INTERVAL_MS, move || {
                dispatcher.dispatch(SliderAction::Advance);
            }));
        })
    };

    {
        let start_timer = start_timer.clone();
        let timer = timer.clone();
        use_effect_with_deps(move |_| {
            start_timer();
            move || {
                timer.borrow_mut().take();
            }
        }, ());
    }

    let on_mouse_enter = {
        let timer = timer.clone();
        Callback::from(move |_: MouseEvent| {
            debug!("Slider paused");
            timer.borrow_mut().take();
        })
    };

    let on_mouse_leave = {
        let start_timer = start_timer.clone();
        Callback::from(move |_: MouseEvent| start_timer())
    };

    let on_key_down = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: KeyboardEvent| {
            if let Some(action) = key_action(&e.key()) {
                e.prevent_default();
                dispatcher.dispatch(action);
            }
        })
    };

    let current = state.index();

    html! {
        <div
            id="slider"
            class="slider"
            tabindex="0"
            role="region"
            aria-roledescription="carousel"
            aria-label="Traveller stories"
            onmouseenter={on_mouse_enter}
            onmouseleave={on_mouse_leave}
            onkeydown={on_key_down}
        >
            {
                props.slides.iter().enumerate().map(|(i, slide)| {
                    let active = i == current;
                    html! {
                        <figure
                            key={i}
                            class={classes!("slide", active.then_some("active"))}
                            aria-hidden={(!active).then_some("true")}
                        >
                            <img src={slide.image} alt="" loading="lazy" />
                            <blockquote>{slide.quote}</blockquote>
                            <figcaption>{slide.author}</figcaption>
                        </figure>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}
