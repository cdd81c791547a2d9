use yew::prelude::*;

use crate::components::contact::ContactForm;
use crate::components::parallax::Hero;
use crate::components::slider::{Slide, Slider};

struct Service {
    title: &'static str,
    body: &'static str,
}

struct Destination {
    name: &'static str,
    image: &'static str,
    blurb: &'static str,
}

const SERVICES: [Service; 3] = [
    Service {
        title: "Custom itineraries",
        body: "Tell us how you like to travel and we'll plan every night, transfer and table around it.",
    },
    Service {
        title: "Group travel",
        body: "Weddings, reunions and retreats. One point of contact for the whole party.",
    },
    Service {
        title: "On-trip support",
        body: "A real person on the phone, day or night, for as long as you're away.",
    },
];

const DESTINATIONS: [Destination; 4] = [
    Destination { name: "The Azores", image: "/assets/azores.webp", blurb: "Crater lakes and whale watching." },
    Destination { name: "Lofoten", image: "/assets/lofoten.webp", blurb: "Fishing villages under the midnight sun." },
    Destination { name: "Puglia", image: "/assets/puglia.webp", blurb: "Olive groves, trulli and long lunches." },
    Destination { name: "Kyoto", image: "/assets/kyoto.webp", blurb: "Temples, gardens and quiet ryokans." },
];

fn stories() -> Vec<Slide> {
    vec![
        Slide {
            image: "/assets/story-1.webp",
            quote: "Every detail was handled. We just had to show up.",
            author: "Maeve & Tom, Lofoten",
            active: true,
        },
        Slide {
            image: "/assets/story-2.webp",
            quote: "They found us a farmhouse we'd never have found ourselves.",
            author: "The Okafor family, Puglia",
            active: false,
        },
        Slide {
            image: "/assets/story-3.webp",
            quote: "When our ferry was cancelled, they'd rebooked us before we'd noticed.",
            author: "Priya, the Azores",
            active: false,
        },
    ]
}

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <main class="landing-page">
            <Hero
                title="Slow travel, carefully planned"
                subtitle="Small-group and private trips to places worth lingering in."
            />

            <section id="services" class="services">
                <h2>{"What we do"}</h2>
                <div class="card-grid">
                    {
                        SERVICES.iter().map(|service| html! {
                            <article class="card">
                                <h3>{service.title}</h3>
                                <p>{service.body}</p>
                            </article>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <section id="destinations" class="destinations">
                <h2>{"Where we go"}</h2>
                <div class="dest-grid">
                    {
                        DESTINATIONS.iter().map(|dest| html! {
                            <article class="dest">
                                <img src={dest.image} alt={dest.name} loading="lazy" />
                                <h3>{dest.name}</h3>
                                <p>{dest.blurb}</p>
                            </article>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <section id="stories" class="stories">
                <h2>{"From our travellers"}</h2>
                <Slider slides={stories()} />
            </section>

            <section id="contact" class="contact">
                <div class="contact-card">
                    <h2>{"Start planning"}</h2>
                    <p>{"Send us a few lines about the trip you have in mind. We reply within one working day."}</p>
                </div>
                <ContactForm />
            </section>
        </main>
    }
}
