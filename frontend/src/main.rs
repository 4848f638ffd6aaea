use yew::prelude::*;
use log::{info, warn};
use web_sys::window;

use dronesite_frontend::components::StatsSection;
use dronesite_frontend::config::{self, CounterConfig};

/// Counter settings from `<body data-counter-config='…'>`, defaults otherwise.
fn page_config() -> CounterConfig {
    let raw = window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .and_then(|body| body.get_attribute(config::CONFIG_ATTRIBUTE));

    match raw {
        Some(raw) => CounterConfig::from_json(&raw).unwrap_or_else(|err| {
            warn!("Ignoring invalid {}: {}", config::CONFIG_ATTRIBUTE, err);
            CounterConfig::default()
        }),
        None => CounterConfig::default(),
    }
}

#[function_component]
fn App() -> Html {
    let counter_config = use_memo(|_| page_config(), ());

    html! {
        <div class="landing-page">
            <header class="hero">
                <div class="hero-content">
                    <h1>{"Aerial work, done right"}</h1>
                    <p class="hero-subtitle">
                        {"Surveying, inspection and filming with certified drone pilots."}
                    </p>
                </div>
            </header>
            <StatsSection config={(*counter_config).clone()} />
        </div>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
