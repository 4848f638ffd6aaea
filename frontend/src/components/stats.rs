use log::error;
use yew::prelude::*;

use crate::config::CounterConfig;
use crate::dom;

/// Mounts the viewport counters once the component's markup is in the page
/// and tears them down on unmount.
#[hook]
pub fn use_viewport_counters(config: CounterConfig) {
    use_effect_with_deps(
        move |config| {
            let document = web_sys::window().and_then(|window| window.document());
            let counters = match document.map(|document| dom::mount(&document, config)) {
                Some(Ok(counters)) => Some(counters),
                Some(Err(err)) => {
                    error!("Failed to start counters: {:?}", err);
                    None
                }
                None => None,
            };

            move || {
                if let Some(counters) = counters {
                    counters.teardown();
                }
            }
        },
        config,
    );
}

pub struct Stat {
    pub label: &'static str,
    pub value: StatValue,
}

pub enum StatValue {
    /// Counted up to from `data-target`.
    Target(u64),
    /// Counted up to from the text already shown.
    Shown(&'static str),
}

pub const DRONE_STATS: &[Stat] = &[
    Stat { label: "Flights completed", value: StatValue::Target(1500) },
    Stat { label: "Hectares mapped", value: StatValue::Target(12000) },
    Stat { label: "Certified pilots", value: StatValue::Target(24) },
    Stat { label: "Client satisfaction", value: StatValue::Shown("98%") },
];

#[derive(Properties, PartialEq)]
pub struct StatsSectionProps {
    #[prop_or_default]
    pub config: CounterConfig,
}

#[function_component(StatsSection)]
pub fn stats_section(props: &StatsSectionProps) -> Html {
    use_viewport_counters(props.config.clone());

    html! {
        <section class="stats">
            <div class="stats-grid">
                { for DRONE_STATS.iter().map(|stat| html! {
                    <div class="stat">
                        { match stat.value {
                            StatValue::Target(target) => html! {
                                <span class="stat-number" data-target={target.to_string()}>{"0"}</span>
                            },
                            StatValue::Shown(text) => html! {
                                <span class="stat-percentage">{text}</span>
                            },
                        }}
                        <p class="stat-label">{stat.label}</p>
                    </div>
                })}
            </div>
        </section>
    }
}
