use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

use super::observer::DomVisibilityObserver;
use super::scheduler::FrameScheduler;
use super::surface::ElementSurface;
use crate::config::CounterConfig;
use crate::counter::engine::ViewportCounter;
use crate::counter::target::{duration_or, CounterTarget};

pub type DomCounters = ViewportCounter<ElementSurface, DomVisibilityObserver, FrameScheduler>;

/// Finds every counter surface in `document` and starts watching it.
///
/// Two markers are recognised: elements matching `data_target_selector`
/// carry their target in `data-target`, elements matching
/// `text_target_selector` already show it (e.g. `98%`). An element matching
/// both is only counted once, as a `data-target` surface. That is decided
/// per call, so mounting again after a teardown finds the same surfaces.
pub fn mount(document: &Document, config: &CounterConfig) -> Result<DomCounters, JsValue> {
    let observer = DomVisibilityObserver::new(config.threshold)?;
    let scheduler = FrameScheduler::from_config(config)?;
    let counters = ViewportCounter::new(config.clone(), observer, scheduler);

    let weak = counters.downgrade();
    counters.observer().set_listener(move |event| {
        if let Some(counters) = weak.upgrade() {
            counters.on_visibility_change(event);
        }
    });

    let default_ms = config.duration_ms;
    let attribute_target = |surface: &ElementSurface| {
        let duration = duration_or(surface.data_duration().as_deref(), default_ms);
        CounterTarget::from_data_attribute(&surface.data_target()?, duration)
    };
    let text_target = |surface: &ElementSurface| {
        let duration = duration_or(surface.data_duration().as_deref(), default_ms);
        CounterTarget::from_display_text(&surface.text()?, duration)
    };

    let by_attribute: Vec<_> = select(document, &config.data_target_selector)?
        .into_iter()
        .filter(|surface| attribute_target(surface).is_some())
        .collect();
    counters.register(by_attribute.clone(), attribute_target);

    let by_text = unclaimed(
        &by_attribute,
        select(document, &config.text_target_selector)?,
        |taken, candidate| {
            let node: &Node = candidate.element();
            taken.element().is_same_node(Some(node))
        },
    );
    counters.register(by_text, text_target);

    info!("Watching {} counters", counters.len());
    Ok(counters)
}

/// Drops every candidate that is `same` as one already claimed, keeping order.
fn unclaimed<T>(claimed: &[T], candidates: Vec<T>, same: impl Fn(&T, &T) -> bool) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|candidate| !claimed.iter().any(|taken| same(taken, candidate)))
        .collect()
}

fn select(document: &Document, selector: &str) -> Result<Vec<ElementSurface>, JsValue> {
    if selector.trim().is_empty() {
        return Ok(Vec::new());
    }
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(ElementSurface::new)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::unclaimed;

    #[test]
    fn claimed_surfaces_are_not_counted_twice() {
        let by_attribute = ["flights", "pilots"];
        let by_text = vec!["satisfaction", "pilots", "uptime"];
        assert_eq!(
            unclaimed(&by_attribute, by_text, |a, b| a == b),
            ["satisfaction", "uptime"]
        );
    }

    #[test]
    fn nothing_claimed_keeps_every_candidate() {
        let by_text = vec![3, 1, 2];
        assert_eq!(unclaimed(&[], by_text, |a, b| a == b), [3, 1, 2]);
    }
}
