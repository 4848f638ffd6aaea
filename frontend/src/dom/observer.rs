use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Number};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::surface::{surface_id_of, ElementSurface};
use crate::counter::engine::{SurfaceId, VisibilityEvent, VisibilityObserver};

type Listener = Rc<RefCell<Option<Box<dyn Fn(VisibilityEvent)>>>>;

/// `IntersectionObserver` that turns entries into [`VisibilityEvent`]s.
pub struct DomVisibilityObserver {
    observer: IntersectionObserver,
    listener: Listener,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl DomVisibilityObserver {
    pub fn new(threshold: f64) -> Result<Self, JsValue> {
        let listener: Listener = Rc::new(RefCell::new(None));
        let forward = listener.clone();

        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let forward = forward.borrow();
            let Some(listener) = forward.as_ref() else {
                return;
            };
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let Some(id) = surface_id_of(&entry.target()) else {
                    continue;
                };
                listener(VisibilityEvent {
                    surface: id,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        let thresholds: Array = observer_thresholds(threshold)
            .into_iter()
            .map(Number::from)
            .collect();
        init.set_threshold(&thresholds);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            listener,
            _callback: callback,
        })
    }

    /// Replaces whoever receives the events.
    pub fn set_listener(&self, listener: impl Fn(VisibilityEvent) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }
}

/// Crossing points to report. Zero is always included so entering the
/// viewport delivers an entry even when the configured threshold is never
/// reported exactly (a fully visible box often measures 0.999).
fn observer_thresholds(threshold: f64) -> Vec<f64> {
    if threshold > 0.0 {
        vec![0.0, threshold]
    } else {
        vec![0.0]
    }
}

impl VisibilityObserver for DomVisibilityObserver {
    type Surface = ElementSurface;

    fn observe(&self, id: SurfaceId, surface: &ElementSurface) {
        surface.stamp(id);
        self.observer.observe(surface.element());
    }

    fn unobserve(&self, _id: SurfaceId, surface: &ElementSurface) {
        self.observer.unobserve(surface.element());
        surface.clear_stamp();
    }
}

impl Drop for DomVisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::observer_thresholds;

    #[test]
    fn thresholds_always_include_entry() {
        assert_eq!(observer_thresholds(0.5), [0.0, 0.5]);
        assert_eq!(observer_thresholds(1.0), [0.0, 1.0]);
        assert_eq!(observer_thresholds(0.0), [0.0]);
    }
}
