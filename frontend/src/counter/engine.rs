use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use log::debug;

use super::format::{render_final, render_progress};
use super::interpolation::{Frame, Interpolation};
use super::target::CounterTarget;
use crate::config::CounterConfig;

/// Browsers report sub-pixel intersection ratios (0.999 for a fully visible
/// box), so a ratio this close under the threshold still counts.
pub const RATIO_TOLERANCE: f64 = 1e-3;

/// Handle the engine assigns to each registered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u32);

impl SurfaceId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Somewhere a number can be written.
pub trait DisplaySurface {
    fn set_text(&self, text: &str);
}

/// Reports visibility changes of observed surfaces back through
/// [`ViewportCounter::on_visibility_change`].
pub trait VisibilityObserver {
    type Surface;

    fn observe(&self, id: SurfaceId, surface: &Self::Surface);
    fn unobserve(&self, id: SurfaceId, surface: &Self::Surface);
}

/// Runs a callback once, at the next frame.
pub trait TickScheduler {
    fn schedule(&self, tick: Box<dyn FnOnce()>);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEvent {
    pub surface: SurfaceId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Once `Fired`, a surface never goes back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Fired,
}

struct Entry<S> {
    surface: S,
    target: CounterTarget,
    state: TriggerState,
    run: Option<Interpolation>,
}

struct Registry<S> {
    entries: HashMap<SurfaceId, Entry<S>>,
    next_id: u32,
}

struct Shared<S, O, T> {
    config: CounterConfig,
    observer: O,
    scheduler: T,
    registry: RefCell<Registry<S>>,
}

/// Counts each registered surface up to its target the first time it becomes
/// visible enough, and never again.
pub struct ViewportCounter<S, O, T> {
    shared: Rc<Shared<S, O, T>>,
}

impl<S, O, T> Clone for ViewportCounter<S, O, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

/// Non-owning handle for platform callbacks that must not keep the engine alive.
pub struct WeakViewportCounter<S, O, T> {
    shared: Weak<Shared<S, O, T>>,
}

impl<S, O, T> Clone for WeakViewportCounter<S, O, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<S, O, T> WeakViewportCounter<S, O, T> {
    pub fn upgrade(&self) -> Option<ViewportCounter<S, O, T>> {
        self.shared.upgrade().map(|shared| ViewportCounter { shared })
    }
}

impl<S, O, T> ViewportCounter<S, O, T>
where
    S: DisplaySurface + Clone + 'static,
    O: VisibilityObserver<Surface = S> + 'static,
    T: TickScheduler + 'static,
{
    pub fn new(config: CounterConfig, observer: O, scheduler: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                config,
                observer,
                scheduler,
                registry: RefCell::new(Registry {
                    entries: HashMap::new(),
                    next_id: 0,
                }),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakViewportCounter<S, O, T> {
        WeakViewportCounter {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.shared.config
    }

    pub fn observer(&self) -> &O {
        &self.shared.observer
    }

    /// Starts watching every surface `extract` finds a target for. Surfaces
    /// without one are skipped without complaint.
    pub fn register<I, F>(&self, surfaces: I, extract: F) -> Vec<SurfaceId>
    where
        I: IntoIterator<Item = S>,
        F: Fn(&S) -> Option<CounterTarget>,
    {
        let mut ids = Vec::new();
        for surface in surfaces {
            let Some(target) = extract(&surface) else {
                continue;
            };
            if !(target.value.is_finite() && target.value > 0.0) {
                continue;
            }

            let id = {
                let mut registry = self.shared.registry.borrow_mut();
                let id = SurfaceId(registry.next_id);
                registry.next_id += 1;
                registry.entries.insert(
                    id,
                    Entry {
                        surface: surface.clone(),
                        target,
                        state: TriggerState::Idle,
                        run: None,
                    },
                );
                id
            };
            debug!("Counter {} registered with target {}", id, target.value);
            self.shared.observer.observe(id, &surface);
            ids.push(id);
        }
        ids
    }

    pub fn on_visibility_change(&self, event: VisibilityEvent) {
        let fired = {
            let mut registry = self.shared.registry.borrow_mut();
            let Some(entry) = registry.entries.get_mut(&event.surface) else {
                return;
            };
            if entry.state == TriggerState::Fired
                || !event.is_intersecting
                || event.ratio + RATIO_TOLERANCE < self.shared.config.threshold
            {
                return;
            }
            entry.state = TriggerState::Fired;
            entry.run = Some(Interpolation::new(
                entry.target.value,
                entry.target.duration_ms,
                self.shared.config.frame_interval_ms,
            ));
            entry.surface.clone()
        };

        debug!("Counter {} visible at {:.2}, animating", event.surface, event.ratio);
        self.shared.observer.unobserve(event.surface, &fired);
        tick(&self.shared, event.surface);
    }

    /// Forgets a surface. An animation in flight stops at its next tick.
    pub fn remove(&self, id: SurfaceId) -> bool {
        let removed = self.shared.registry.borrow_mut().entries.remove(&id);
        match removed {
            Some(entry) => {
                if entry.state == TriggerState::Idle {
                    self.shared.observer.unobserve(id, &entry.surface);
                }
                true
            }
            None => false,
        }
    }

    pub fn teardown(&self) {
        let drained: Vec<_> = self.shared.registry.borrow_mut().entries.drain().collect();
        for (id, entry) in drained {
            if entry.state == TriggerState::Idle {
                self.shared.observer.unobserve(id, &entry.surface);
            }
        }
    }

    pub fn state(&self, id: SurfaceId) -> Option<TriggerState> {
        self.shared
            .registry
            .borrow()
            .entries
            .get(&id)
            .map(|entry| entry.state)
    }

    pub fn is_animating(&self, id: SurfaceId) -> bool {
        self.shared
            .registry
            .borrow()
            .entries
            .get(&id)
            .is_some_and(|entry| entry.run.is_some())
    }

    pub fn len(&self) -> usize {
        self.shared.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tick<S, O, T>(shared: &Rc<Shared<S, O, T>>, id: SurfaceId)
where
    S: DisplaySurface + 'static,
    O: 'static,
    T: TickScheduler + 'static,
{
    let separator = shared.config.thousands_separator.as_str();
    let more = {
        let mut registry = shared.registry.borrow_mut();
        let Some(entry) = registry.entries.get_mut(&id) else {
            return;
        };
        let Some(run) = entry.run.as_mut() else {
            return;
        };
        match run.advance() {
            Frame::Progress(current) => {
                entry
                    .surface
                    .set_text(&render_progress(current, entry.target.style, separator));
                true
            }
            Frame::Complete => {
                entry.surface.set_text(&render_final(&entry.target, separator));
                entry.run = None;
                false
            }
        }
    };

    if more {
        let weak = Rc::downgrade(shared);
        shared.scheduler.schedule(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                tick(&shared, id);
            }
        }));
    } else {
        debug!("Counter {} finished", id);
    }
}
