pub mod engine;
pub mod format;
pub mod interpolation;
pub mod target;

pub use engine::{
    DisplaySurface, SurfaceId, TickScheduler, TriggerState, ViewportCounter, VisibilityEvent,
    VisibilityObserver, WeakViewportCounter,
};
pub use target::{CounterTarget, NumberStyle};
