//! Browser bindings for the counter engine.

pub mod mount;
pub mod observer;
pub mod scheduler;
pub mod surface;

pub use mount::{mount, DomCounters};
