//! Landing page frontend: statistics that count up the first time they
//! scroll into view.

pub mod components;
pub mod config;
pub mod counter;
pub mod dom;
