use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::config::{CounterConfig, FrameSource};
use crate::counter::engine::TickScheduler;

pub enum FrameScheduler {
    AnimationFrame { window: Window, fallback_ms: u32 },
    Timer { interval_ms: u32 },
}

impl FrameScheduler {
    pub fn from_config(config: &CounterConfig) -> Result<Self, JsValue> {
        let interval_ms = config.frame_interval_millis();
        Ok(match config.frame_source {
            FrameSource::AnimationFrame => {
                let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
                FrameScheduler::AnimationFrame {
                    window,
                    fallback_ms: interval_ms,
                }
            }
            FrameSource::Timer => FrameScheduler::Timer { interval_ms },
        })
    }
}

impl TickScheduler for FrameScheduler {
    fn schedule(&self, tick: Box<dyn FnOnce()>) {
        match self {
            FrameScheduler::AnimationFrame {
                window,
                fallback_ms,
            } => {
                // The tick is shared with the fallback path in case the request is refused.
                let slot = std::rc::Rc::new(std::cell::RefCell::new(Some(tick)));
                let frame_slot = slot.clone();
                let callback = Closure::once_into_js(move |_timestamp: f64| {
                    if let Some(tick) = frame_slot.borrow_mut().take() {
                        tick();
                    }
                });
                if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
                    warn!("requestAnimationFrame failed, using a timer: {:?}", err);
                    if let Some(tick) = slot.borrow_mut().take() {
                        Timeout::new(*fallback_ms, tick).forget();
                    }
                }
            }
            FrameScheduler::Timer { interval_ms } => {
                Timeout::new(*interval_ms, tick).forget();
            }
        }
    }
}
