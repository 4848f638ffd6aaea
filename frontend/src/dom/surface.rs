use web_sys::Element;

use crate::counter::engine::{DisplaySurface, SurfaceId};

pub const DATA_TARGET: &str = "data-target";
pub const DATA_DURATION: &str = "data-duration";
/// Stamped on observed elements so observer entries map back to a [`SurfaceId`].
pub const DATA_COUNTER_ID: &str = "data-counter-id";

#[derive(Debug, Clone)]
pub struct ElementSurface(Element);

impl ElementSurface {
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &Element {
        &self.0
    }

    pub fn data_target(&self) -> Option<String> {
        self.0.get_attribute(DATA_TARGET)
    }

    pub fn data_duration(&self) -> Option<String> {
        self.0.get_attribute(DATA_DURATION)
    }

    pub fn text(&self) -> Option<String> {
        self.0.text_content()
    }

    pub(crate) fn stamp(&self, id: SurfaceId) {
        let _ = self.0.set_attribute(DATA_COUNTER_ID, &id.to_string());
    }

    pub(crate) fn clear_stamp(&self) {
        let _ = self.0.remove_attribute(DATA_COUNTER_ID);
    }
}

pub(crate) fn surface_id_of(element: &Element) -> Option<SurfaceId> {
    element
        .get_attribute(DATA_COUNTER_ID)?
        .parse()
        .ok()
        .map(SurfaceId::from_raw)
}

impl DisplaySurface for ElementSurface {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}
