//! Interactive region map: hover shows a region's name, click opens the
//! catalog for that region.

use crate::bindings::MapPageConfig;
use crate::dom::{describe, document, window};
use papers_core::region::element_name;
use papers_core::{navigation_url, CatalogError, MapConfig, RegionDisplay};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

struct MapView {
    display: HtmlElement,
    config: MapConfig,
    attribute: String,
}

impl MapView {
    fn show(&self, view: &RegionDisplay) {
        self.display.set_text_content(Some(&view.text));
        if let Err(e) = self
            .display
            .style()
            .set_property("background-color", &view.background)
        {
            tracing::warn!("could not style region display: {}", describe(&e));
        }
    }

    fn reset(&self) {
        self.show(&RegionDisplay::idle(&self.config));
    }

    fn region_of(&self, element: &Element) -> Option<String> {
        element
            .get_attribute(&self.attribute)
            .filter(|region| !region.is_empty())
    }
}

/// Wire every region of the map. Returns the number of regions found.
pub fn start(config: MapPageConfig) -> Result<usize, CatalogError> {
    let document = document()?;
    let elements = config.elements.resolve(&document)?;
    let view = Rc::new(MapView {
        display: elements.display,
        config: config.map,
        attribute: config.elements.region_attribute,
    });

    view.reset();
    tracing::info!("Found {} province paths for interactivity.", elements.regions.len());

    for (index, region) in elements.regions.iter().enumerate() {
        let has_title = region
            .get_attribute("title")
            .map(|title| !title.is_empty())
            .unwrap_or(false);
        if !has_title {
            tracing::warn!(
                "Path ID: {} ({}: {}) is missing the 'title' attribute. Hover names will use fallback.",
                element_name(&region.id(), index),
                view.attribute,
                view.region_of(region).unwrap_or_default(),
            );
        }
        attach(region, &view).map_err(|e| CatalogError::Setup(describe(&e)))?;
    }

    Ok(elements.regions.len())
}

fn attach(region: &Element, view: &Rc<MapView>) -> Result<(), JsValue> {
    let on_click = {
        let view = Rc::clone(view);
        let region = region.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Some(id) = view.region_of(&region) else {
                return;
            };
            let url = navigation_url(&id, &view.config);
            tracing::debug!(url = %url, "navigating to region");
            let result = window()
                .map_err(|e| JsValue::from_str(&e.to_string()))
                .and_then(|w| w.location().set_href(&url));
            if let Err(e) = result {
                tracing::error!("could not navigate to {}: {}", url, describe(&e));
            }
        })
    };

    let on_enter = {
        let view = Rc::clone(view);
        let region = region.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let title = region.get_attribute("title");
            let id = view.region_of(&region).unwrap_or_default();
            if let Some(display) = RegionDisplay::hovered(title.as_deref(), &id, &view.config) {
                view.show(&display);
            }
        })
    };

    let on_leave = {
        let view = Rc::clone(view);
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| view.reset())
    };

    for (event, handler) in [
        ("click", on_click),
        ("mouseover", on_enter),
        ("mouseout", on_leave),
    ] {
        region.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}
