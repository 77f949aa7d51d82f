//! Spinner handling for a page that embeds a single PDF frame
//!
//! The frame's document is already set in the markup. The wrapper stays
//! hidden behind a spinner until the frame reports back or the reveal timer
//! fires, whichever comes first.

use crate::bindings::{PreviewFrameElements, PreviewFramePageConfig};
use crate::dom::{describe, document};
use gloo_timers::callback::Timeout;
use papers_core::{Attempt, CatalogError, PreviewState};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

pub struct PreviewFrame {
    elements: PreviewFrameElements,
    hidden_class: String,
    state: RefCell<PreviewState>,
    handlers: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
    timeout: RefCell<Option<Timeout>>,
}

/// Wire the standalone preview page. Returns `None` when the page has no
/// frame.
pub fn start(config: PreviewFramePageConfig) -> Result<Option<Rc<PreviewFrame>>, CatalogError> {
    let document = document()?;
    let Some(elements) = config.elements.resolve(&document) else {
        tracing::debug!(frame = %config.elements.frame, "no preview frame on this page");
        return Ok(None);
    };

    let frame = Rc::new(PreviewFrame {
        elements,
        hidden_class: config.elements.hidden_class.clone(),
        state: RefCell::new(PreviewState::new()),
        handlers: RefCell::new(Vec::new()),
        timeout: RefCell::new(None),
    });

    let attempt = frame.state.borrow_mut().open(frame.elements.frame.src());
    frame.install(attempt);
    if let Some(millis) = config.preview.timeout_ms {
        let weak = Rc::downgrade(&frame);
        *frame.timeout.borrow_mut() = Some(Timeout::new(millis, move || {
            settle(&weak, |state| state.timed_out(attempt));
        }));
    }
    frame.apply();
    Ok(Some(frame))
}

impl PreviewFrame {
    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    fn install(self: &Rc<Self>, attempt: Attempt) {
        let weak = Rc::downgrade(self);
        let load = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            settle(&weak, |state| state.loaded(attempt));
        });
        let weak = Rc::downgrade(self);
        let error = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            settle(&weak, |state| {
                let settled = state.failed(attempt);
                if settled {
                    let source = state.source().unwrap_or_default().to_string();
                    tracing::error!("{}", CatalogError::FrameLoad(source));
                }
                settled
            });
        });

        let frame = &self.elements.frame;
        frame.set_onload(Some(load.as_ref().unchecked_ref()));
        frame.set_onerror(Some(error.as_ref().unchecked_ref()));
        self.handlers.borrow_mut().extend([load, error]);
    }

    fn apply(&self) {
        let display = self.state.borrow().display();
        let result = (|| -> Result<(), JsValue> {
            if let Some(spinner) = &self.elements.spinner {
                spinner
                    .style()
                    .set_property("display", if display.spinner { "block" } else { "none" })?;
            }
            // An errored frame is revealed too so its own message is visible
            if let Some(wrapper) = &self.elements.wrapper {
                if display.spinner {
                    wrapper.class_list().add_1(&self.hidden_class)?;
                } else {
                    wrapper.class_list().remove_1(&self.hidden_class)?;
                }
            }
            Ok(())
        })();
        if let Err(e) = result {
            tracing::warn!("could not update preview frame: {}", describe(&e));
        }
    }
}

fn settle<F>(weak: &Weak<PreviewFrame>, signal: F)
where
    F: FnOnce(&mut PreviewState) -> bool,
{
    let Some(frame) = weak.upgrade() else {
        return;
    };
    let settled = signal(&mut *frame.state.borrow_mut());
    if settled {
        frame.elements.frame.set_onload(None);
        frame.elements.frame.set_onerror(None);
        frame.apply();
        tracing::debug!(phase = ?frame.state().phase(), "preview frame settled");
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use crate::bindings::PreviewFrameBindings;
    use papers_core::{PreviewConfig, PreviewPhase};
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page(prefix: &str) -> PreviewFramePageConfig {
        let doc = document().unwrap();
        let body = doc.body().unwrap();
        let wrapper: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
        wrapper.set_id(&format!("{}-wrapper", prefix));
        wrapper.class_list().add_1("pdf-hidden").unwrap();
        let frame = doc.create_element("iframe").unwrap();
        frame.set_id(&format!("{}-frame", prefix));
        wrapper.append_child(&frame).unwrap();
        let spinner = doc.create_element("div").unwrap();
        spinner.set_id(&format!("{}-spinner", prefix));
        body.append_child(&spinner).unwrap();
        body.append_child(&wrapper).unwrap();

        PreviewFramePageConfig {
            elements: PreviewFrameBindings {
                frame: format!("{}-frame", prefix),
                spinner: format!("{}-spinner", prefix),
                wrapper: format!("{}-wrapper", prefix),
                hidden_class: "pdf-hidden".to_string(),
            },
            preview: PreviewConfig::default(),
        }
    }

    #[wasm_bindgen_test]
    fn test_missing_frame_is_inert() {
        let config = PreviewFramePageConfig {
            elements: PreviewFrameBindings {
                frame: "absent-frame".to_string(),
                ..PreviewFrameBindings::default()
            },
            ..PreviewFramePageConfig::default()
        };
        assert!(start(config).unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_wrapper_hidden_until_load() {
        let frame = start(page("pf-load")).unwrap().unwrap();
        assert_eq!(frame.state().phase(), PreviewPhase::Loading);
        let wrapper = frame.elements.wrapper.as_ref().unwrap();
        assert!(wrapper.class_list().contains("pdf-hidden"));

        frame.elements.frame.dispatch_event(&Event::new("load").unwrap()).unwrap();
        assert_eq!(frame.state().phase(), PreviewPhase::Loaded);
        assert!(!wrapper.class_list().contains("pdf-hidden"));
        let spinner = frame.elements.spinner.as_ref().unwrap();
        assert_eq!(spinner.style().get_property_value("display").unwrap(), "none");
    }

    #[wasm_bindgen_test]
    fn test_late_error_after_load_is_ignored() {
        let frame = start(page("pf-late")).unwrap().unwrap();
        frame.elements.frame.dispatch_event(&Event::new("load").unwrap()).unwrap();
        frame.elements.frame.dispatch_event(&Event::new("error").unwrap()).unwrap();
        assert_eq!(frame.state().phase(), PreviewPhase::Loaded);
    }

    #[wasm_bindgen_test]
    async fn test_reveal_timer_shows_frame_that_never_reports() {
        let config = PreviewFramePageConfig {
            preview: PreviewConfig::with_timeout(10),
            ..page("pf-timer")
        };
        let frame = start(config).unwrap().unwrap();
        // The frame never reports back
        frame.elements.frame.set_onload(None);
        frame.elements.frame.set_onerror(None);
        assert_eq!(frame.state().phase(), PreviewPhase::Loading);

        gloo_timers::future::TimeoutFuture::new(60).await;

        assert_eq!(frame.state().phase(), PreviewPhase::TimedOut);
        let wrapper = frame.elements.wrapper.as_ref().unwrap();
        assert!(!wrapper.class_list().contains("pdf-hidden"));
        let spinner = frame.elements.spinner.as_ref().unwrap();
        assert_eq!(spinner.style().get_property_value("display").unwrap(), "none");
    }
}
