//! Full-screen PDF preview overlay of the catalog page
//!
//! Opening points the frame at the embeddable form of a sharing link and
//! shows a spinner until the frame reports back. The frame's `load`/`error`
//! handlers are installed per opening and removed on close, and each one is
//! tagged with its opening's attempt number, so a late event from an earlier
//! document can't reveal or blank the current one.

use crate::bindings::OverlayElements;
use crate::dom::{describe, set_visible, window};
use gloo_timers::callback::Timeout;
use papers_core::{
    preview_url, Attempt, CatalogConfig, CatalogError, PreviewConfig, PreviewState,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement};

const BUTTON_LABEL: &str = "Preview";
const BUTTON_BUSY_LABEL: &str = "Loading...";
const BUTTON_BUSY_CLASS: &str = "loading";

struct FrameHandlers {
    _load: Closure<dyn FnMut(Event)>,
    _error: Closure<dyn FnMut(Event)>,
}

pub struct PreviewOverlay {
    elements: OverlayElements,
    catalog: CatalogConfig,
    preview: PreviewConfig,
    state: RefCell<PreviewState>,
    button: RefCell<Option<HtmlElement>>,
    handlers: RefCell<Option<FrameHandlers>>,
    timeout: RefCell<Option<Timeout>>,
}

impl PreviewOverlay {
    /// Wire the close control and the click-outside handler
    pub fn attach(
        elements: OverlayElements,
        catalog: CatalogConfig,
        preview: PreviewConfig,
    ) -> Result<Rc<Self>, JsValue> {
        let overlay = Rc::new(Self {
            elements,
            catalog,
            preview,
            state: RefCell::new(PreviewState::new()),
            button: RefCell::new(None),
            handlers: RefCell::new(None),
            timeout: RefCell::new(None),
        });

        let weak = Rc::downgrade(&overlay);
        let on_close = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let Some(overlay) = weak.upgrade() {
                overlay.close();
            }
        });
        overlay
            .elements
            .close_button
            .add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
        on_close.forget();

        let weak = Rc::downgrade(&overlay);
        let on_window_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(overlay) = weak.upgrade() else {
                return;
            };
            let on_backdrop = event
                .target()
                .map(|target| js_sys::Object::is(&target, &overlay.elements.modal))
                .unwrap_or(false);
            if on_backdrop {
                overlay.close();
            }
        });
        window()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .add_event_listener_with_callback("click", on_window_click.as_ref().unchecked_ref())?;
        on_window_click.forget();

        overlay.apply();
        Ok(overlay)
    }

    /// Show the overlay and start loading the preview of `link`
    pub fn open(self: &Rc<Self>, link: &str, button: Option<HtmlElement>) {
        let url = preview_url(link, &self.catalog);
        self.detach();
        self.release_button();

        let attempt = self.state.borrow_mut().open(url.clone());
        *self.button.borrow_mut() = button;
        self.install_handlers(attempt);

        if let Some(millis) = self.preview.timeout_ms {
            let weak = Rc::downgrade(self);
            *self.timeout.borrow_mut() = Some(Timeout::new(millis, move || {
                settle(&weak, |state| state.timed_out(attempt));
            }));
        }

        self.apply();
        self.elements.frame.set_src(&url);
        tracing::debug!(url = %url, attempt, "opening preview");
    }

    /// Blank the frame and hide the overlay
    pub fn close(&self) {
        self.detach();
        self.state.borrow_mut().close();
        self.elements.frame.set_src("");
        self.apply();
        self.release_button();
    }

    pub fn state(&self) -> PreviewState {
        self.state.borrow().clone()
    }

    fn install_handlers(self: &Rc<Self>, attempt: Attempt) {
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
        *self.handlers.borrow_mut() = Some(FrameHandlers {
            _load: load,
            _error: error,
        });
    }

    /// Remove frame handlers and cancel the reveal timer
    fn detach(&self) {
        let frame = &self.elements.frame;
        frame.set_onload(None);
        frame.set_onerror(None);
        self.handlers.borrow_mut().take();
        self.timeout.borrow_mut().take();
    }

    fn release_button(&self) {
        if let Some(button) = self.button.borrow_mut().take() {
            if let Err(e) = set_button_busy(&button, false) {
                tracing::warn!("could not reset preview button: {}", describe(&e));
            }
        }
    }

    /// Redraw every preview element from the current phase
    fn apply(&self) {
        let display = self.state.borrow().display();
        let result = (|| -> Result<(), JsValue> {
            set_visible(&self.elements.modal, display.overlay)?;
            set_visible(&self.elements.loader, display.spinner)?;
            set_visible(&self.elements.frame, display.frame)?;
            if let Some(button) = self.button.borrow().as_ref() {
                set_button_busy(button, display.button_busy)?;
            }
            Ok(())
        })();
        if let Err(e) = result {
            tracing::warn!("could not update preview overlay: {}", describe(&e));
        }
    }
}

/// Feed one frame or timer signal to the overlay behind `weak`.
///
/// Signals that arrive after the outcome is decided change nothing. The
/// winning signal detaches the frame handlers without dropping them, since
/// one of them may be the closure currently running.
fn settle<F>(weak: &Weak<PreviewOverlay>, signal: F)
where
    F: FnOnce(&mut PreviewState) -> bool,
{
    let Some(overlay) = weak.upgrade() else {
        return;
    };
    let settled = signal(&mut *overlay.state.borrow_mut());
    if settled {
        overlay.elements.frame.set_onload(None);
        overlay.elements.frame.set_onerror(None);
        overlay.apply();
    }
}

fn set_button_busy(button: &HtmlElement, busy: bool) -> Result<(), JsValue> {
    if busy {
        button.class_list().add_1(BUTTON_BUSY_CLASS)?;
        button.set_text_content(Some(BUTTON_BUSY_LABEL));
    } else {
        button.class_list().remove_1(BUTTON_BUSY_CLASS)?;
        button.set_text_content(Some(BUTTON_LABEL));
    }
    Ok(())
}
