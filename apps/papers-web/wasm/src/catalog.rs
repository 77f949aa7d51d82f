//! Catalog page controller
//!
//! Owns the page's elements and a [`Catalog`]. Every DOM event is forwarded
//! to the catalog and the affected parts of the page are redrawn from its
//! state. Fetches run on `spawn_local`; the catalog is never borrowed across
//! an await.

use crate::bindings::{CatalogElements, CatalogPageConfig};
use crate::dom::{describe, document, fill_select, set_visible};
use crate::fetch::fetch_papers;
use crate::overlay::PreviewOverlay;
use papers_core::{Catalog, CatalogError, CatalogStatus, PaperCard, PaperField, ResultsView};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
};

const PREVIEW_BUTTON_CLASS: &str = "preview-btn";

pub struct CatalogPage {
    document: Document,
    exam: HtmlSelectElement,
    subject: HtmlSelectElement,
    year: HtmlSelectElement,
    medium: HtmlSelectElement,
    search: HtmlInputElement,
    results: HtmlElement,
    message: HtmlElement,
    spinner: HtmlElement,
    overlay: Rc<PreviewOverlay>,
    catalog: RefCell<Catalog>,
}

/// Resolve the catalog page's elements and wire its event handlers
pub fn start(config: CatalogPageConfig) -> Result<Rc<CatalogPage>, CatalogError> {
    let document = document()?;
    let CatalogElements {
        exam,
        subject,
        year,
        medium,
        search,
        results,
        message,
        spinner,
        overlay,
    } = config.elements.resolve(&document)?;

    let setup = |e: JsValue| CatalogError::Setup(describe(&e));
    let overlay = PreviewOverlay::attach(overlay, config.catalog.clone(), config.preview)
        .map_err(setup)?;

    let page = Rc::new(CatalogPage {
        document,
        exam,
        subject,
        year,
        medium,
        search,
        results,
        message,
        spinner,
        overlay,
        catalog: RefCell::new(Catalog::new(config.catalog)),
    });

    page.wire().map_err(setup)?;
    page.sync_dropdowns();
    page.render();
    tracing::info!("catalog page ready");
    Ok(page)
}

impl CatalogPage {
    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        let page = Rc::clone(self);
        listen(&self.exam, "change", move |_| page.on_exam_change())?;

        for field in PaperField::ALL {
            let page = Rc::clone(self);
            listen(self.select_for(field), "change", move |_| page.on_filter_change(field))?;
        }

        let page = Rc::clone(self);
        listen(&self.search, "keyup", move |_| page.on_search())?;

        // One delegated listener serves every card the results area ever holds
        let page = Rc::clone(self);
        listen(&self.results, "click", move |event| page.on_results_click(&event))?;
        Ok(())
    }

    fn select_for(&self, field: PaperField) -> &HtmlSelectElement {
        match field {
            PaperField::Subject => &self.subject,
            PaperField::Year => &self.year,
            PaperField::Medium => &self.medium,
        }
    }

    fn on_exam_change(self: &Rc<Self>) {
        let exam = self.exam.value();
        let ticket = self.catalog.borrow_mut().begin_load(&exam);
        self.sync_dropdowns();
        self.results.set_inner_html("");

        let Some(ticket) = ticket else {
            self.show_message(&self.catalog.borrow().config().select_exam_message);
            self.show_spinner(false);
            return;
        };

        self.hide_message();
        self.show_spinner(true);

        let page = Rc::clone(self);
        spawn_local(async move {
            let fetched = fetch_papers(&ticket).await;
            let current = match fetched {
                Ok(papers) => page.catalog.borrow_mut().complete_load(&ticket, papers),
                Err(e) => page.catalog.borrow_mut().fail_load(&ticket, &e),
            };
            if !current {
                return;
            }
            page.show_spinner(false);
            page.sync_dropdowns();
            page.render();
        });
    }

    fn on_filter_change(&self, field: PaperField) {
        let value = self.select_for(field).value();
        if !self.catalog.borrow_mut().select(field, &value) {
            tracing::debug!(field = field.as_str(), value = %value, "ignoring pick without parent");
        }
        self.sync_dropdowns();
        self.render();
    }

    fn on_search(&self) {
        self.catalog.borrow_mut().set_search(&self.search.value());
        self.render();
    }

    fn on_results_click(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let button = match target.closest(&format!(".{}", PREVIEW_BUTTON_CLASS)) {
            Ok(Some(button)) => button,
            _ => return,
        };
        let Some(link) = button.get_attribute("data-link") else {
            return;
        };
        self.overlay.open(&link, button.dyn_into::<HtmlElement>().ok());
    }

    /// Redraw the three dependent selectors from the catalog's dropdowns
    fn sync_dropdowns(&self) {
        let catalog = self.catalog.borrow();
        let config = catalog.config();
        for field in PaperField::ALL {
            let placeholder = match field {
                PaperField::Subject => &config.subject_placeholder,
                PaperField::Year => &config.year_placeholder,
                PaperField::Medium => &config.medium_placeholder,
            };
            let select = self.select_for(field);
            if let Err(e) = fill_select(&self.document, select, placeholder, catalog.dropdown(field)) {
                tracing::warn!(field = field.as_str(), "could not fill selector: {}", describe(&e));
            }
        }
    }

    fn render(&self) {
        let (outcome, status, config) = {
            let catalog = self.catalog.borrow();
            (catalog.results(), catalog.status().clone(), catalog.config().clone())
        };
        self.results.set_inner_html("");

        let drawn = match outcome.view {
            ResultsView::SelectExam => {
                match status {
                    CatalogStatus::Loading => self.hide_message(),
                    CatalogStatus::Failed(message) => self.show_message(&message),
                    _ => self.show_message(&config.select_exam_message),
                }
                Ok(())
            }
            ResultsView::NoResults => {
                self.hide_message();
                self.append_text("p", &config.no_results_message, &self.results)
                    .map(|_| ())
            }
            ResultsView::Cards(cards) => {
                self.hide_message();
                cards.iter().try_for_each(|card| self.append_card(card))
            }
        };
        if let Err(e) = drawn {
            tracing::error!("could not render results: {}", describe(&e));
        }
    }

    fn append_card(&self, card: &PaperCard) -> Result<(), JsValue> {
        let item = self.document.create_element("div")?;
        item.set_class_name("paper-item");

        let details = self.document.create_element("div")?;
        self.append_text("h3", &card.file_name, &details)?;
        self.append_field("Subject", &card.subject, &details)?;
        self.append_field("Year", &card.year, &details)?;
        self.append_field("Medium", &card.medium, &details)?;
        item.append_child(&details)?;

        let actions = self.document.create_element("div")?;
        actions.set_class_name("button-group");
        let preview = self.append_text("button", "Preview", &actions)?;
        preview.set_class_name(PREVIEW_BUTTON_CLASS);
        preview.set_attribute("data-link", &card.source_link)?;

        if let Some(url) = &card.download_url {
            let download: HtmlAnchorElement = self.document.create_element("a")?.dyn_into()?;
            download.set_href(url);
            download.set_class_name("download-btn");
            download.set_target("_blank");
            download.set_download("");
            download.set_text_content(Some("Download"));
            actions.append_child(&download)?;
        }
        item.append_child(&actions)?;

        self.results.append_child(&item)?;
        Ok(())
    }

    /// `<p><strong>Label:</strong> value</p>`
    fn append_field(&self, label: &str, value: &str, parent: &Element) -> Result<(), JsValue> {
        let line = self.document.create_element("p")?;
        self.append_text("strong", &format!("{}:", label), &line)?;
        line.append_child(&self.document.create_text_node(&format!(" {}", value)))?;
        parent.append_child(&line)?;
        Ok(())
    }

    fn append_text(&self, tag: &str, text: &str, parent: &Element) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.append_child(&self.document.create_text_node(text))?;
        parent.append_child(&element)?;
        Ok(element)
    }

    fn show_message(&self, text: &str) {
        self.message.set_text_content(Some(text));
        self.toggle(&self.message, true);
    }

    fn hide_message(&self) {
        self.toggle(&self.message, false);
    }

    fn show_spinner(&self, visible: bool) {
        self.toggle(&self.spinner, visible);
    }

    fn toggle(&self, element: &HtmlElement, visible: bool) {
        if let Err(e) = set_visible(element, visible) {
            tracing::warn!("could not toggle element: {}", describe(&e));
        }
    }
}

fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
