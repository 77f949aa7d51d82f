//! Element bindings for each page
//!
//! Pages name their elements through these configs; the defaults match the
//! stock HTML. Each config resolves to a struct of typed element handles in
//! one step, failing with the name of the first element it cannot find.

use crate::dom::{by_id, optional_by_id, query, query_all};
use papers_core::{CatalogConfig, CatalogError, MapConfig, PreviewConfig, DEFAULT_PREVIEW_TIMEOUT_MS};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlIFrameElement, HtmlInputElement, HtmlSelectElement,
};

/// Element ids of the catalog page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogBindings {
    pub exam: String,
    pub subject: String,
    pub year: String,
    pub medium: String,
    pub search: String,
    pub results: String,
    pub message: String,
    pub spinner: String,
    pub modal: String,
    pub frame: String,
    pub frame_loader: String,
    /// CSS selector of the overlay's close control
    pub close_button: String,
}

impl Default for CatalogBindings {
    fn default() -> Self {
        Self {
            exam: "filter-exam".to_string(),
            subject: "filter-subject".to_string(),
            year: "filter-year".to_string(),
            medium: "filter-medium".to_string(),
            search: "search-bar".to_string(),
            results: "results-container".to_string(),
            message: "results-message".to_string(),
            spinner: "loading-spinner".to_string(),
            modal: "pdf-modal".to_string(),
            frame: "pdf-iframe".to_string(),
            frame_loader: "pdf-loader".to_string(),
            close_button: ".close-button".to_string(),
        }
    }
}

pub struct CatalogElements {
    pub exam: HtmlSelectElement,
    pub subject: HtmlSelectElement,
    pub year: HtmlSelectElement,
    pub medium: HtmlSelectElement,
    pub search: HtmlInputElement,
    pub results: HtmlElement,
    pub message: HtmlElement,
    pub spinner: HtmlElement,
    pub overlay: OverlayElements,
}

pub struct OverlayElements {
    pub modal: HtmlElement,
    pub frame: HtmlIFrameElement,
    pub loader: HtmlElement,
    pub close_button: HtmlElement,
}

impl CatalogBindings {
    pub fn resolve(&self, document: &Document) -> Result<CatalogElements, CatalogError> {
        Ok(CatalogElements {
            exam: by_id(document, &self.exam)?,
            subject: by_id(document, &self.subject)?,
            year: by_id(document, &self.year)?,
            medium: by_id(document, &self.medium)?,
            search: by_id(document, &self.search)?,
            results: by_id(document, &self.results)?,
            message: by_id(document, &self.message)?,
            spinner: by_id(document, &self.spinner)?,
            overlay: OverlayElements {
                modal: by_id(document, &self.modal)?,
                frame: by_id(document, &self.frame)?,
                loader: by_id(document, &self.frame_loader)?,
                close_button: query(document, &self.close_button)?,
            },
        })
    }
}

/// Full configuration accepted by `startCatalog`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogPageConfig {
    pub elements: CatalogBindings,
    pub catalog: CatalogConfig,
    pub preview: PreviewConfig,
}

/// Element ids of the region map page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapBindings {
    pub map: String,
    pub display: String,
    /// Attribute carrying a region's identifier
    pub region_attribute: String,
}

impl Default for MapBindings {
    fn default() -> Self {
        Self {
            map: "sri-lanka-map".to_string(),
            display: "province-name-display".to_string(),
            region_attribute: "data-province".to_string(),
        }
    }
}

pub struct MapElements {
    pub display: HtmlElement,
    pub regions: Vec<Element>,
}

impl MapBindings {
    pub fn resolve(&self, document: &Document) -> Result<MapElements, CatalogError> {
        let map: Element = by_id(document, &self.map)?;
        let display = by_id(document, &self.display)?;
        let regions = query_all(&map, &format!("path[{}]", self.region_attribute))?;
        Ok(MapElements { display, regions })
    }
}

/// Full configuration accepted by `startMap`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapPageConfig {
    pub elements: MapBindings,
    pub map: MapConfig,
}

/// Element ids of the standalone preview page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewFrameBindings {
    pub frame: String,
    pub spinner: String,
    pub wrapper: String,
    /// Class that keeps the wrapper hidden until the frame is ready
    pub hidden_class: String,
}

impl Default for PreviewFrameBindings {
    fn default() -> Self {
        Self {
            frame: "pdf-iframe".to_string(),
            spinner: "pdf-spinner-container".to_string(),
            wrapper: "pdf-wrapper".to_string(),
            hidden_class: "pdf-hidden".to_string(),
        }
    }
}

/// Absent frame means the page has no preview to manage
pub struct PreviewFrameElements {
    pub frame: HtmlIFrameElement,
    pub spinner: Option<HtmlElement>,
    pub wrapper: Option<HtmlElement>,
}

impl PreviewFrameBindings {
    pub fn resolve(&self, document: &Document) -> Option<PreviewFrameElements> {
        Some(PreviewFrameElements {
            frame: optional_by_id(document, &self.frame)?,
            spinner: optional_by_id(document, &self.spinner),
            wrapper: optional_by_id(document, &self.wrapper),
        })
    }
}

/// Full configuration accepted by `startPreviewFrame`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewFramePageConfig {
    pub elements: PreviewFrameBindings,
    pub preview: PreviewConfig,
}

impl Default for PreviewFramePageConfig {
    fn default() -> Self {
        Self {
            elements: PreviewFrameBindings::default(),
            preview: PreviewConfig::with_timeout(DEFAULT_PREVIEW_TIMEOUT_MS),
        }
    }
}

/// Element ids of the table listing page. Every element is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableBindings {
    pub year: String,
    pub term: String,
    pub province: String,
    pub reset: String,
    /// CSS selector of the filtered rows
    pub rows: String,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            year: "filter-year".to_string(),
            term: "filter-term".to_string(),
            province: "filter-province".to_string(),
            reset: "reset-filters".to_string(),
            rows: "#papers-table tbody tr".to_string(),
        }
    }
}

pub struct TableElements {
    pub year: Option<HtmlSelectElement>,
    pub term: Option<HtmlSelectElement>,
    pub province: Option<HtmlSelectElement>,
    pub reset: Option<HtmlElement>,
    pub rows: Vec<HtmlElement>,
}

impl TableBindings {
    pub fn resolve(&self, document: &Document) -> Result<TableElements, CatalogError> {
        let rows = match document.document_element() {
            Some(root) => query_all(&root, &self.rows)?,
            None => Vec::new(),
        };
        Ok(TableElements {
            year: optional_by_id(document, &self.year),
            term: optional_by_id(document, &self.term),
            province: optional_by_id(document, &self.province),
            reset: optional_by_id(document, &self.reset),
            rows: rows
                .into_iter()
                .filter_map(|row| row.dyn_into::<HtmlElement>().ok())
                .collect(),
        })
    }
}
