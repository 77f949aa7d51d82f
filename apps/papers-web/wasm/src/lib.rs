//! WASM front end for the past-paper browser
//!
//! Each page of the site calls one `start*` function after the module is
//! initialised. All state lives in Rust; JavaScript only passes an optional
//! configuration object naming the page's elements.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { startCatalog, startMap } from './pkg/papers_wasm.js';
//!
//! await init();
//!
//! // Catalog page with the stock element ids
//! startCatalog();
//!
//! // Map page served next to a differently named catalog page
//! startMap({ map: { target_page: 'papers.html' } });
//! ```

pub mod bindings;
pub mod catalog;
pub mod dom;
pub mod fetch;
pub mod logging;
pub mod map;
pub mod overlay;
pub mod preview_frame;
pub mod table_filter;

use dom::{config_from_js, to_js};
use papers_core::{CatalogConfig, CatalogError, MapConfig};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init_logging(tracing::Level::INFO);
}

/// Log a setup failure and hand it to the caller
fn report(page: &str, error: CatalogError) -> JsValue {
    tracing::error!(page, "{}", error);
    to_js(error)
}

/// Wire the catalog page: exam loading, cascading filters, search and the
/// preview overlay
#[wasm_bindgen(js_name = startCatalog)]
pub fn start_catalog(config: JsValue) -> Result<(), JsValue> {
    config_from_js(config)
        .and_then(catalog::start)
        .map(|_| ())
        .map_err(|e| report("catalog", e))
}

/// Wire the region map
#[wasm_bindgen(js_name = startMap)]
pub fn start_map(config: JsValue) -> Result<(), JsValue> {
    config_from_js(config)
        .and_then(map::start)
        .map(|_| ())
        .map_err(|e| report("map", e))
}

/// Wire a page that embeds a single PDF frame
#[wasm_bindgen(js_name = startPreviewFrame)]
pub fn start_preview_frame(config: JsValue) -> Result<(), JsValue> {
    let frame = config_from_js(config)
        .and_then(preview_frame::start)
        .map_err(|e| report("preview frame", e))?;
    // Its event handlers only hold weak references; it lives as long as the page
    std::mem::forget(frame);
    Ok(())
}

/// Wire the year/term/province filter of a papers table
#[wasm_bindgen(js_name = startTableFilter)]
pub fn start_table_filter(config: JsValue) -> Result<(), JsValue> {
    config_from_js(config)
        .and_then(table_filter::start)
        .map(|_| ())
        .map_err(|e| report("table filter", e))
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// File id embedded in a sharing link
#[wasm_bindgen(js_name = extractFileId)]
pub fn extract_file_id(link: &str) -> Result<String, JsValue> {
    let config = CatalogConfig::default();
    papers_core::extract_file_id(link, config.file_id_segment).map_err(to_js)
}

/// Direct download URL for a sharing link
#[wasm_bindgen(js_name = downloadUrl)]
pub fn download_url(link: &str) -> Result<String, JsValue> {
    papers_core::download_url(link, &CatalogConfig::default()).map_err(to_js)
}

/// Embeddable preview URL for a sharing link
#[wasm_bindgen(js_name = previewUrl)]
pub fn preview_url(link: &str) -> String {
    papers_core::preview_url(link, &CatalogConfig::default())
}

/// Hover label for a map region
#[wasm_bindgen(js_name = regionLabel)]
pub fn region_label(title: Option<String>, region: &str) -> Option<String> {
    papers_core::region_label(
        title.as_deref(),
        region,
        &MapConfig::default().fallback_suffix,
    )
}


#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_file_id_errors_cross_boundary_as_strings() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/ID123/view?usp=sharing").unwrap(),
            "ID123"
        );
        let err = extract_file_id("https://short.link/x").unwrap_err();
        assert!(err.as_string().is_some());
    }

    #[wasm_bindgen_test]
    fn test_start_catalog_reports_missing_elements() {
        let err = start_catalog(JsValue::UNDEFINED).unwrap_err();
        assert!(err.as_string().unwrap().contains("filter-exam"));
    }
}
