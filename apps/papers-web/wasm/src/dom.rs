//! Small DOM helpers shared by the page controllers

use papers_core::{CatalogError, Dropdown};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlOptionElement, HtmlSelectElement};

pub fn window() -> Result<web_sys::Window, CatalogError> {
    web_sys::window().ok_or_else(|| CatalogError::Setup("No window object available".to_string()))
}

pub fn document() -> Result<Document, CatalogError> {
    window()?
        .document()
        .ok_or_else(|| CatalogError::Setup("No document object available".to_string()))
}

/// Look up `#id` and cast it to the expected element type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, CatalogError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| CatalogError::missing_element(&format!("#{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| CatalogError::Setup(format!("element '#{}' has an unexpected type", id)))
}

/// Like [`by_id`] but absence is not an error
pub fn optional_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// First element matching `selector`
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T, CatalogError> {
    document
        .query_selector(selector)
        .map_err(|e| CatalogError::Setup(format!("invalid selector '{}': {}", selector, describe(&e))))?
        .ok_or_else(|| CatalogError::missing_element(selector))?
        .dyn_into::<T>()
        .map_err(|_| CatalogError::Setup(format!("element '{}' has an unexpected type", selector)))
}

/// All elements under `root` matching `selector`
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, CatalogError> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| CatalogError::Setup(format!("invalid selector '{}': {}", selector, describe(&e))))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn set_visible(element: &HtmlElement, visible: bool) -> Result<(), JsValue> {
    element
        .style()
        .set_property("display", if visible { "block" } else { "none" })
}

/// Rebuild a `<select>` from a dropdown model, keeping `placeholder` as the
/// empty first option
pub fn fill_select(
    document: &Document,
    select: &HtmlSelectElement,
    placeholder: &str,
    dropdown: &Dropdown,
) -> Result<(), JsValue> {
    select.set_inner_html("");
    let blank = HtmlOptionElement::new_with_text_and_value(placeholder, "")?;
    select.append_child(&blank)?;

    for value in &dropdown.options {
        let option: HtmlOptionElement = document.create_element("option")?.dyn_into()?;
        option.set_value(value);
        option.set_text(value);
        select.append_child(&option)?;
    }

    select.set_value(dropdown.selected.as_deref().unwrap_or(""));
    select.set_disabled(!dropdown.enabled);
    Ok(())
}

/// Read an optional configuration object passed from JavaScript.
/// `undefined` and `null` select the defaults.
pub fn config_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, CatalogError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| CatalogError::Setup(format!("invalid configuration: {}", e)))
}

/// Best-effort text for a thrown JavaScript value
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn to_js(error: CatalogError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_by_id_reports_missing_element() {
        let doc = document().unwrap();
        let err = by_id::<HtmlElement>(&doc, "definitely-not-here").unwrap_err();
        assert!(err.to_string().contains("#definitely-not-here"));
    }

    #[wasm_bindgen_test]
    fn test_fill_select_keeps_placeholder_and_selection() {
        let doc = document().unwrap();
        let select: HtmlSelectElement = doc.create_element("select").unwrap().dyn_into().unwrap();
        let dropdown = Dropdown {
            options: vec!["2021".into(), "2019".into()],
            selected: Some("2019".into()),
            enabled: true,
        };
        fill_select(&doc, &select, "-- Select Year --", &dropdown).unwrap();
        assert_eq!(select.length(), 3);
        assert_eq!(select.value(), "2019");
        assert!(!select.disabled());

        fill_select(&doc, &select, "-- Select Year --", &Dropdown::default()).unwrap();
        assert_eq!(select.length(), 1);
        assert_eq!(select.value(), "");
        assert!(select.disabled());
    }

    #[wasm_bindgen_test]
    fn test_config_from_js_defaults_on_undefined() {
        let config: papers_core::MapConfig = config_from_js(JsValue::UNDEFINED).unwrap();
        assert_eq!(config, papers_core::MapConfig::default());
    }
}
