//! Fetch an exam's paper list

use crate::dom::{describe, window};
use papers_core::config::exam_file_name;
use papers_core::{parse_papers, CatalogError, LoadTicket, Paper};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// GET the ticket's URL and parse the body as a paper list.
///
/// Network failures, non-2xx statuses and malformed JSON all come back as
/// `ResourceLoad` naming the exam's file.
pub async fn fetch_papers(ticket: &LoadTicket) -> Result<Vec<Paper>, CatalogError> {
    let file = exam_file_name(&ticket.exam);
    let fail = |reason: String| CatalogError::resource_load(file.clone(), reason);

    let opts = RequestInit::new();
    opts.set_method("GET");
    let request = Request::new_with_str_and_init(&ticket.url, &opts)
        .map_err(|e| fail(describe(&e)))?;

    let response = JsFuture::from(window()?.fetch_with_request(&request))
        .await
        .map_err(|e| fail(describe(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| fail("fetch did not return a Response".to_string()))?;

    if !response.ok() {
        return Err(fail(format!(
            "File not found: {} (Status: {})",
            file,
            response.status()
        )));
    }

    let body = JsFuture::from(response.text().map_err(|e| fail(describe(&e)))?)
        .await
        .map_err(|e| fail(describe(&e)))?;
    let body = body
        .as_string()
        .ok_or_else(|| fail("response body is not text".to_string()))?;

    parse_papers(&body).map_err(|e| fail(e.to_string()))
}
