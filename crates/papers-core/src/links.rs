//! URL derivation for hosted paper files and map navigation

use crate::config::{CatalogConfig, MapConfig};
use crate::error::CatalogError;

/// Extract the hosted file id from a sharing link.
///
/// Sharing links look like `https://drive.google.com/file/d/<id>/view?usp=sharing`;
/// the id is the `/`-separated segment at `segment`.
pub fn extract_file_id(link: &str, segment: usize) -> Result<String, CatalogError> {
    match link.split('/').nth(segment) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CatalogError::LinkParse(link.to_string())),
    }
}

/// Direct download URL for a sharing link
pub fn download_url(link: &str, config: &CatalogConfig) -> Result<String, CatalogError> {
    let id = extract_file_id(link, config.file_id_segment)?;
    Ok(format!("{}{}", config.download_base, id))
}

/// Embeddable preview URL for a sharing link.
///
/// Links without the viewer suffix are returned unchanged.
pub fn preview_url(link: &str, config: &CatalogConfig) -> String {
    link.replacen(&config.viewer_suffix, &config.preview_suffix, 1)
}

/// URL a region click navigates to
pub fn navigation_url(region: &str, config: &MapConfig) -> String {
    format!(
        "{}?{}={}",
        config.target_page,
        config.query_key,
        urlencoding::encode(region)
    )
}
