//! Page configuration
//!
//! Every value has a default matching the published site, so pages that pass
//! no configuration behave exactly like the stock build. All structs
//! deserialize from partial objects.

use serde::{Deserialize, Serialize};

/// Default reveal timeout for the standalone preview page
pub const DEFAULT_PREVIEW_TIMEOUT_MS: u32 = 8_000;

/// Settings for the catalog page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory the per-exam JSON files are served from
    pub data_dir: String,
    /// Download endpoint; the file id is appended
    pub download_base: String,
    /// Suffix of a sharing link that opens the hosted viewer
    pub viewer_suffix: String,
    /// Replacement suffix that yields an embeddable preview
    pub preview_suffix: String,
    /// Position of the file id among the `/`-separated link segments
    pub file_id_segment: usize,
    pub select_exam_message: String,
    pub no_results_message: String,
    pub subject_placeholder: String,
    pub year_placeholder: String,
    pub medium_placeholder: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            download_base: "https://drive.google.com/uc?export=download&id=".to_string(),
            viewer_suffix: "/view?usp=sharing".to_string(),
            preview_suffix: "/preview".to_string(),
            file_id_segment: 5,
            select_exam_message: "Please select an exam to load papers.".to_string(),
            no_results_message: "No papers found matching your criteria.".to_string(),
            subject_placeholder: "-- Select Subject --".to_string(),
            year_placeholder: "-- Select Year --".to_string(),
            medium_placeholder: "-- Select Medium --".to_string(),
        }
    }
}

impl CatalogConfig {
    /// URL of the paper list for an exam
    pub fn exam_data_url(&self, exam: &str) -> String {
        format!("{}/{}", self.data_dir.trim_end_matches('/'), exam_file_name(exam))
    }

    /// Message shown when an exam's paper list cannot be loaded
    pub fn load_error_message(&self, exam: &str) -> String {
        format!(
            "Error: Could not load papers for this exam. (File '{}' might be missing).",
            exam_file_name(exam)
        )
    }
}

/// File name of an exam's paper list
pub fn exam_file_name(exam: &str) -> String {
    format!("{}.json", exam)
}

/// Settings for the region map page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Page a region click navigates to
    pub target_page: String,
    /// Query parameter carrying the region identifier
    pub query_key: String,
    pub default_label: String,
    pub default_background: String,
    pub hover_background: String,
    pub fallback_suffix: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            target_page: "index.html".to_string(),
            query_key: "province".to_string(),
            default_label: "Hover over a province".to_string(),
            default_background: "var(--primary-color)".to_string(),
            hover_background: "#0080ff".to_string(),
            fallback_suffix: " (Fallback)".to_string(),
        }
    }
}

/// Settings for the PDF preview frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PreviewConfig {
    /// Reveal the frame after this many milliseconds even if it never
    /// reports load or error. `None` waits indefinitely.
    pub timeout_ms: Option<u32>,
}

impl PreviewConfig {
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self {
            timeout_ms: Some(timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exam_data_url() {
        let config = CatalogConfig::default();
        assert_eq!(config.exam_data_url("al-2020"), "./data/al-2020.json");

        let config = CatalogConfig {
            data_dir: "/static/data/".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.exam_data_url("ol"), "/static/data/ol.json");
    }

    #[test]
    fn test_load_error_message_names_file() {
        let msg = CatalogConfig::default().load_error_message("grade5");
        assert!(msg.contains("'grade5.json'"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: CatalogConfig = serde_json::from_str(r#"{"data_dir":"papers"}"#).unwrap();
        assert_eq!(config.data_dir, "papers");
        assert_eq!(config.file_id_segment, 5);
        assert_eq!(config.preview_suffix, "/preview");

        let map: MapConfig = serde_json::from_str(r#"{"target_page":"papers.html"}"#).unwrap();
        assert_eq!(map.target_page, "papers.html");
        assert_eq!(map.query_key, "province");
    }

    #[test]
    fn test_preview_config_defaults_to_no_timeout() {
        assert_eq!(PreviewConfig::default().timeout_ms, None);
        assert_eq!(
            PreviewConfig::with_timeout(DEFAULT_PREVIEW_TIMEOUT_MS).timeout_ms,
            Some(8_000)
        );
    }
}
