//! Labels for the interactive region map

use crate::config::MapConfig;
use serde::Serialize;

/// Text and background of the map's name display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDisplay {
    pub text: String,
    pub background: String,
}

impl RegionDisplay {
    /// Shown while no region is hovered
    pub fn idle(config: &MapConfig) -> Self {
        Self {
            text: config.default_label.clone(),
            background: config.default_background.clone(),
        }
    }

    /// Shown while `region` is hovered.
    ///
    /// Returns `None` when neither a title nor an identifier is available, in
    /// which case the display is left as it is.
    pub fn hovered(title: Option<&str>, region: &str, config: &MapConfig) -> Option<Self> {
        let text = region_label(title, region, &config.fallback_suffix)?;
        Some(Self {
            text,
            background: config.hover_background.clone(),
        })
    }
}

/// Descriptive name for a region: its title, or a label derived from its id
pub fn region_label(title: Option<&str>, region: &str, fallback_suffix: &str) -> Option<String> {
    match title {
        Some(title) if !title.is_empty() => Some(title.to_string()),
        _ if !region.is_empty() => Some(fallback_label(region, fallback_suffix)),
        _ => None,
    }
}

/// `north_western` becomes `NORTH WESTERN (Fallback)`
pub fn fallback_label(region: &str, suffix: &str) -> String {
    format!("{}{}", region.replace('_', " ").to_uppercase(), suffix)
}

/// Name used in diagnostics for a region element without an id
pub fn element_name(id: &str, index: usize) -> String {
    if id.is_empty() {
        format!("unnamed_path_{}", index)
    } else {
        id.to_string()
    }
}
