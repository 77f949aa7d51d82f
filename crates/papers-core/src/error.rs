use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to load {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },

    #[error("Could not parse file ID for download link: {0}")]
    LinkParse(String),

    #[error("Failed to load PDF in frame: {0}")]
    FrameLoad(String),

    #[error("Setup failed: {0}")]
    Setup(String),
}

impl CatalogError {
    pub fn resource_load(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_element(selector: &str) -> Self {
        Self::Setup(format!("required element '{}' not found", selector))
    }
}
