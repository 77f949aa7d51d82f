//! Past-paper catalog logic
//!
//! Everything the browser pages decide, kept free of DOM types so it can be
//! tested natively:
//! - `catalog`: exam loading, cascading dropdowns and the results view
//! - `links`: download, preview and map navigation URLs
//! - `preview`: the load/error/timeout handshake of the preview frame
//! - `region`: hover labels for the region map
//! - `table`: the row filter used by table-style listing pages

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod links;
pub mod paper;
pub mod preview;
pub mod query;
pub mod region;
pub mod render;
pub mod table;

pub use catalog::{Catalog, CatalogStatus, LoadTicket};
pub use config::{CatalogConfig, MapConfig, PreviewConfig, DEFAULT_PREVIEW_TIMEOUT_MS};
pub use error::CatalogError;
pub use filters::{Dropdown, FilterState};
pub use links::{download_url, extract_file_id, navigation_url, preview_url};
pub use paper::{parse_papers, Paper, PaperField, Year};
pub use preview::{Attempt, PreviewDisplay, PreviewPhase, PreviewState};
pub use region::{region_label, RegionDisplay};
pub use render::{render_results, PaperCard, RenderOutcome, ResultsView};
pub use table::{TableColumn, TableSelection, MATCH_ALL};
