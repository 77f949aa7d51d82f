//! Result card models

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::filters::FilterState;
use crate::links::download_url;
use crate::paper::Paper;
use crate::query::filter_papers;
use serde::Serialize;

/// Everything a result card displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperCard {
    pub file_name: String,
    pub subject: String,
    pub year: String,
    pub medium: String,
    /// Raw sharing link; the Preview action works from this
    pub source_link: String,
    /// Present only when a file id could be parsed from the link
    pub download_url: Option<String>,
}

impl PaperCard {
    fn build(paper: &Paper, config: &CatalogConfig) -> (Self, Option<CatalogError>) {
        let (download_url, warning) = match download_url(&paper.drive_link, config) {
            Ok(url) => (Some(url), None),
            Err(e) => (None, Some(e)),
        };
        let card = Self {
            file_name: paper.file_name.clone(),
            subject: paper.subject.clone(),
            year: paper.year.to_string(),
            medium: paper.medium.clone(),
            source_link: paper.drive_link.clone(),
            download_url,
        };
        (card, warning)
    }
}

/// What the results area shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cards")]
pub enum ResultsView {
    /// Nothing is loaded yet
    SelectExam,
    /// Papers are loaded but none match
    NoResults,
    Cards(Vec<PaperCard>),
}

impl ResultsView {
    pub fn cards(&self) -> &[PaperCard] {
        match self {
            ResultsView::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// A rendered view plus the link problems hit while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub view: ResultsView,
    pub warnings: Vec<CatalogError>,
}

/// Build the results view for the loaded collection.
///
/// Link problems degrade only the affected card and are logged once each.
pub fn render_results(
    papers: &[Paper],
    filters: &FilterState,
    search: &str,
    config: &CatalogConfig,
) -> RenderOutcome {
    if papers.is_empty() {
        return RenderOutcome {
            view: ResultsView::SelectExam,
            warnings: Vec::new(),
        };
    }

    let matching = filter_papers(papers, filters, search);
    if matching.is_empty() {
        return RenderOutcome {
            view: ResultsView::NoResults,
            warnings: Vec::new(),
        };
    }

    let mut warnings = Vec::new();
    let cards = matching
        .into_iter()
        .map(|paper| {
            let (card, warning) = PaperCard::build(paper, config);
            if let Some(warning) = warning {
                tracing::warn!(link = %paper.drive_link, "{}", warning);
                warnings.push(warning);
            }
            card
        })
        .collect();

    RenderOutcome {
        view: ResultsView::Cards(cards),
        warnings,
    }
}
