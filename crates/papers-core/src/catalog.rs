//! Catalog page state
//!
//! Holds the paper collection for the selected exam, the cascading filter
//! selections, the three dependent dropdowns and the search term. The DOM
//! layer forwards events here and redraws from the resulting state.
//!
//! Loads are tagged with a [`LoadTicket`]. Picking another exam while a
//! fetch is in flight issues a new ticket, and the older response is
//! dropped when it arrives.

use crate::config::{exam_file_name, CatalogConfig};
use crate::error::CatalogError;
use crate::filters::{medium_options, subject_options, year_options, Dropdown, FilterState};
use crate::paper::{Paper, PaperField};
use crate::render::{render_results, RenderOutcome};

/// Identifies one exam fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    pub exam: String,
    pub url: String,
}

/// Load lifecycle of the selected exam
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// No exam selected
    Idle,
    Loading,
    Ready,
    /// Fetch or parse failed; carries the user-facing message
    Failed(String),
}

impl CatalogStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogStatus::Loading)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    config: CatalogConfig,
    papers: Vec<Paper>,
    filters: FilterState,
    search: String,
    subject: Dropdown,
    year: Dropdown,
    medium: Dropdown,
    status: CatalogStatus,
    load_token: u64,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            papers: Vec::new(),
            filters: FilterState::default(),
            search: String::new(),
            subject: Dropdown::default(),
            year: Dropdown::default(),
            medium: Dropdown::default(),
            status: CatalogStatus::Idle,
            load_token: 0,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn dropdown(&self, field: PaperField) -> &Dropdown {
        match field {
            PaperField::Subject => &self.subject,
            PaperField::Year => &self.year,
            PaperField::Medium => &self.medium,
        }
    }

    /// Handle a change of the exam selector.
    ///
    /// Clears the collection, the filters and all dependent dropdowns. Returns
    /// the fetch to issue, or `None` when the placeholder was selected.
    pub fn begin_load(&mut self, exam: &str) -> Option<LoadTicket> {
        self.papers.clear();
        self.filters.clear();
        self.subject.reset();
        self.year.reset();
        self.medium.reset();
        self.load_token += 1;

        if exam.is_empty() {
            self.status = CatalogStatus::Idle;
            return None;
        }

        self.status = CatalogStatus::Loading;
        tracing::debug!(exam, token = self.load_token, "loading exam papers");
        Some(LoadTicket {
            token: self.load_token,
            exam: exam.to_string(),
            url: self.config.exam_data_url(exam),
        })
    }

    /// Whether `ticket` belongs to the most recent exam selection
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.token == self.load_token
    }

    /// Install a fetched collection. Returns `false` for a stale ticket,
    /// leaving the state untouched.
    pub fn complete_load(&mut self, ticket: &LoadTicket, papers: Vec<Paper>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(exam = %ticket.exam, "dropping stale paper list");
            return false;
        }
        tracing::info!(exam = %ticket.exam, count = papers.len(), "loaded papers");
        self.subject.populate(subject_options(&papers), None);
        self.papers = papers;
        self.status = CatalogStatus::Ready;
        true
    }

    /// Record a failed fetch. Returns `false` for a stale ticket.
    pub fn fail_load(&mut self, ticket: &LoadTicket, error: &CatalogError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        tracing::error!(file = %exam_file_name(&ticket.exam), "Failed to load papers: {}", error);
        self.papers.clear();
        self.status = CatalogStatus::Failed(self.config.load_error_message(&ticket.exam));
        true
    }

    /// Handle a change of the subject, year or medium selector.
    ///
    /// Returns `false` if the pick was refused because a parent level is
    /// unset.
    pub fn select(&mut self, field: PaperField, value: &str) -> bool {
        if !self.filters.select(field, value) {
            return false;
        }

        if field == PaperField::Subject {
            self.subject.selected = self.filters.subject.clone();
            self.medium.reset();
        }

        match self.filters.subject.as_deref() {
            Some(subject) => {
                let options = year_options(&self.papers, subject);
                self.year.populate(options, self.filters.year.as_deref());
            }
            None => self.year.reset(),
        }

        match (self.filters.subject.as_deref(), self.filters.year.as_deref()) {
            (Some(subject), Some(year)) => {
                let options = medium_options(&self.papers, subject, year);
                self.medium.populate(options, self.filters.medium.as_deref());
            }
            _ => self.medium.reset(),
        }

        // Keep the filters aligned with what the dropdowns can show
        self.filters.year = self.year.selected.clone();
        self.filters.medium = self.medium.selected.clone();
        true
    }

    pub fn select_subject(&mut self, value: &str) -> bool {
        self.select(PaperField::Subject, value)
    }

    pub fn select_year(&mut self, value: &str) -> bool {
        self.select(PaperField::Year, value)
    }

    pub fn select_medium(&mut self, value: &str) -> bool {
        self.select(PaperField::Medium, value)
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Current results view
    pub fn results(&self) -> RenderOutcome {
        render_results(&self.papers, &self.filters, &self.search, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::Year;
    use crate::render::ResultsView;
    use pretty_assertions::assert_eq;

    fn paper(subject: &str, year: i64, medium: &str) -> Paper {
        Paper {
            file_name: format!("{} {} {}", subject, year, medium),
            subject: subject.to_string(),
            year: Year::from(year),
            medium: medium.to_string(),
            drive_link: format!("https://drive.google.com/file/d/{}{}/view?usp=sharing", subject, year),
        }
    }

    fn loaded() -> Catalog {
        let mut catalog = Catalog::new(CatalogConfig::default());
        let ticket = catalog.begin_load("ol").unwrap();
        assert!(catalog.complete_load(
            &ticket,
            vec![
                paper("Math", 2019, "English"),
                paper("Math", 2021, "Sinhala"),
                paper("Math", 2021, "English"),
                paper("Physics", 2020, "Tamil"),
            ],
        ));
        catalog
    }

    #[test]
    fn test_begin_load_builds_url() {
        let mut catalog = Catalog::new(CatalogConfig::default());
        let ticket = catalog.begin_load("al").unwrap();
        assert_eq!(ticket.url, "./data/al.json");
        assert_eq!(ticket.exam, "al");
        assert!(catalog.status().is_loading());
    }

    #[test]
    fn test_empty_exam_issues_no_fetch() {
        let mut catalog = loaded();
        assert!(catalog.begin_load("").is_none());
        assert_eq!(catalog.status(), &CatalogStatus::Idle);
        assert!(catalog.papers().is_empty());
        assert!(!catalog.dropdown(PaperField::Subject).enabled);
        assert_eq!(catalog.results().view, ResultsView::SelectExam);
    }

    #[test]
    fn test_complete_load_enables_subjects_and_shows_all() {
        let catalog = loaded();
        let subject = catalog.dropdown(PaperField::Subject);
        assert!(subject.enabled);
        assert_eq!(subject.options, vec!["Math", "Physics"]);
        assert!(!catalog.dropdown(PaperField::Year).enabled);
        assert!(!catalog.dropdown(PaperField::Medium).enabled);
        assert_eq!(catalog.results().view.cards().len(), 4);
        assert_eq!(catalog.status(), &CatalogStatus::Ready);
    }

    #[test]
    fn test_fail_load_reports_file() {
        let mut catalog = Catalog::new(CatalogConfig::default());
        let ticket = catalog.begin_load("grade5").unwrap();
        let err = CatalogError::resource_load("grade5.json", "Status: 404");
        assert!(catalog.fail_load(&ticket, &err));
        match catalog.status() {
            CatalogStatus::Failed(msg) => assert!(msg.contains("grade5.json")),
            other => panic!("unexpected status {:?}", other),
        }
        assert!(catalog.papers().is_empty());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut catalog = Catalog::new(CatalogConfig::default());
        let first = catalog.begin_load("ol").unwrap();
        let second = catalog.begin_load("al").unwrap();

        assert!(!catalog.complete_load(&first, vec![paper("Math", 2020, "English")]));
        assert!(catalog.papers().is_empty());
        assert!(catalog.status().is_loading());

        let err = CatalogError::resource_load("ol.json", "late");
        assert!(!catalog.fail_load(&first, &err));
        assert!(catalog.status().is_loading());

        assert!(catalog.complete_load(&second, vec![paper("Physics", 2020, "Tamil")]));
        assert_eq!(catalog.papers().len(), 1);
    }

    #[test]
    fn test_response_after_reset_to_placeholder_is_dropped() {
        let mut catalog = Catalog::new(CatalogConfig::default());
        let ticket = catalog.begin_load("ol").unwrap();
        catalog.begin_load("");
        assert!(!catalog.complete_load(&ticket, vec![paper("Math", 2020, "English")]));
        assert_eq!(catalog.status(), &CatalogStatus::Idle);
    }

    #[test]
    fn test_subject_pick_populates_years_and_disables_medium() {
        let mut catalog = loaded();
        assert!(catalog.select(PaperField::Subject, "Math"));

        let year = catalog.dropdown(PaperField::Year);
        assert!(year.enabled);
        assert_eq!(year.options, vec!["2021", "2019"]);
        assert_eq!(year.selected, None);
        assert!(!catalog.dropdown(PaperField::Medium).enabled);
        assert_eq!(catalog.results().view.cards().len(), 3);
    }

    #[test]
    fn test_year_pick_populates_mediums() {
        let mut catalog = loaded();
        catalog.select(PaperField::Subject, "Math");
        assert!(catalog.select(PaperField::Year, "2021"));

        let medium = catalog.dropdown(PaperField::Medium);
        assert!(medium.enabled);
        assert_eq!(medium.options, vec!["English", "Sinhala"]);
        assert_eq!(catalog.dropdown(PaperField::Year).selected.as_deref(), Some("2021"));
        assert_eq!(catalog.results().view.cards().len(), 2);

        assert!(catalog.select(PaperField::Medium, "Sinhala"));
        assert_eq!(catalog.filters().medium.as_deref(), Some("Sinhala"));
        assert_eq!(
            catalog.dropdown(PaperField::Medium).selected.as_deref(),
            Some("Sinhala")
        );
        assert_eq!(catalog.results().view.cards().len(), 1);
    }

    #[test]
    fn test_subject_change_clears_year_and_medium() {
        let mut catalog = loaded();
        catalog.select(PaperField::Subject, "Math");
        catalog.select(PaperField::Year, "2021");
        catalog.select(PaperField::Medium, "English");

        catalog.select(PaperField::Subject, "Physics");
        assert_eq!(catalog.filters().year, None);
        assert_eq!(catalog.filters().medium, None);
        assert!(!catalog.dropdown(PaperField::Medium).enabled);
        assert_eq!(catalog.dropdown(PaperField::Year).options, vec!["2020"]);
    }

    #[test]
    fn test_year_change_clears_medium() {
        let mut catalog = loaded();
        catalog.select(PaperField::Subject, "Math");
        catalog.select(PaperField::Year, "2021");
        catalog.select(PaperField::Medium, "English");

        catalog.select(PaperField::Year, "2019");
        assert_eq!(catalog.filters().medium, None);
        assert_eq!(catalog.dropdown(PaperField::Medium).selected, None);
        assert_eq!(catalog.dropdown(PaperField::Medium).options, vec!["English"]);
    }

    #[test]
    fn test_subject_placeholder_resets_year_and_medium() {
        let mut catalog = loaded();
        catalog.select(PaperField::Subject, "Math");
        catalog.select(PaperField::Year, "2021");
        catalog.select(PaperField::Subject, "");
        assert!(catalog.filters().is_empty());
        assert!(!catalog.dropdown(PaperField::Year).enabled);
        assert!(!catalog.dropdown(PaperField::Medium).enabled);
        assert!(catalog.dropdown(PaperField::Subject).enabled);
        assert_eq!(catalog.results().view.cards().len(), 4);
    }

    #[test]
    fn test_named_selectors_cascade() {
        let mut catalog = loaded();
        assert!(catalog.select_subject("Math"));
        assert!(catalog.select_year("2021"));
        assert!(catalog.select_medium("English"));
        assert_eq!(catalog.results().view.cards().len(), 1);
        assert!(catalog.select_year("2019"));
        assert_eq!(catalog.filters().medium, None);
    }

    #[test]
    fn test_orphan_pick_is_refused() {
        let mut catalog = loaded();
        assert!(!catalog.select(PaperField::Medium, "English"));
        assert!(catalog.filters().is_empty());
    }

    #[test]
    fn test_search_applies_on_top_of_filters() {
        let mut catalog = loaded();
        catalog.select(PaperField::Subject, "Math");
        catalog.set_search("sinhala");
        assert_eq!(catalog.results().view.cards().len(), 1);
        catalog.set_search("physics");
        assert_eq!(catalog.results().view, ResultsView::NoResults);
    }
}
