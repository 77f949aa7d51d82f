//! Cascading filter state and dropdown option derivation
//!
//! The dropdowns form a chain: subject narrows the years on offer, and
//! subject plus year narrow the mediums. A level can only hold a value while
//! every level above it does, so picking a new subject clears year and
//! medium, and picking a new year clears medium.

use crate::paper::{compare_years_desc, Paper, PaperField};
use serde::Serialize;
use std::collections::BTreeSet;

/// Current dropdown selections. `None` means the placeholder is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub subject: Option<String>,
    pub year: Option<String>,
    pub medium: Option<String>,
}

impl FilterState {
    pub fn get(&self, field: PaperField) -> Option<&str> {
        match field {
            PaperField::Subject => self.subject.as_deref(),
            PaperField::Year => self.year.as_deref(),
            PaperField::Medium => self.medium.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.year.is_none() && self.medium.is_none()
    }

    /// Set one level, clearing the levels below it.
    ///
    /// Empty strings clear the level. A value for a level whose parent is
    /// unset is refused and leaves the state untouched; returns whether the
    /// change was applied.
    pub fn select(&mut self, field: PaperField, value: &str) -> bool {
        let value = normalize(value);
        match field {
            PaperField::Subject => {
                self.subject = value;
                self.year = None;
                self.medium = None;
            }
            PaperField::Year => {
                if value.is_some() && self.subject.is_none() {
                    return false;
                }
                self.year = value;
                self.medium = None;
            }
            PaperField::Medium => {
                if value.is_some() && self.year.is_none() {
                    return false;
                }
                self.medium = value;
            }
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn normalize(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Display model of one `<select>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub enabled: bool,
}

impl Dropdown {
    /// Replace the options and enable the control.
    ///
    /// `selected` survives only if it is one of the new options.
    pub fn populate(&mut self, options: Vec<String>, selected: Option<&str>) {
        self.selected = selected
            .filter(|s| options.iter().any(|o| o == s))
            .map(str::to_string);
        self.options = options;
        self.enabled = true;
    }

    /// Drop all options and disable the control
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Distinct values of `field`, ascending
pub fn distinct_values<'a, I>(papers: I, field: PaperField) -> Vec<String>
where
    I: IntoIterator<Item = &'a Paper>,
{
    papers
        .into_iter()
        .map(|p| p.field(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Subjects on offer for a freshly loaded exam
pub fn subject_options(papers: &[Paper]) -> Vec<String> {
    distinct_values(papers, PaperField::Subject)
}

/// Years on offer for a subject, newest first
pub fn year_options(papers: &[Paper], subject: &str) -> Vec<String> {
    let mut years = distinct_values(papers.iter().filter(|p| p.subject == subject), PaperField::Year);
    years.sort_by(|a, b| compare_years_desc(a, b));
    years
}

/// Mediums on offer for a subject and year, ascending
pub fn medium_options(papers: &[Paper], subject: &str, year: &str) -> Vec<String> {
    distinct_values(
        papers
            .iter()
            .filter(|p| p.subject == subject && p.year.to_string() == year),
        PaperField::Medium,
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn options() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-c]{1,2}", 0..6)
    }

    proptest! {
        /// Property: a selection survives repopulation iff it is still offered
        #[test]
        fn selection_kept_iff_present(opts in options(), selected in "[a-c]{1,2}") {
            let mut dropdown = Dropdown::default();
            dropdown.populate(opts.clone(), Some(&selected));
            let present = opts.contains(&selected);
            prop_assert_eq!(dropdown.selected.is_some(), present);
        }

        /// Property: the cascade invariant holds after any sequence of picks
        #[test]
        fn cascade_invariant(picks in prop::collection::vec((0usize..3, "[a-b]{0,1}"), 0..20)) {
            let mut state = FilterState::default();
            for (level, value) in picks {
                state.select(PaperField::ALL[level], &value);
                prop_assert!(state.year.is_none() || state.subject.is_some());
                prop_assert!(state.medium.is_none() || state.year.is_some());
            }
        }
    }
}
