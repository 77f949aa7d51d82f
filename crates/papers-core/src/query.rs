//! Filter and search matching

use crate::filters::FilterState;
use crate::paper::{Paper, PaperField};

/// Every set filter equals the paper's field, ignoring case
pub fn matches_filters(paper: &Paper, filters: &FilterState) -> bool {
    PaperField::ALL.iter().all(|&field| match filters.get(field) {
        Some(wanted) => paper.field(field).to_lowercase() == wanted.to_lowercase(),
        None => true,
    })
}

/// The search term appears in the file name, subject or year, ignoring case.
/// An empty term matches everything.
pub fn matches_search(paper: &Paper, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    paper.file_name.to_lowercase().contains(&term)
        || paper.subject.to_lowercase().contains(&term)
        || paper.year.to_string().to_lowercase().contains(&term)
}

/// Papers passing both the filters and the search, in collection order
pub fn filter_papers<'a>(papers: &'a [Paper], filters: &FilterState, term: &str) -> Vec<&'a Paper> {
    papers
        .iter()
        .filter(|p| matches_filters(p, filters) && matches_search(p, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::Year;
    use pretty_assertions::assert_eq;

    fn paper(name: &str, subject: &str, year: i64, medium: &str) -> Paper {
        Paper {
            file_name: name.to_string(),
            subject: subject.to_string(),
            year: Year::from(year),
            medium: medium.to_string(),
            drive_link: String::new(),
        }
    }

    fn names(papers: Vec<&Paper>) -> Vec<&str> {
        papers.iter().map(|p| p.file_name.as_str()).collect()
    }

    #[test]
    fn test_filters_are_case_insensitive() {
        let papers = vec![paper("A", "Math", 2020, "English")];
        let filters = FilterState {
            subject: Some("MATH".into()),
            year: Some("2020".into()),
            medium: Some("english".into()),
        };
        assert_eq!(names(filter_papers(&papers, &filters, "")), vec!["A"]);
    }

    #[test]
    fn test_filters_are_exact() {
        let papers = vec![paper("A", "Mathematics", 2020, "English")];
        let filters = FilterState {
            subject: Some("Math".into()),
            ..FilterState::default()
        };
        assert!(filter_papers(&papers, &filters, "").is_empty());
    }

    #[test]
    fn test_search_checks_name_subject_and_year() {
        let papers = vec![
            paper("Final Exam", "Math", 2020, "English"),
            paper("Model Paper", "Physics", 2019, "English"),
            paper("Term Test", "Chemistry", 2021, "Tamil"),
        ];
        let none = FilterState::default();
        assert_eq!(names(filter_papers(&papers, &none, "final")), vec!["Final Exam"]);
        assert_eq!(names(filter_papers(&papers, &none, "PHYS")), vec!["Model Paper"]);
        assert_eq!(names(filter_papers(&papers, &none, "2021")), vec!["Term Test"]);
        assert!(filter_papers(&papers, &none, "tamil").is_empty());
    }

    #[test]
    fn test_filters_and_search_combine() {
        let papers = vec![
            paper("Math 2020", "Math", 2020, "English"),
            paper("Math 2019", "Math", 2019, "English"),
            paper("Physics 2020", "Physics", 2020, "English"),
        ];
        let filters = FilterState {
            subject: Some("Math".into()),
            ..FilterState::default()
        };
        assert_eq!(names(filter_papers(&papers, &filters, "2020")), vec!["Math 2020"]);
    }
}
