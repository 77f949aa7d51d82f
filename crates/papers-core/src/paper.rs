//! Paper records as published in the per-exam JSON files

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::cmp::Ordering;
use std::fmt;

/// Publication year of a paper.
///
/// The data files are hand-maintained and carry the year as a JSON number
/// (sometimes written `2020.0`) or as a numeric string, so all of these are
/// accepted and compared through their rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(Number),
    Text(String),
}

impl Year {
    /// Integral value of the year, if it has one. `2020.0` counts as 2020.
    pub fn numeric(&self) -> Option<i64> {
        match self {
            Year::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                    .map(|f| f as i64)
            }),
            Year::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => match self.numeric() {
                Some(year) => write!(f, "{}", year),
                None => write!(f, "{}", n),
            },
            Year::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Year {
    fn from(value: i64) -> Self {
        Year::Number(Number::from(value))
    }
}

impl From<&str> for Year {
    fn from(value: &str) -> Self {
        Year::Text(value.to_string())
    }
}

/// Orders year labels newest first; labels that are not numbers sort after
/// all numeric ones, lexicographically.
pub fn compare_years_desc(a: &str, b: &str) -> Ordering {
    match (Year::from(a).numeric(), Year::from(b).numeric()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// A single past paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub file_name: String,
    pub subject: String,
    pub year: Year,
    pub medium: String,
    /// Sharing link of the hosted file
    #[serde(default)]
    pub drive_link: String,
}

impl Paper {
    /// Value of a filterable field, rendered as text
    pub fn field(&self, field: PaperField) -> String {
        match field {
            PaperField::Subject => self.subject.clone(),
            PaperField::Year => self.year.to_string(),
            PaperField::Medium => self.medium.clone(),
        }
    }
}

/// The fields a dropdown can narrow on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperField {
    Subject,
    Year,
    Medium,
}

impl PaperField {
    pub const ALL: [PaperField; 3] = [PaperField::Subject, PaperField::Year, PaperField::Medium];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaperField::Subject => "subject",
            PaperField::Year => "year",
            PaperField::Medium => "medium",
        }
    }
}

/// Parse the body of `./data/<exam>.json`
pub fn parse_papers(json: &str) -> Result<Vec<Paper>, serde_json::Error> {
    serde_json::from_str(json)
}
