//! Row filter for pages that list papers as a pre-rendered table

/// Selector value that matches every row
pub const MATCH_ALL: &str = "all";

/// Columns a table row can be narrowed on, keyed by `data-*` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Year,
    Term,
    Province,
}

impl TableColumn {
    pub const ALL: [TableColumn; 3] = [TableColumn::Year, TableColumn::Term, TableColumn::Province];

    pub fn attribute(&self) -> &'static str {
        match self {
            TableColumn::Year => "data-year",
            TableColumn::Term => "data-term",
            TableColumn::Province => "data-province",
        }
    }
}

/// Current selector values; an absent selector behaves like `all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSelection {
    pub year: Option<String>,
    pub term: Option<String>,
    pub province: Option<String>,
}

impl TableSelection {
    pub fn get(&self, column: TableColumn) -> Option<&str> {
        match column {
            TableColumn::Year => self.year.as_deref(),
            TableColumn::Term => self.term.as_deref(),
            TableColumn::Province => self.province.as_deref(),
        }
    }

    pub fn set(&mut self, column: TableColumn, value: Option<String>) {
        match column {
            TableColumn::Year => self.year = value,
            TableColumn::Term => self.term = value,
            TableColumn::Province => self.province = value,
        }
    }

    /// Whether a row with the given attribute lookup should be shown
    pub fn matches<F>(&self, attribute: F) -> bool
    where
        F: Fn(TableColumn) -> Option<String>,
    {
        TableColumn::ALL.iter().all(|&column| match self.get(column) {
            None | Some(MATCH_ALL) => true,
            Some(wanted) => attribute(column).as_deref() == Some(wanted),
        })
    }
}
