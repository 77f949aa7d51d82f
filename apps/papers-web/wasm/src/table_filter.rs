//! Show or hide rows of a pre-rendered papers table by year, term and
//! province

use crate::bindings::{TableBindings, TableElements};
use crate::dom::{describe, document};
use papers_core::{CatalogError, TableColumn, TableSelection, MATCH_ALL};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlSelectElement};

pub struct TableFilter {
    elements: TableElements,
}

impl TableFilter {
    fn select(&self, column: TableColumn) -> Option<&HtmlSelectElement> {
        match column {
            TableColumn::Year => self.elements.year.as_ref(),
            TableColumn::Term => self.elements.term.as_ref(),
            TableColumn::Province => self.elements.province.as_ref(),
        }
    }

    pub fn selection(&self) -> TableSelection {
        let mut selection = TableSelection::default();
        for column in TableColumn::ALL {
            selection.set(column, self.select(column).map(|s| s.value()));
        }
        selection
    }

    /// Re-evaluate every row. Returns how many remain visible.
    pub fn apply(&self) -> usize {
        let selection = self.selection();
        let mut visible = 0;
        for row in &self.elements.rows {
            let shown = selection.matches(|column| row.get_attribute(column.attribute()));
            if shown {
                visible += 1;
            }
            if let Err(e) = row
                .style()
                .set_property("display", if shown { "" } else { "none" })
            {
                tracing::warn!("could not update table row: {}", describe(&e));
            }
        }
        tracing::debug!(visible, total = self.elements.rows.len(), "table filtered");
        visible
    }

    /// Put every present selector back to `all` and show all rows
    pub fn reset(&self) -> usize {
        for column in TableColumn::ALL {
            if let Some(select) = self.select(column) {
                select.set_value(MATCH_ALL);
            }
        }
        self.apply()
    }
}

/// Wire the selectors and the reset control. Missing pieces are skipped.
pub fn start(bindings: TableBindings) -> Result<Rc<TableFilter>, CatalogError> {
    let document = document()?;
    let filter = Rc::new(TableFilter {
        elements: bindings.resolve(&document)?,
    });

    let result = (|| -> Result<(), JsValue> {
        for column in TableColumn::ALL {
            if let Some(select) = filter.select(column) {
                wire(&filter, select, "change", false)?;
            }
        }
        if let Some(button) = &filter.elements.reset {
            wire(&filter, button, "click", true)?;
        }
        Ok(())
    })();
    result.map_err(|e| CatalogError::Setup(describe(&e)))?;

    tracing::info!(rows = filter.elements.rows.len(), "table filter ready");
    Ok(filter)
}

fn wire(
    filter: &Rc<TableFilter>,
    target: &EventTarget,
    event: &str,
    reset: bool,
) -> Result<(), JsValue> {
    let filter = Rc::clone(filter);
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if reset {
            filter.reset();
        } else {
            filter.apply();
        }
    });
    target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
