//! Column-driven table with optional client-side sorting.
//!
//! A [`SortableTable`] owns only its column descriptors and its sort state;
//! row data is borrowed per call and never reordered in place.

pub mod format;
pub mod render;
pub mod sort;

pub use render::{HeaderCell, RenderedRow, RenderedTable};
pub use sort::{SortDirection, SortState, sorted_view};

use std::collections::HashSet;
use std::fmt;

use crate::core::{ConsoleError, RecordId, Result, Value};

/// A row the table can display: a unique id plus keyed cell values.
pub trait TableRow {
    fn row_id(&self) -> RecordId;

    /// Raw value under `key`, or `None` when the row has no such field.
    fn cell(&self, key: &str) -> Option<Value>;
}

pub type CellRenderer<R> = Box<dyn Fn(&Value, &R) -> String + Send + Sync>;
pub type RowClickHandler = Box<dyn FnMut(RecordId) + Send>;

pub struct Column<R> {
    key: String,
    header: String,
    render: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            render: None,
        }
    }

    /// Attach a cell renderer; it receives the raw value and the whole row.
    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    fn display(&self, row: &R, raw: &Value) -> String {
        match &self.render {
            Some(render) => render(raw, row),
            None => raw.to_string(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("render", &self.render.is_some())
            .finish()
    }
}

pub struct SortableTable<R> {
    columns: Vec<Column<R>>,
    sortable: bool,
    sort: SortState,
    on_row_click: Option<RowClickHandler>,
}

impl<R: TableRow> SortableTable<R> {
    /// Column keys must be unique.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(ConsoleError::DuplicateColumn(column.key.clone()));
            }
        }

        Ok(Self {
            columns,
            sortable: false,
            sort: SortState::default(),
            on_row_click: None,
        })
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(RecordId) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Header click. A no-op on a non-sortable table; an undeclared key is
    /// rejected either way.
    pub fn click_header(&mut self, key: &str) -> Result<()> {
        if !self.columns.iter().any(|c| c.key == key) {
            return Err(ConsoleError::UnknownColumn(key.to_string()));
        }
        if self.sortable {
            self.sort.click(key);
        }
        Ok(())
    }

    /// Row click: forwards the row's id to the wired handler. Returns
    /// whether a handler was wired.
    pub fn click_row(&mut self, id: RecordId) -> bool {
        match self.on_row_click.as_mut() {
            Some(handler) => {
                handler(id);
                true
            }
            None => false,
        }
    }

    /// Display order of `data` under the current sort state.
    pub fn view<'a>(&self, data: &'a [R]) -> Vec<&'a R> {
        match (self.sortable, self.sort.key()) {
            (true, Some(key)) => sorted_view(data, key, self.sort.direction()),
            _ => data.iter().collect(),
        }
    }

    pub fn render(&self, data: &[R]) -> RenderedTable {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.header.clone(),
                sort: (self.sortable && self.sort.is_active_on(&column.key))
                    .then(|| self.sort.direction()),
            })
            .collect();

        let rows = self
            .view(data)
            .into_iter()
            .map(|row| RenderedRow {
                id: row.row_id(),
                cells: self
                    .columns
                    .iter()
                    .map(|column| {
                        let raw = row.cell(&column.key).unwrap_or(Value::Null);
                        column.display(row, &raw)
                    })
                    .collect(),
            })
            .collect();

        RenderedTable { headers, rows }
    }
}

impl<R> fmt::Debug for SortableTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableTable")
            .field("columns", &self.columns)
            .field("sortable", &self.sortable)
            .field("sort", &self.sort)
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}
