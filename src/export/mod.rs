//! CSV export of the filtered record view.
//!
//! Export always covers the whole filtered view, never just the visible
//! page. Columns come from a [`ColumnSpec`] so their order is independent of
//! the record's own field order.

use crate::model::error::ExportError;
use crate::model::{Record, RecordField};
use chrono::{Local, NaiveDate};
use tracing::info;

pub mod sink;

pub use sink::{DirectorySink, DownloadSink, MemorySink};

// ===== ColumnSpec =====

/// How a column obtains its cell value.
#[derive(Debug, Clone)]
pub enum Accessor<R: Record> {
    /// A declared record field. Absent values export as empty cells.
    Field(R::Field),
    /// A value computed from the whole record.
    Derived(fn(&R) -> String),
}

impl<R: Record> Accessor<R> {
    /// Cell text for `record`.
    pub fn cell(&self, record: &R) -> String {
        match self {
            Accessor::Field(field) => record.field(*field).unwrap_or_default(),
            Accessor::Derived(f) => f(record),
        }
    }
}

/// One export column.
#[derive(Debug, Clone)]
pub struct Column<R: Record> {
    /// Header cell text.
    pub header: String,
    /// Source of each cell.
    pub accessor: Accessor<R>,
}

/// Ordered export columns.
#[derive(Debug, Clone)]
pub struct ColumnSpec<R: Record> {
    columns: Vec<Column<R>>,
}

impl<R: Record> Default for ColumnSpec<R> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<R: Record> ColumnSpec<R> {
    /// No columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column reading `field`.
    pub fn field(mut self, header: impl Into<String>, field: R::Field) -> Self {
        self.columns.push(Column {
            header: header.into(),
            accessor: Accessor::Field(field),
        });
        self
    }

    /// Append a computed column.
    pub fn derived(mut self, header: impl Into<String>, f: fn(&R) -> String) -> Self {
        self.columns.push(Column {
            header: header.into(),
            accessor: Accessor::Derived(f),
        });
        self
    }

    /// One column per field, headed by the field's machine name.
    pub fn from_fields(fields: &[R::Field]) -> Self {
        fields
            .iter()
            .fold(Self::new(), |spec, f| spec.field(f.name(), *f))
    }

    /// Columns in export order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Header texts in export order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }

    /// True when no column is defined.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ===== Outcome =====

/// Why an export produced no file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The filtered view has no records.
    EmptyView,
}

/// Result of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The sink accepted the file.
    Delivered {
        /// `<dataset>-<YYYY-MM-DD>.csv`
        file_name: String,
        /// Where the sink put it.
        location: String,
        /// Data rows written, excluding the header.
        rows: usize,
    },
    /// Nothing was produced; the caller should tell the user why.
    Refused(RefusalReason),
}

// ===== TabularExporter =====

/// Serializes records to CSV and hands the file to a [`DownloadSink`].
#[derive(Debug, Clone)]
pub struct TabularExporter<R: Record> {
    dataset_name: String,
    columns: ColumnSpec<R>,
}

impl<R: Record> TabularExporter<R> {
    /// Exporter naming files after `dataset_name`.
    pub fn new(dataset_name: impl Into<String>, columns: ColumnSpec<R>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            columns,
        }
    }

    /// Base of every export file name.
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    /// Columns written by every export.
    pub fn columns(&self) -> &ColumnSpec<R> {
        &self.columns
    }

    /// Export `view` stamped with today's local date.
    pub fn export(
        &self,
        view: &[&R],
        sink: &mut dyn DownloadSink,
    ) -> Result<ExportOutcome, ExportError> {
        self.export_on(view, sink, Local::now().date_naive())
    }

    /// Export `view` stamped with `date`.
    ///
    /// An empty view is refused up front and the sink is not called.
    pub fn export_on(
        &self,
        view: &[&R],
        sink: &mut dyn DownloadSink,
        date: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        if view.is_empty() {
            info!(dataset = %self.dataset_name, "export refused: empty view");
            return Ok(ExportOutcome::Refused(RefusalReason::EmptyView));
        }

        let contents = render_csv(view, &self.columns)?;
        let file_name = export_file_name(&self.dataset_name, date);
        let location = sink.deliver(&file_name, &contents)?;
        info!(dataset = %self.dataset_name, rows = view.len(), %file_name, "export delivered");

        Ok(ExportOutcome::Delivered {
            file_name,
            location,
            rows: view.len(),
        })
    }
}

/// `<dataset>-<YYYY-MM-DD>.csv`
pub fn export_file_name(dataset_name: &str, date: NaiveDate) -> String {
    format!("{dataset_name}-{}.csv", date.format("%Y-%m-%d"))
}

/// Encode a header row plus one row per record, every cell double-quoted.
pub fn render_csv<R: Record>(view: &[&R], columns: &ColumnSpec<R>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.headers())?;
    for record in view {
        writer.write_record(columns.columns().iter().map(|c| c.accessor.cell(record)))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Sink(std::io::Error::other(e.to_string())))
}

// ===== Tests =====

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
