//! Table-boundary state machine.
//!
//! A section header opens a table, a blank line closes it, and every
//! `rows_per_page` rows the accumulated rows are flushed as their own chunk
//! while the table stays open.

use tracing::debug;

use crate::amount::row_from_line;
use crate::classify::TableEvent;
use crate::types::{Table, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableAccumulator {
    rows_per_page: usize,
    in_table: bool,
    current: Table,
    row_index: usize,
    tables: Vec<Table>,
}

impl TableAccumulator {
    /// Create an accumulator that chunks tables every `rows_per_page` rows
    /// (never, when zero).
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            rows_per_page,
            ..Default::default()
        }
    }

    pub fn in_table(&self) -> bool {
        self.in_table
    }

    /// Rows accumulated in the open chunk.
    pub fn current(&self) -> &[TableRow] {
        &self.current
    }

    /// Chunks flushed so far.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Advance the machine by one classified line.
    pub fn apply(mut self, event: TableEvent<'_>) -> Self {
        match event {
            TableEvent::Header => {
                if !self.current.is_empty() {
                    self.flush();
                }
                debug!(tables = self.tables.len(), "table opened");
                self.in_table = true;
                self.row_index = 0;
            }
            TableEvent::Blank if self.in_table => {
                if !self.current.is_empty() {
                    self.flush();
                    self.in_table = false;
                    debug!(tables = self.tables.len(), "table closed");
                }
            }
            TableEvent::Content(line) if self.in_table => {
                self.push_row(row_from_line(line));
            }
            _ => {}
        }
        self
    }

    /// Append a row, flushing the chunk once it holds a full page.
    pub fn push_row(&mut self, row: TableRow) {
        self.current.push(row);
        if self.rows_per_page > 0 && self.row_index + 1 == self.rows_per_page {
            self.flush();
            self.row_index = 0;
            debug!(tables = self.tables.len(), "page full, chunk flushed");
        } else {
            self.row_index += 1;
        }
    }

    /// Flush what is left and drop rows without an amount from every chunk.
    ///
    /// Chunks emptied by the filter are kept.
    pub fn finish(mut self) -> Vec<Table> {
        if !self.current.is_empty() {
            self.flush();
        }
        for table in &mut self.tables {
            table.retain(TableRow::has_amount);
        }
        self.tables
    }

    fn flush(&mut self) {
        let chunk = std::mem::take(&mut self.current);
        self.tables.push(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(events: &[TableEvent<'_>], rows_per_page: usize) -> Vec<Table> {
        events
            .iter()
            .fold(TableAccumulator::new(rows_per_page), |acc, event| acc.apply(*event))
            .finish()
    }

    fn sizes(tables: &[Table]) -> Vec<usize> {
        tables.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_lines_outside_table_ignored() {
        let tables = run(&[TableEvent::Content("EC2  $1.00"), TableEvent::Blank], 10);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_header_then_rows_then_blank() {
        let tables = run(
            &[
                TableEvent::Header,
                TableEvent::Content("EC2  $1.00"),
                TableEvent::Content("S3  2.00"),
                TableEvent::Blank,
                TableEvent::Content("after  $9.00"),
            ],
            10,
        );
        assert_eq!(
            tables,
            vec![vec![TableRow::new("EC2", "$1.00"), TableRow::new("S3", "$2.00")]]
        );
    }

    #[test]
    fn test_blank_right_after_header_keeps_table_open() {
        let acc = TableAccumulator::new(10)
            .apply(TableEvent::Header)
            .apply(TableEvent::Blank);
        assert!(acc.in_table());
        assert!(acc.current().is_empty());

        let tables = acc.apply(TableEvent::Content("EC2  $1.00")).finish();
        assert_eq!(tables, vec![vec![TableRow::new("EC2", "$1.00")]]);
    }

    #[test]
    fn test_new_header_flushes_open_table() {
        let tables = run(
            &[
                TableEvent::Header,
                TableEvent::Content("EC2  $1.00"),
                TableEvent::Header,
                TableEvent::Content("S3  $2.00"),
            ],
            10,
        );
        assert_eq!(sizes(&tables), vec![1, 1]);
    }

    #[test]
    fn test_twenty_three_rows_chunk_into_pages() {
        let mut events = vec![TableEvent::Header];
        events.extend(std::iter::repeat(TableEvent::Content("Usage  $1.00")).take(23));
        let tables = run(&events, 10);
        assert_eq!(sizes(&tables), vec![10, 10, 3]);
    }

    #[test]
    fn test_page_flush_keeps_table_open() {
        let mut acc = TableAccumulator::new(2).apply(TableEvent::Header);
        acc = acc
            .apply(TableEvent::Content("a  $1.00"))
            .apply(TableEvent::Content("b  $1.00"));
        assert!(acc.in_table());
        assert!(acc.current().is_empty());
        assert_eq!(acc.tables().len(), 1);

        // An empty chunk means this blank line does not close the table.
        acc = acc.apply(TableEvent::Blank).apply(TableEvent::Content("c  $1.00"));
        assert_eq!(sizes(&acc.finish()), vec![2, 1]);
    }

    #[test]
    fn test_zero_rows_per_page_disables_chunking() {
        let mut events = vec![TableEvent::Header];
        events.extend(std::iter::repeat(TableEvent::Content("Usage  $1.00")).take(23));
        assert_eq!(sizes(&run(&events, 0)), vec![23]);
    }

    #[test]
    fn test_rows_without_amount_filtered_but_table_kept() {
        let tables = run(
            &[
                TableEvent::Header,
                TableEvent::Content("Amazon Elastic Compute Cloud"),
                TableEvent::Blank,
                TableEvent::Header,
                TableEvent::Content("Amazon S3"),
                TableEvent::Content("Storage  $0.50"),
            ],
            10,
        );
        assert_eq!(tables, vec![vec![], vec![TableRow::new("Storage", "$0.50")]]);
    }

    #[test]
    fn test_filter_runs_after_chunking() {
        let mut events = vec![TableEvent::Header];
        events.extend(std::iter::repeat(TableEvent::Content("no amount")).take(9));
        events.push(TableEvent::Content("Usage  $1.00"));
        events.push(TableEvent::Content("Usage  $2.00"));
        let tables = run(&events, 10);
        assert_eq!(sizes(&tables), vec![1, 1]);
    }
}
