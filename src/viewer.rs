//! Paginated raw-row viewer.

use std::io::Write;

use polars::prelude::*;

use crate::error::Result;
use crate::prompt::{LineSource, Prompter};

const VIEW_QUESTION: &str =
    "\nWould you like to view 5 rows of individual trip data? Enter yes or no: ";
pub const NO_MORE_DATA: &str = "No more data to display.";

/// Cursor over a table that hands out consecutive slices of `page_size` rows.
pub struct RawDataViewer<'a> {
    table: &'a DataFrame,
    cursor: usize,
    page_size: usize,
}

impl<'a> RawDataViewer<'a> {
    pub fn new(table: &'a DataFrame, page_size: usize) -> Self {
        Self {
            table,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.table.height()
    }

    /// The next slice of up to `page_size` rows, or `None` once every row
    /// has been shown.
    pub fn next_page(&mut self) -> Option<DataFrame> {
        if self.is_exhausted() {
            return None;
        }
        let offset = i64::try_from(self.cursor).ok()?;
        let page = self.table.slice(offset, self.page_size);
        self.cursor += self.page_size;
        Some(page)
    }

    /// Offer pages until the user declines or the rows run out.
    pub fn run<R: LineSource, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        while prompter.confirm(VIEW_QUESTION)? {
            let first_row = self.cursor;
            let Some(page) = self.next_page() else {
                writeln!(prompter.output(), "\n{NO_MORE_DATA}")?;
                break;
            };
            write_rows(prompter.output(), &page, first_row)?;

            if self.is_exhausted() {
                writeln!(prompter.output(), "\n{NO_MORE_DATA}")?;
                break;
            }
        }
        Ok(())
    }
}

/// One block per row: the source row number, then `column: value` lines.
pub fn write_rows<W: Write>(out: &mut W, page: &DataFrame, first_row: usize) -> Result<()> {
    for i in 0..page.height() {
        writeln!(out, "\nRow {}", first_row + i)?;
        for column in page.get_columns() {
            let value = match column.get(i)? {
                AnyValue::Null => String::new(),
                AnyValue::String(s) => s.to_string(),
                AnyValue::StringOwned(s) => s.to_string(),
                other => format!("{other}"),
            };
            writeln!(out, "  {}: {}", column.name(), value)?;
        }
    }
    Ok(())
}
