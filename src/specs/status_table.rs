// src/specs/status_table.rs
use scraper::Html;

use crate::core::html::child_text;
use crate::data::{Record, RecordBatch};

/// Read the first `<table>` of `doc` into records, one per `<tr>`.
/// - Columns: code = `td:nth-child(1)`, message = `td:nth-child(2)`
/// - Header rows and short rows give empty fields instead of being skipped.
/// - Rows of tables nested inside the first table are included, in document order.
///
/// Returns `None` when the document has no table at all.
pub fn parse(doc: &str) -> Option<RecordBatch> {
    let html = Html::parse_document(doc);
    let table = html.select(selector!("table")).next()?;

    let batch = table
        .select(selector!("tr"))
        .map(|row| Record {
            code: child_text(row, selector!("td:nth-child(1)")),
            message: child_text(row, selector!("td:nth-child(2)")),
        })
        .collect();
    Some(batch)
}
