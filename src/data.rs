// src/data.rs
//
// Table data as it moves through one cycle.
//
// - Record: one (code, message) pair read from a table row.
// - RecordBatch: every record from one scrape, in document order.
//
// Batches are built once per cycle and never merged with earlier ones.
// Position is the only identity a record has, so order is preserved all
// the way from the HTML rows to the spreadsheet rows.

/// One table row: first cell is the code, second the message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub code: String,
    pub message: String,
}

impl Record {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordBatch {
    records: Vec<Record>,
}

impl RecordBatch {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn len(&self) -> usize { self.records.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] { &self.records }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> { self.records.iter() }

    /// Two-column value matrix, one `[code, message]` row per record.
    /// Blank rows are appended up to `pad_to` so a shorter batch overwrites
    /// every row a longer one wrote before it.
    pub fn to_value_matrix(&self, pad_to: usize) -> Vec<Vec<String>> {
        let total = self.records.len().max(pad_to);
        let mut rows = Vec::with_capacity(total);
        for r in &self.records {
            rows.push(vec![r.code.clone(), r.message.clone()]);
        }
        while rows.len() < total {
            rows.push(vec![s!(), s!()]);
        }
        rows
    }

    /// Rebuild a batch from spreadsheet rows. Missing cells read as empty;
    /// columns past the second are ignored.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let records = rows
            .into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                Record {
                    code: cells.next().unwrap_or_default(),
                    message: cells.next().unwrap_or_default(),
                }
            })
            .collect();
        Self { records }
    }
}

impl From<Vec<Record>> for RecordBatch {
    fn from(records: Vec<Record>) -> Self { Self { records } }
}

impl FromIterator<Record> for RecordBatch {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a RecordBatch {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;
    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
