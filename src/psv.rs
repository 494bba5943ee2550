//! # ADES PSV table reader
//!
//! Reads the **pipe-separated** rendition of an ADES file into a [`PsvTable`]: the
//! header block, a column index built from the table header row, and the data rows.
//!
//! ## Layout
//! -----------------
//! ```text
//! # version=2017
//! # observatory
//! ! mpcCode 695
//! permID |provID |trkSub |mode|stn |obsTime                 |ra        |dec       |...
//!        |2025 HX3|       |CCD |695 |2025-04-27T21:51:58.890Z|215.987654|-12.012345|...
//! ```
//!
//! - Lines starting with `#` open a header section (or carry `version=`),
//!   lines starting with `!` are `keyword value` pairs inside the current section.
//!   Both are collected into [`AdesHeader`] and never reach the table.
//! - Fields are padded with spaces for alignment; padding is trimmed.
//! - An empty field is a **masked** cell and reads as `None`, never as `""` or `0`.
use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::trace;

use crate::{
    constants::{EMPTY_TABLE, HEADER_KEYWORD_PREFIX, HEADER_SECTION_PREFIX, PSV_DELIMITER},
    ingest_errors::{IngestError, ParseRowError},
};

/// One `! keyword value` line of the ADES header, with the section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub section: String,
    pub keyword: String,
    pub value: String,
}

/// The header block preceding the PSV table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdesHeader {
    /// ADES version declared by `# version=...`
    pub version: Option<String>,
    pub entries: Vec<HeaderEntry>,
}

impl AdesHeader {
    /// First value recorded for `keyword` in `section`.
    pub fn get(&self, section: &str, keyword: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.section == section && e.keyword == keyword)
            .map(|e| e.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.entries.is_empty()
    }

    fn push_line(&mut self, section: &mut String, line: &str) {
        if let Some(rest) = line.strip_prefix(HEADER_SECTION_PREFIX) {
            let rest = rest.trim();
            match rest.split_once('=') {
                Some((key, version)) if key.trim() == "version" => {
                    self.version = Some(version.trim().to_string());
                }
                _ => *section = rest.to_string(),
            }
        } else if let Some(rest) = line.strip_prefix(HEADER_KEYWORD_PREFIX) {
            let rest = rest.trim();
            let (keyword, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            self.entries.push(HeaderEntry {
                section: section.clone(),
                keyword: keyword.to_string(),
                value: value.trim().to_string(),
            });
        }
    }
}

/// A parsed PSV table: header block, column index and data rows.
#[derive(Debug, Clone)]
pub struct PsvTable {
    header: AdesHeader,
    column_names: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

/// Borrowed view over one data row of a [`PsvTable`].
#[derive(Debug, Clone, Copy)]
pub struct PsvRow<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a StringRecord,
}

impl<'a> PsvRow<'a> {
    /// Cell of `column` in this row.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when the cell is masked (empty field)
    /// * `Err(ParseRowError::MissingColumn)` when the table has no such column
    pub fn cell(&self, column: &str) -> Result<Option<&'a str>, ParseRowError> {
        let idx = self
            .columns
            .get(column)
            .ok_or_else(|| ParseRowError::MissingColumn(column.to_string()))?;
        Ok(self.record.get(*idx).filter(|value| !value.is_empty()))
    }

    /// Unmasked cell of `column`, or `None` when masked or absent.
    pub fn optional_cell(&self, column: &str) -> Option<&'a str> {
        self.cell(column).ok().flatten()
    }

    /// Unmasked cell of a required column.
    pub fn required(&self, column: &str) -> Result<&'a str, ParseRowError> {
        self.cell(column)?
            .ok_or_else(|| ParseRowError::MaskedValue(column.to_string()))
    }
}

impl PsvTable {
    /// Parse the full text of an ADES PSV file.
    ///
    /// Header lines and blank lines are stripped, the first remaining line names the
    /// columns, every following line is a data row. A row whose field count differs
    /// from the header aborts the parse with its 1-based row number.
    pub fn parse(content: &str) -> Result<Self, IngestError> {
        let mut header = AdesHeader::default();
        let mut section = String::new();
        let mut body = String::with_capacity(content.len());

        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        for line in content.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with(HEADER_SECTION_PREFIX) || trimmed.starts_with(HEADER_KEYWORD_PREFIX)
            {
                header.push_line(&mut section, trimmed);
            } else if !trimmed.is_empty() {
                body.push_str(line);
                body.push('\n');
            }
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(PSV_DELIMITER)
            .has_headers(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(body.as_bytes());

        let column_names: Vec<String> = reader
            .headers()
            .map_err(|_| IngestError::invalid_format(EMPTY_TABLE))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut columns = HashMap::with_capacity(column_names.len());
        for (idx, name) in column_names.iter().enumerate() {
            columns.entry(name.clone()).or_insert(idx);
        }

        let rows = reader
            .records()
            .enumerate()
            .map(|(idx, record)| {
                record.map_err(|e| {
                    IngestError::invalid_row(idx + 1, ParseRowError::Malformed(e.to_string()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            columns = column_names.len(),
            rows = rows.len(),
            header_entries = header.entries.len(),
            "parsed PSV table"
        );

        Ok(PsvTable {
            header,
            column_names,
            columns,
            rows,
        })
    }

    pub fn header(&self) -> &AdesHeader {
        &self.header
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Number of data rows (the header row is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = PsvRow<'_>> {
        self.rows.iter().map(move |record| PsvRow {
            columns: &self.columns,
            record,
        })
    }
}
