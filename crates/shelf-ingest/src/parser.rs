//! Delimited-text parsing into [`Record`]s.
//!
//! The parser is tolerant by design of its input, never of its options:
//! option problems are reported when the [`Parser`] is built, after which
//! [`Parser::parse`] is a total function from text to records.
//!
//! # Row policy
//!
//! - Blank rows are ignored.
//! - The first row is a header row when no header list is configured. With a
//!   configured list it is consumed only if its first column contains one of
//!   the header tokens (case-insensitive).
//! - Rows with fewer than `min_columns` fields are dropped.
//! - Rows with an empty name are dropped.
//! - Columns 0..5 are name, link, category, license, tags, by position.
//!   Any further column becomes an extra keyed by its header, or
//!   `extra_<index>` when there is no header for it.
//!
//! # Broken quoting
//!
//! A quoted field that never closes, or whose closing quote is followed by
//! more text after spanning a line break, is treated as a stray quote. The
//! row holding it is split again with quoting turned off, up to the end of
//! the line the quote opened on, and reading resumes with quoting on the
//! next line. A valid multi-line quoted field is left intact.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::record::{fields, Cell, Record};

/// Options controlling how text is split into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Column separator. Must be ASCII.
    pub delimiter: char,
    /// Quote character. Must be ASCII.
    pub quote: char,
    /// Separator between tags inside the tags column.
    pub tag_delimiter: char,
    /// Rows with fewer fields are dropped.
    pub min_columns: usize,
    /// Explicit header names. When unset, the first row provides them.
    pub headers: Option<Vec<String>>,
    /// First-column tokens that mark a row as a header row.
    pub header_tokens: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            tag_delimiter: ',',
            min_columns: fields::KNOWN.len(),
            headers: None,
            header_tokens: vec!["name".to_string()],
        }
    }
}

/// Outcome of one parse: the records plus what was dropped and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Parsed records, in source order.
    pub records: Vec<Record>,
    /// Header names in effect for this parse.
    pub headers: Vec<String>,
    /// Whether the first row was consumed as a header.
    pub header_consumed: bool,
    /// Non-blank data rows seen, header excluded.
    pub rows_seen: usize,
    /// Rows dropped for having too few fields.
    pub dropped_short: usize,
    /// Rows dropped for having an empty name.
    pub dropped_nameless: usize,
    /// Whether an unterminated quote forced a re-split.
    pub quote_recovered: bool,
}

impl ParseReport {
    /// Total number of rows dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.dropped_short + self.dropped_nameless
    }

    /// Consumes the report, keeping only the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// A validated, reusable parser.
///
/// ```
/// use shelf_ingest::{ParseOptions, Parser};
///
/// let parser = Parser::new(ParseOptions::default()).unwrap();
/// let report = parser.parse(
///     "Name,Link,Category,License,Tags\n\
///      Blender,https://blender.org,Tools,GPL,\"3d, modeling\"\n\
///      Name,http://x.com\n",
/// );
///
/// assert_eq!(report.records.len(), 1);
/// assert_eq!(report.records[0].tags(), ["3d", "modeling"]);
/// assert_eq!(report.dropped_short, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    options: ParseOptions,
    delimiter: u8,
    quote: u8,
}

impl Parser {
    /// Validates the options and builds a parser.
    pub fn new(options: ParseOptions) -> Result<Self> {
        let delimiter = ascii_byte("delimiter", options.delimiter)?;
        let quote = ascii_byte("quote", options.quote)?;
        if delimiter == quote {
            return Err(IngestError::InvalidOption {
                option: "quote",
                reason: "must differ from the delimiter".to_string(),
            });
        }
        if options.min_columns == 0 {
            return Err(IngestError::InvalidOption {
                option: "min_columns",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Parser {
            options,
            delimiter,
            quote,
        })
    }

    /// Returns the options this parser was built from.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses text into records. Never fails.
    pub fn parse(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let (rows, quote_recovered) = self.split_rows(text);
        report.quote_recovered = quote_recovered;

        let mut rows = rows.into_iter().filter(|row| !is_blank(row)).peekable();

        report.headers = match &self.options.headers {
            Some(headers) => {
                if rows.peek().is_some_and(|first| self.is_header_row(first)) {
                    rows.next();
                    report.header_consumed = true;
                }
                headers.clone()
            }
            None => match rows.next() {
                Some(first) => {
                    report.header_consumed = true;
                    first.iter().map(str::to_string).collect()
                }
                None => Vec::new(),
            },
        };

        for row in rows {
            report.rows_seen += 1;
            if row.len() < self.options.min_columns {
                debug!(fields = row.len(), "dropping short row");
                report.dropped_short += 1;
                continue;
            }
            match self.build_record(&row, &report.headers) {
                Some(record) => report.records.push(record),
                None => report.dropped_nameless += 1,
            }
        }

        info!(
            records = report.records.len(),
            dropped = report.dropped(),
            header = report.header_consumed,
            "parsed catalog text"
        );
        report
    }

    fn is_header_row(&self, row: &StringRecord) -> bool {
        let first = match row.get(0) {
            Some(first) => first.to_lowercase(),
            None => return false,
        };
        self.options
            .header_tokens
            .iter()
            .any(|token| first.contains(&token.to_lowercase()))
    }

    fn build_record(&self, row: &StringRecord, headers: &[String]) -> Option<Record> {
        let column = |index: usize| row.get(index).unwrap_or("");

        let name = column(0);
        if name.is_empty() {
            return None;
        }

        let tags = column(4)
            .split(self.options.tag_delimiter)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        let mut record = Record::new(name, column(1), column(2), column(3), tags);
        for (index, value) in row.iter().enumerate().skip(fields::KNOWN.len()) {
            let key = match headers.get(index).filter(|h| !h.is_empty()) {
                Some(header) => header.clone(),
                None => format!("extra_{}", index),
            };
            record = record.with_extra(key, Cell::from_text(value));
        }
        Some(record)
    }

    fn reader(&self, quoting: bool) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quoting(quoting);
        builder
    }

    /// Splits text into raw rows, recovering from stray quotes.
    fn split_rows(&self, text: &str) -> (Vec<StringRecord>, bool) {
        let mut rows = Vec::new();
        let mut recovered = false;
        let mut offset = 0;

        'text: while offset < text.len() {
            let rest = &text[offset..];
            let mut reader = self.reader(true).from_reader(rest.as_bytes());
            let mut record = StringRecord::new();
            loop {
                let start = reader.position().byte() as usize;
                match reader.read_record(&mut record) {
                    Ok(false) => break 'text,
                    Ok(true) => {}
                    Err(err) => {
                        warn!(error = %err, "stopping at unreadable row");
                        break 'text;
                    }
                }
                let end = reader.position().byte() as usize;
                let Some(open) = self.broken_quote(rest[start..end].as_bytes()) else {
                    rows.push(record.clone());
                    continue;
                };

                let open = start + open;
                let line_end = rest[open..]
                    .find(['\r', '\n'])
                    .map_or(rest.len(), |at| open + at);
                warn!(
                    byte = offset + open,
                    "stray quote; splitting its line without quoting"
                );
                rows.extend(
                    self.reader(false)
                        .from_reader(rest[start..line_end].as_bytes())
                        .into_records()
                        .filter_map(|row| row.ok()),
                );
                recovered = true;
                offset += line_end;
                continue 'text;
            }
        }
        (rows, recovered)
    }

    /// Finds a quote in one record's span that did not delimit a field.
    ///
    /// Quotes are only special at the start of a field, and a doubled quote
    /// inside a quoted field is literal. A quoted field is broken when it
    /// runs to the end of the text, or when it crossed a line break and its
    /// closing quote is not followed by a delimiter or line end. Returns the
    /// offset of the opening quote.
    fn broken_quote(&self, span: &[u8]) -> Option<usize> {
        let is_break = |b: u8| b == b'\n' || b == b'\r';
        let mut field_start = true;
        // Opening offset and whether a line break was crossed since.
        let mut open: Option<(usize, bool)> = None;
        let mut i = 0;

        while i < span.len() {
            let b = span[i];
            match open {
                Some((at, crossed)) if b == self.quote => {
                    let next = span.get(i + 1).copied();
                    if next == Some(self.quote) {
                        i += 2;
                        continue;
                    }
                    let closes_field = match next {
                        Some(n) => n == self.delimiter || is_break(n),
                        None => true,
                    };
                    if crossed && !closes_field {
                        return Some(at);
                    }
                    open = None;
                    field_start = false;
                }
                Some((at, _)) => {
                    if is_break(b) {
                        open = Some((at, true));
                    }
                }
                None => {
                    if b == self.quote && field_start {
                        open = Some((i, false));
                    }
                    field_start = b == self.delimiter || is_break(b);
                }
            }
            i += 1;
        }
        open.map(|(at, _)| at)
    }
}

fn ascii_byte(option: &'static str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(IngestError::InvalidOption {
            option,
            reason: format!("{:?} is not an ASCII character", c),
        })
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(str::is_empty)
}

/// Parses text with default options.
pub fn parse_text(text: &str) -> ParseReport {
    Parser {
        options: ParseOptions::default(),
        delimiter: b',',
        quote: b'"',
    }
    .parse(text)
}
