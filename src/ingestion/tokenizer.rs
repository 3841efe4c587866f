//! Hand-rolled tokenizer for the locations CSV dialect.
//!
//! The dialect is simpler than RFC 4180: a `"` toggles quoting and is dropped, there is no
//! escaped-quote form, and every field is trimmed. Existing source files depend on exactly this
//! behavior, including how an unbalanced quote swallows the rest of the line.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ImportError, ImportResult};

/// A line of source text together with its 1-based physical line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split `content` on `\n`, dropping lines that are blank after trimming.
///
/// A leading byte-order mark (Excel's "CSV UTF-8" export writes one) is not part of the first
/// line; `str::trim` would leave it glued to the first header.
pub fn nonblank_lines(content: &str) -> impl Iterator<Item = SourceLine<'_>> {
    content
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(content)
        .split('\n')
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx0, text)| SourceLine {
            number: idx0 + 1,
            text,
        })
}

/// Output of [`tokenize_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    pub fields: Vec<String>,
    /// The quote flag was still set at end of line.
    pub unbalanced_quotes: bool,
}

/// Tokenize one line, reporting whether its quotes were balanced.
pub fn tokenize_line(line: &str) -> TokenizedLine {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    TokenizedLine {
        fields,
        unbalanced_quotes: in_quotes,
    }
}

/// Split one line into trimmed fields, honoring quoted commas.
pub fn split_line(line: &str) -> Vec<String> {
    tokenize_line(line).fields
}

/// Split a line on every comma, with no quote handling.
pub(crate) fn split_plain(line: &str) -> Vec<String> {
    line.split(',').map(|s| s.trim().to_string()).collect()
}

/// Header name → column position, resolved once per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    len: usize,
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            // First occurrence wins for duplicated headers.
            positions.entry(name.clone()).or_insert(idx);
        }
        Self {
            len: names.len(),
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position of `name`, matched literally.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// One tokenized data row with name-based access.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a HeaderIndex,
    values: &'a [String],
}

impl<'a> Row<'a> {
    pub fn new(headers: &'a HeaderIndex, values: &'a [String]) -> Self {
        Self { headers, values }
    }

    /// Value under header `name`, or `""` if the header or cell is absent.
    pub fn get(&self, name: &str) -> &'a str {
        self.headers
            .position(name)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A data line of the locations table, tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based physical line number in the source file.
    pub line: usize,
    pub values: Vec<String>,
    pub unbalanced_quotes: bool,
}

/// The locations CSV: a header row plus tokenized data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTable {
    pub headers: HeaderIndex,
    pub records: Vec<RawRecord>,
}

impl LocationTable {
    /// Parse table text. Returns `None` when there is no header line.
    ///
    /// The header row is split on plain commas; only data rows get quote handling.
    pub fn parse(content: &str) -> Option<Self> {
        let mut lines = nonblank_lines(content);
        let header_line = lines.next()?;
        let headers = HeaderIndex::new(split_plain(header_line.text));

        let records = lines
            .map(|line| {
                let tokenized = tokenize_line(line.text);
                RawRecord {
                    line: line.number,
                    values: tokenized.fields,
                    unbalanced_quotes: tokenized.unbalanced_quotes,
                }
            })
            .collect();

        Some(Self { headers, records })
    }

    /// Read and parse the locations CSV at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).ok_or_else(|| ImportError::EmptyInput {
            path: path.to_path_buf(),
        })
    }

    /// Name-based view of `record`.
    pub fn row<'a>(&'a self, record: &'a RawRecord) -> Row<'a> {
        Row::new(&self.headers, &record.values)
    }
}
