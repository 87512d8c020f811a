//! Delimiter Parser Module
//! Turns raw delimiter-separated text into an ordered sequence of typed records.
//!
//! Parsing fails soft: missing header or data rows yield an empty dataset, and
//! rows whose field count differs from the header are dropped.

use crate::data::{CellValue, DataError, Dataset, Record};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Field separators offered for input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
        }
    }

    /// Label shown in selection menus.
    pub fn label(self) -> &'static str {
        match self {
            Delimiter::Comma => "Comma (,)",
            Delimiter::Semicolon => "Semicolon (;)",
            Delimiter::Tab => "Tab (\\t)",
            Delimiter::Pipe => "Pipe (|)",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Delimiter {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," => return Ok(Delimiter::Comma),
            ";" => return Ok(Delimiter::Semicolon),
            "\t" | "\\t" => return Ok(Delimiter::Tab),
            "|" => return Ok(Delimiter::Pipe),
            _ => {}
        }
        Delimiter::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DataError::UnknownDelimiter(s.to_string()))
    }
}

/// Parser bound to one delimiter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedParser {
    delimiter: Delimiter,
}

impl DelimitedParser {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    /// Parse raw text into a dataset.
    ///
    /// Lines end with `\n` or `\r\n`. Surrounding whitespace of the whole
    /// text and empty lines are ignored; a line of bare delimiters is a row
    /// of empty text cells. The first line is the header. Quotes have no
    /// special meaning, so the delimiter always splits.
    pub fn parse(&self, text: &str) -> Dataset {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter.as_byte())
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(text.trim().as_bytes());

        let mut lines = reader
            .records()
            .filter_map(|line| match line {
                Ok(line) => Some(line),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable line");
                    None
                }
            });

        let Some(header_line) = lines.next() else {
            return Dataset::default();
        };
        let headers: Vec<String> = header_line
            .iter()
            .map(|cell| cell.trim().to_string())
            .collect();

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for line in lines {
            if line.len() != headers.len() {
                dropped += 1;
                continue;
            }
            let record: Record = headers
                .iter()
                .cloned()
                .zip(line.iter().map(CellValue::from_field))
                .collect();
            records.push(record);
        }

        if dropped > 0 {
            debug!(
                dropped,
                kept = records.len(),
                columns = headers.len(),
                "dropped rows with mismatched field count"
            );
        }

        Dataset::new(records)
    }
}

/// Parse `text` split on `delimiter`.
pub fn parse(text: &str, delimiter: Delimiter) -> Dataset {
    DelimitedParser::new(delimiter).parse(text)
}
