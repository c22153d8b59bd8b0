use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::{ColumnLayout, MeasurementRecord, Mode, ParseError};

/// Header values consumed from the fixed header lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFields {
    /// Free-text remarks entered on the instrument
    pub remarks: Option<String>,
    /// Sample identifier
    pub sample_id: Option<String>,
    /// Active-material mass as written by the instrument (mg)
    pub active_material_mass: Option<String>,
}

/// Result of parsing one cycler export
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    /// Header fields
    pub header: HeaderFields,
    /// Data records in source order
    pub records: Vec<MeasurementRecord>,
}

/// Positional parser for cycler exports
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    layout: ColumnLayout,
}

impl RecordParser {
    /// Create a parser for the given column layout
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    /// The layout this parser reads
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Read and parse a log file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedLog, ParseError> {
        let path = path.as_ref();
        info!("Parsing cycler log: {}", path.display());
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Parse raw file bytes
    ///
    /// Valid UTF-8 is taken as is. Anything else is decoded as Shift-JIS, which
    /// is what the instrument writes for its header text.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedLog, ParseError> {
        match std::str::from_utf8(bytes) {
            Ok(content) => self.parse_str(content),
            Err(_) => {
                let (content, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
                if had_errors {
                    warn!("Input is neither UTF-8 nor Shift-JIS; undecodable bytes replaced");
                }
                self.parse_str(&content)
            }
        }
    }

    /// Parse decoded file content
    pub fn parse_str(&self, content: &str) -> Result<ParsedLog, ParseError> {
        let header = self.parse_header(content);

        let body_offset: usize = content
            .split_inclusive('\n')
            .take(self.layout.header_lines)
            .map(str::len)
            .sum();
        let records = self.parse_body(&content[body_offset..])?;

        debug!(
            "Parsed {} records (sample ID: {:?})",
            records.len(),
            header.sample_id
        );

        Ok(ParsedLog { header, records })
    }

    fn parse_header(&self, content: &str) -> HeaderFields {
        let delimiter = char::from(self.layout.delimiter);
        let mut header = HeaderFields::default();

        for (index, line) in content.lines().take(self.layout.header_lines).enumerate() {
            let slot = match index {
                i if i == self.layout.remarks_line => &mut header.remarks,
                i if i == self.layout.sample_id_line => &mut header.sample_id,
                i if i == self.layout.mass_line => &mut header.active_material_mass,
                _ => continue,
            };

            let value = line
                .split(delimiter)
                .nth(1)
                .map(clean_field)
                .filter(|v| !v.is_empty());
            if let Some(value) = value {
                *slot = Some(value.to_string());
            }
        }

        header
    }

    fn parse_body(&self, body: &str) -> Result<Vec<MeasurementRecord>, ParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.layout.delimiter)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.iter().all(|field| clean_field(field).is_empty()) {
                continue;
            }

            let line = self.layout.header_lines
                + row
                    .position()
                    .map_or(records.len() + 1, |p| body_line(body, p.byte() as usize));
            records.push(self.cast_row(&row, line)?);
        }

        Ok(records)
    }

    fn cast_row(&self, row: &csv::StringRecord, line: usize) -> Result<MeasurementRecord, ParseError> {
        let layout = &self.layout;
        let malformed = |reason: String| ParseError::MalformedRecord {
            line,
            reason,
            content: row.iter().collect::<Vec<_>>().join(","),
        };

        if row.len() < layout.min_columns() {
            return Err(malformed(format!(
                "expected at least {} columns, found {}",
                layout.min_columns(),
                row.len()
            )));
        }

        let field = |index: usize| clean_field(row.get(index).unwrap_or_default());
        let number = |index: usize, name: &str| -> Result<f64, ParseError> {
            field(index).parse::<f64>().map_err(|_| {
                malformed(format!("{} column {}: invalid number {:?}", name, index, field(index)))
            })
        };
        let integer = |index: usize, name: &str| -> Result<u32, ParseError> {
            field(index).parse::<u32>().map_err(|_| {
                malformed(format!("{} column {}: invalid integer {:?}", name, index, field(index)))
            })
        };

        Ok(MeasurementRecord {
            voltage: number(layout.voltage, "voltage")?,
            current: number(layout.current, "current")?,
            capacity: number(layout.capacity, "capacity")?,
            cycle: integer(layout.cycle, "cycle")?,
            step: integer(layout.step, "step")?,
            mode: Mode::from_str(field(layout.mode))
                .map_err(|e| malformed(format!("mode column {}: {}", layout.mode, e)))?,
            pattern: integer(layout.pattern, "pattern")?,
        })
    }
}

/// 1-based line within `body` of the record starting at `byte`
///
/// The csv reader positions a record before any empty lines it skipped, so
/// those terminators are stepped over before counting.
fn body_line(body: &str, byte: usize) -> usize {
    let bytes = body.as_bytes();
    let mut start = byte.min(bytes.len());
    while matches!(bytes.get(start), Some(b'\r' | b'\n')) {
        start += 1;
    }
    1 + bytes[..start].iter().filter(|&&b| b == b'\n').count()
}

fn clean_field(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}
