use serde::{Deserialize, Serialize};

/// Instrument firmware revisions with a known export layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstrumentRevision {
    /// Current SD8 firmware
    #[default]
    Sd8,
    /// Older SD8 units
    Sd8Legacy,
}

/// Positional layout of a cycler export
///
/// Column indices are 0-based field positions in a data row; line indices are
/// 0-based positions within the header region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Number of leading header lines before the first data row
    pub header_lines: usize,
    /// Field delimiter
    pub delimiter: u8,
    /// Header line holding the remarks
    pub remarks_line: usize,
    /// Header line holding the sample ID
    pub sample_id_line: usize,
    /// Header line holding the active-material mass (mg)
    pub mass_line: usize,
    /// Voltage column (V)
    pub voltage: usize,
    /// Current column (mA)
    pub current: usize,
    /// Specific capacity column (mAh/g)
    pub capacity: usize,
    /// Cycle number column
    pub cycle: usize,
    /// Step number column
    pub step: usize,
    /// Mode literal column
    pub mode: usize,
    /// Pattern number column
    pub pattern: usize,
}

impl ColumnLayout {
    /// Layout preset for a firmware revision
    pub fn for_revision(revision: InstrumentRevision) -> Self {
        match revision {
            // time, V, I, W, Ah(step), Ah/g(step), Wh(step), Wh/g(step),
            // cycle time, step time, cycle, step, mode, pattern
            InstrumentRevision::Sd8 => Self {
                header_lines: 18,
                delimiter: b',',
                remarks_line: 4,
                sample_id_line: 7,
                mass_line: 12,
                voltage: 1,
                current: 2,
                capacity: 5,
                cycle: 10,
                step: 11,
                mode: 12,
                pattern: 13,
            },
            // Same positions today; kept separate so either revision can be
            // re-mapped on its own.
            InstrumentRevision::Sd8Legacy => Self {
                header_lines: 18,
                delimiter: b',',
                remarks_line: 4,
                sample_id_line: 7,
                mass_line: 12,
                voltage: 1,
                current: 2,
                capacity: 5,
                cycle: 10,
                step: 11,
                mode: 12,
                pattern: 13,
            },
        }
    }

    /// Override the header length
    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// Override the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Minimum number of fields a data row must carry
    pub fn min_columns(&self) -> usize {
        [
            self.voltage,
            self.current,
            self.capacity,
            self.cycle,
            self.step,
            self.mode,
            self.pattern,
        ]
        .into_iter()
        .max()
        .map_or(0, |max| max + 1)
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::for_revision(InstrumentRevision::default())
    }
}
