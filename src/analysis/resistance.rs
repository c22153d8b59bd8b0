use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::record::{MeasurementRecord, Mode};

/// Scale from milli- to micro-units (mA → μA) and from base to milli-units (V → mV)
pub const MICRO_PER_MILLI: f64 = 1000.0;

/// One resistance measurement taken at a Charge→Rest border
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceSample {
    /// Magnitude of the current at the border (μA)
    pub current: f64,
    /// Voltage drop across the border (mV)
    pub voltage_drop: f64,
}

/// Finds Charge→Rest borders of the resistance-probing pattern
#[derive(Debug, Clone, Copy)]
pub struct ResistanceExtractor {
    pattern: u32,
}

impl ResistanceExtractor {
    /// Extract borders belonging to `pattern`
    pub fn new(pattern: u32) -> Self {
        Self { pattern }
    }

    /// Whether any record carries the pattern at all
    pub fn pattern_present(&self, records: &[MeasurementRecord]) -> bool {
        records.iter().any(|r| r.pattern == self.pattern)
    }

    /// One sample per qualifying border, in stream order
    ///
    /// A border is an index `i` with `records[i]` in Rest and of the pattern,
    /// `records[i - 1]` in Charge and not on step 1 (the first charge step only
    /// settles the voltage). The drop is measured from `records[i - 1]` to
    /// `records[i + 1]`; a border on the last record has no successor and is
    /// skipped.
    pub fn extract(&self, records: &[MeasurementRecord]) -> Vec<ResistanceSample> {
        let mut samples = Vec::new();

        for (i, window) in records.windows(2).enumerate() {
            let (before, border) = (&window[0], &window[1]);
            if border.pattern != self.pattern
                || border.mode != Mode::Rest
                || before.mode != Mode::Charge
                || before.step == 1
            {
                continue;
            }

            let Some(after) = records.get(i + 2) else {
                warn!(
                    "Charge/Rest border at record {} has no following record; skipped",
                    i + 1
                );
                continue;
            };

            samples.push(ResistanceSample {
                current: (border.current * MICRO_PER_MILLI).abs(),
                voltage_drop: (before.voltage - after.voltage).abs() * MICRO_PER_MILLI,
            });
        }

        debug!(
            "Found {} resistance samples for pattern {}",
            samples.len(),
            self.pattern
        );
        samples
    }
}
