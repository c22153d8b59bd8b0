//! # Record Module
//!
//! This module turns the raw cycler export into typed [`MeasurementRecord`]
//! values plus the handful of header fields the run history cares about.
//!
//! ## File Structure
//!
//! The export is delimited text with two regions:
//!
//! 1. **Header** (the first [`ColumnLayout::header_lines`] lines): instrument and
//!    sample settings. Only three lines are consumed, by index, and only their
//!    second field is read.
//!
//! 2. **Body** (every following line): one instrument sample per line at fixed
//!    column positions. Every body line must parse; a single bad line aborts the
//!    run because downstream border detection depends on record adjacency.

mod error;
mod layout;
mod parser;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use error::ParseError;
pub use layout::{ColumnLayout, InstrumentRevision};
pub use parser::{HeaderFields, ParsedLog, RecordParser};

/// Operational phase of the cell for a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    /// Current flowing into the cell
    Charge,
    /// Current flowing out of the cell
    Discharge,
    /// Idle, no applied current
    Rest,
}

impl Mode {
    /// The literal used by the instrument export
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Charge => "Charge",
            Mode::Discharge => "Discharge",
            Mode::Rest => "Rest",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            m if m.eq_ignore_ascii_case("charge") => Ok(Mode::Charge),
            m if m.eq_ignore_ascii_case("discharge") => Ok(Mode::Discharge),
            m if m.eq_ignore_ascii_case("rest") => Ok(Mode::Rest),
            other => Err(format!("unknown mode {:?}", other)),
        }
    }
}

/// One instrument sample, in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Cell voltage (V)
    pub voltage: f64,
    /// Applied current (mA), signed
    pub current: f64,
    /// Specific capacity (mAh/g), signed
    pub capacity: f64,
    /// Cycle number
    pub cycle: u32,
    /// Step index within the cycle
    pub step: u32,
    /// Operational phase
    pub mode: Mode,
    /// Identifier of the measurement program that produced the sample
    pub pattern: u32,
}

impl MeasurementRecord {
    /// Create a record with zero voltage, current and capacity
    pub fn new(mode: Mode, pattern: u32, cycle: u32, step: u32) -> Self {
        Self {
            voltage: 0.0,
            current: 0.0,
            capacity: 0.0,
            cycle,
            step,
            mode,
            pattern,
        }
    }

    /// Set the voltage (V)
    pub fn with_voltage(mut self, voltage: f64) -> Self {
        self.voltage = voltage;
        self
    }

    /// Set the current (mA)
    pub fn with_current(mut self, current: f64) -> Self {
        self.current = current;
        self
    }

    /// Set the specific capacity (mAh/g)
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }
}
