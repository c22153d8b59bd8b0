use chrono::{FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::record::HeaderFields;

use super::MetadataError;

/// Placeholder for text fields the input file did not provide
pub const UNSET: &str = "empty";

/// UTC offset of the run timestamp (JST)
pub const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Fixed column header of the run-history log
pub const HISTORY_COLUMNS: [&str; 9] = [
    "timestamp",
    "sample ID",
    "active material mass(mg)",
    "discharge capacity(mAh/g)",
    "IR(k ohm)",
    "remarks",
    "oxidation degree",
    "memo",
    "others",
];

/// Summary of one processing run
///
/// Computed quantities are `None` when they could not be computed, so "no data"
/// stays distinguishable from a computed zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Run start time, RFC 3339 in JST
    pub timestamp: String,
    /// Sample identifier
    pub sample_id: String,
    /// Active-material mass as written by the instrument (mg)
    pub active_material_mass: String,
    /// Peak discharge capacity over the requested cycles (mAh/g)
    pub discharge_capacity: Option<f64>,
    /// Internal resistance (kOhm)
    pub internal_resistance: Option<f64>,
    /// Free-text remarks from the instrument
    pub remarks: String,
    /// Capacity-retention ratio between the first two requested cycles
    pub oxidation_degree: Option<f64>,
    /// Free-text memo
    pub memo: String,
    /// Free-text others
    pub others: String,
}

impl RunMetadata {
    /// Create metadata with the given timestamp and every other field unset
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            sample_id: UNSET.to_string(),
            active_material_mass: UNSET.to_string(),
            discharge_capacity: None,
            internal_resistance: None,
            remarks: UNSET.to_string(),
            oxidation_degree: None,
            memo: String::new(),
            others: String::new(),
        }
    }

    /// Create metadata stamped with the current time in JST
    pub fn now() -> Self {
        let now = Utc::now();
        let timestamp = match FixedOffset::east_opt(JST_OFFSET_SECONDS) {
            Some(jst) => now.with_timezone(&jst).to_rfc3339(),
            None => now.to_rfc3339(),
        };
        Self::new(timestamp)
    }

    /// Take the sample fields found in the file header
    pub fn with_header(mut self, header: &HeaderFields) -> Self {
        if let Some(sample_id) = &header.sample_id {
            self.sample_id = sample_id.clone();
        }
        if let Some(mass) = &header.active_material_mass {
            self.active_material_mass = mass.clone();
        }
        if let Some(remarks) = &header.remarks {
            self.remarks = remarks.clone();
        }
        self
    }

    /// Record the capacity-derived results, rounded to 4 decimals
    pub fn with_capacity_results(
        mut self,
        discharge_capacity: Option<f64>,
        oxidation_degree: Option<f64>,
    ) -> Self {
        self.discharge_capacity = discharge_capacity.map(round4);
        self.oxidation_degree = oxidation_degree.map(round4);
        self
    }

    /// Record the internal resistance, rounded to 4 decimals
    pub fn with_internal_resistance(mut self, resistance: f64) -> Self {
        self.internal_resistance = Some(round4(resistance));
        self
    }

    /// Attach a free-text memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Attach free-text "others"
    pub fn with_others(mut self, others: impl Into<String>) -> Self {
        self.others = others.into();
        self
    }

    /// Base name for every output of this run: `<sample ID>_<remarks>`
    pub fn output_stem(&self) -> String {
        format!("{}_{}", self.sample_id, self.remarks)
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }

    /// Row for the history log, in [`HISTORY_COLUMNS`] order
    ///
    /// Absent values become empty cells.
    pub fn history_row(&self) -> [String; 9] {
        let number = |value: Option<f64>| value.map(format_value).unwrap_or_default();
        [
            self.timestamp.clone(),
            self.sample_id.clone(),
            self.active_material_mass.clone(),
            number(self.discharge_capacity),
            number(self.internal_resistance),
            self.remarks.clone(),
            number(self.oxidation_degree),
            self.memo.clone(),
            self.others.clone(),
        ]
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Round to 4 decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Text form of a numeric cell, always with a decimal point (`0.0`, `7.0`)
pub fn format_value(value: f64) -> String {
    format!("{value:?}")
}
