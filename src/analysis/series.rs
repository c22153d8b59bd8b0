use log::debug;
use serde::{Deserialize, Serialize};

use crate::record::{MeasurementRecord, Mode};

/// Number of series produced per requested cycle
pub const SERIES_PER_CYCLE: usize = 4;

/// The quantity a series holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Capacity while charging (mAh/g)
    ChargeCapacity,
    /// Voltage while charging (V)
    ChargeVoltage,
    /// Capacity while discharging (mAh/g)
    DischargeCapacity,
    /// Voltage while discharging (V)
    DischargeVoltage,
}

impl SeriesKind {
    /// Per-cycle emission order
    pub const ALL: [SeriesKind; SERIES_PER_CYCLE] = [
        SeriesKind::ChargeCapacity,
        SeriesKind::ChargeVoltage,
        SeriesKind::DischargeCapacity,
        SeriesKind::DischargeVoltage,
    ];

    /// Mode a record must have to contribute
    pub fn mode(&self) -> Mode {
        match self {
            SeriesKind::ChargeCapacity | SeriesKind::ChargeVoltage => Mode::Charge,
            SeriesKind::DischargeCapacity | SeriesKind::DischargeVoltage => Mode::Discharge,
        }
    }

    /// Label for the given cycle, e.g. `1_Charge_mAh/g`
    pub fn label(&self, cycle: u32) -> String {
        let unit = match self {
            SeriesKind::ChargeCapacity | SeriesKind::DischargeCapacity => "mAh/g",
            SeriesKind::ChargeVoltage | SeriesKind::DischargeVoltage => "V",
        };
        format!("{}_{}_{}", cycle, self.mode(), unit)
    }

    fn value(&self, record: &MeasurementRecord) -> f64 {
        match self {
            SeriesKind::ChargeCapacity | SeriesKind::DischargeCapacity => record.capacity,
            SeriesKind::ChargeVoltage | SeriesKind::DischargeVoltage => record.voltage,
        }
    }
}

/// A labelled, ordered sequence of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    label: String,
    data: Vec<f64>,
}

impl NamedSeries {
    /// Create a series
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }

    /// Series label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Series values in record order
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series holds no values
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest value, `None` when empty
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }
}

/// Groups records of one pattern into per-cycle series
#[derive(Debug, Clone)]
pub struct SeriesAggregator {
    pattern: u32,
    cycles: Vec<u32>,
}

impl SeriesAggregator {
    /// Aggregate records of `pattern` for the given cycles, in the given order
    pub fn new(pattern: u32, cycles: Vec<u32>) -> Self {
        Self { pattern, cycles }
    }

    /// Requested cycles
    pub fn cycles(&self) -> &[u32] {
        &self.cycles
    }

    /// Build [`SERIES_PER_CYCLE`] series per requested cycle
    ///
    /// Series come out in cycle-list order, and within a cycle in
    /// [`SeriesKind::ALL`] order. Values keep record order. A cycle with no
    /// matching records yields empty series.
    pub fn aggregate(&self, records: &[MeasurementRecord]) -> Vec<NamedSeries> {
        let mut table = Vec::with_capacity(self.cycles.len() * SERIES_PER_CYCLE);

        for &cycle in &self.cycles {
            let mut columns: [Vec<f64>; SERIES_PER_CYCLE] = Default::default();
            for record in self.matching(records, cycle) {
                for (kind, column) in SeriesKind::ALL.iter().zip(columns.iter_mut()) {
                    if record.mode == kind.mode() {
                        column.push(kind.value(record));
                    }
                }
            }

            debug!(
                "Cycle {}: {} charge / {} discharge points",
                cycle,
                columns[0].len(),
                columns[2].len()
            );

            for (kind, data) in SeriesKind::ALL.iter().zip(columns) {
                table.push(NamedSeries::new(kind.label(cycle), data));
            }
        }

        table
    }

    /// Peak discharge capacity over every requested cycle
    ///
    /// `None` when no discharge record of the pattern falls in a requested cycle.
    pub fn max_discharge_capacity(&self, records: &[MeasurementRecord]) -> Option<f64> {
        self.cycles
            .iter()
            .filter_map(|&cycle| {
                self.matching(records, cycle)
                    .filter(|r| r.mode == Mode::Discharge)
                    .map(|r| r.capacity)
                    .reduce(f64::max)
            })
            .reduce(f64::max)
    }

    fn matching<'a>(
        &'a self,
        records: &'a [MeasurementRecord],
        cycle: u32,
    ) -> impl Iterator<Item = &'a MeasurementRecord> + 'a {
        records
            .iter()
            .filter(move |r| r.pattern == self.pattern && r.cycle == cycle)
    }
}
