use serde::Serialize;
use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::analysis::{LinearFit, NamedSeries, ResistanceSample};
use crate::metadata::RunMetadata;

/// Samples and fit of a completed resistance stage
#[derive(Debug, Clone, Serialize)]
pub struct ResistanceResult {
    /// Border samples in stream order
    pub samples: Vec<ResistanceSample>,
    /// Least-squares fit of voltage drop against current
    pub fit: LinearFit,
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Final run metadata
    pub metadata: RunMetadata,
    /// Requested cycles, in series order
    pub cycles: Vec<u32>,
    /// Aggregated per-cycle series
    pub series: Vec<NamedSeries>,
    /// Resistance stage result, `None` when the stage was skipped or dropped
    pub resistance: Option<ResistanceResult>,
    /// Number of parsed records
    pub record_count: usize,
}

impl RunReport {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let value = |v: Option<f64>| match v {
                Some(v) => style(v.to_string()).green().to_string(),
                None => style("not computed".to_string()).yellow().to_string(),
            };

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Cycler Run Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=================").cyan()));
            output.push_str(&format!(
                "{}: {} ({})\n",
                style("Sample").bold(),
                self.metadata.sample_id,
                self.metadata.remarks
            ));
            output.push_str(&format!("{}: {}\n", style("Records").bold(), self.record_count));
            output.push_str(&format!(
                "{}: {}\n",
                style("Discharge capacity (mAh/g)").bold(),
                value(self.metadata.discharge_capacity)
            ));
            output.push_str(&format!(
                "{}: {}\n",
                style("Oxidation degree").bold(),
                value(self.metadata.oxidation_degree)
            ));
            output.push_str(&format!(
                "{}: {}\n",
                style("Internal resistance (kOhm)").bold(),
                value(self.metadata.internal_resistance)
            ));
            if let Some(resistance) = &self.resistance {
                output.push_str(&format!(
                    "  {} samples, segment {:.3} mV\n",
                    resistance.samples.len(),
                    resistance.fit.intercept
                ));
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = |v: Option<f64>| v.map_or_else(|| "not computed".to_string(), |v| v.to_string());

        writeln!(f, "Cycler Run Report")?;
        writeln!(f, "=================")?;
        writeln!(f, "Sample: {} ({})", self.metadata.sample_id, self.metadata.remarks)?;
        writeln!(f, "Records: {}", self.record_count)?;
        writeln!(
            f,
            "Discharge capacity (mAh/g): {}",
            value(self.metadata.discharge_capacity)
        )?;
        writeln!(f, "Oxidation degree: {}", value(self.metadata.oxidation_degree))?;
        writeln!(
            f,
            "Internal resistance (kOhm): {}",
            value(self.metadata.internal_resistance)
        )?;
        if let Some(resistance) = &self.resistance {
            writeln!(
                f,
                "  {} samples, segment {:.3} mV",
                resistance.samples.len(),
                resistance.fit.intercept
            )?;
        }
        Ok(())
    }
}
