use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use chargelog::record::{InstrumentRevision, Mode, RecordParser};

use super::Config;

/// Display header fields and record counts of a cycler log
pub fn run(file: PathBuf, config: Option<PathBuf>, revision: Option<InstrumentRevision>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let config = Config::load(config.as_deref())?;
    let parser = RecordParser::new(config.layout(revision)?);
    let log = parser
        .parse_file(&file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "<missing>".to_string());

    println!("Cycler Log Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    println!("Header:");
    println!("  Sample ID: {}", unset(&log.header.sample_id));
    println!("  Remarks: {}", unset(&log.header.remarks));
    println!("  Active material mass: {}", unset(&log.header.active_material_mass));
    println!();

    let mut counts: BTreeMap<(u32, u32, Mode), usize> = BTreeMap::new();
    for record in &log.records {
        *counts.entry((record.pattern, record.cycle, record.mode)).or_default() += 1;
    }

    println!("Records: {}", log.records.len());
    for ((pattern, cycle, mode), count) in &counts {
        println!("  pattern {:3}  cycle {:3}  {:<9} {:>8}", pattern, cycle, mode.as_str(), count);
    }

    Ok(())
}
