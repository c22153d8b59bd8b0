use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::export::{HistoryLog, PadPolicy, TableExporter};

use super::{PipelineError, RunReport};

/// Directories the run reads from and writes to
#[derive(Debug, Clone)]
pub struct OutputDirs {
    /// Where unprocessed logs wait
    pub import_dir: PathBuf,
    /// Exported tables and the history log
    pub result_dir: PathBuf,
    /// Rendered plots
    pub figure_dir: PathBuf,
    /// Processed input logs
    pub rawdata_dir: PathBuf,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            import_dir: PathBuf::from("./untreated"),
            result_dir: PathBuf::from("./result"),
            figure_dir: PathBuf::from("./figure"),
            rawdata_dir: PathBuf::from("./rawdata"),
        }
    }
}

/// Which outputs to produce
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Padding of the exported table
    pub pad: PadPolicy,
    /// Render plots (ignored without the `plotting` feature)
    pub plots: bool,
    /// Move the input log into the rawdata directory afterwards
    pub relocate_input: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            pad: PadPolicy::Zero,
            plots: true,
            relocate_input: true,
        }
    }
}

/// Paths of everything a run wrote
#[derive(Debug, Clone, Default)]
pub struct WrittenOutputs {
    /// Exported table
    pub table: PathBuf,
    /// History log the run was appended to
    pub history: PathBuf,
    /// Rendered plots
    pub figures: Vec<PathBuf>,
    /// New location of the input log, if it was moved
    pub relocated_input: Option<PathBuf>,
}

/// Places the outputs of a run on disk
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    dirs: OutputDirs,
    options: OutputOptions,
}

impl OutputWriter {
    /// Create an output writer
    pub fn new(dirs: OutputDirs, options: OutputOptions) -> Self {
        Self { dirs, options }
    }

    /// Configured directories
    pub fn dirs(&self) -> &OutputDirs {
        &self.dirs
    }

    /// First `*.csv` file in the import directory, in name order
    pub fn find_input(&self) -> io::Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = fs::read_dir(&self.dirs.import_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        candidates.sort();
        Ok(candidates.into_iter().next())
    }

    /// Write plots, the exported table and the history row, then move the input
    ///
    /// Plot failures are logged and skipped; every other failure aborts before
    /// the input is moved.
    pub fn write(&self, report: &RunReport, input: &Path) -> Result<WrittenOutputs, PipelineError> {
        let stem = report.metadata.output_stem();
        for dir in [&self.dirs.result_dir, &self.dirs.figure_dir, &self.dirs.rawdata_dir] {
            fs::create_dir_all(dir)?;
        }

        let mut written = WrittenOutputs::default();

        if self.options.plots {
            written.figures = self.render_figures(report, &stem);
        }

        written.table = self.dirs.result_dir.join(format!("{stem}_forsma4.csv"));
        TableExporter::new(self.options.pad).write_file(&report.series, &written.table)?;

        let history = HistoryLog::in_dir(&self.dirs.result_dir);
        history.append(&report.metadata)?;
        written.history = history.path().to_path_buf();

        if self.options.relocate_input {
            let target = self.dirs.rawdata_dir.join(format!("{stem}_rawdata.csv"));
            move_file(input, &target)?;
            info!("Moved {} to {}", input.display(), target.display());
            written.relocated_input = Some(target);
        }

        Ok(written)
    }

    #[cfg(feature = "plotting")]
    fn render_figures(&self, report: &RunReport, stem: &str) -> Vec<PathBuf> {
        use crate::plot::{render_curves, render_resistance, PlotStyle};

        let mut figures = Vec::new();

        if let Some(resistance) = &report.resistance {
            let path = self.dirs.figure_dir.join(format!("{stem}_irfig.png"));
            match render_resistance(&path, &resistance.samples, &resistance.fit, &PlotStyle::resistance()) {
                Ok(()) => figures.push(path),
                Err(e) => warn!("Skipping resistance plot: {}", e),
            }
        }

        let path = self.dirs.figure_dir.join(format!("{stem}_carvefig.png"));
        match render_curves(&path, &report.series, &report.cycles, &PlotStyle::curves()) {
            Ok(()) => figures.push(path),
            Err(e) => warn!("Skipping curve plot: {}", e),
        }

        figures
    }

    #[cfg(not(feature = "plotting"))]
    fn render_figures(&self, _report: &RunReport, _stem: &str) -> Vec<PathBuf> {
        warn!("Plots requested but the binary was built without the plotting feature");
        Vec::new()
    }
}

/// Rename, falling back to copy-and-delete across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
