use crate::record::ColumnLayout;

/// Configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Pattern whose records form the charge/discharge curves
    pub cd_pattern: u32,

    /// Pattern whose Charge→Rest borders are resistance measurements
    pub ir_pattern: u32,

    /// Cycles to aggregate, in output order
    pub cycles: Vec<u32>,

    /// Column layout of the input file
    pub layout: ColumnLayout,

    /// Abort the run when the resistance fit fails instead of dropping the stage
    pub strict_resistance: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cd_pattern: 2,
            ir_pattern: 1,
            cycles: vec![1, 2],
            layout: ColumnLayout::default(),
            strict_resistance: false,
        }
    }
}

impl AnalysisConfig {
    /// Set the charge/discharge pattern
    pub fn with_cd_pattern(mut self, pattern: u32) -> Self {
        self.cd_pattern = pattern;
        self
    }

    /// Set the resistance pattern
    pub fn with_ir_pattern(mut self, pattern: u32) -> Self {
        self.ir_pattern = pattern;
        self
    }

    /// Set the cycles to aggregate
    pub fn with_cycles(mut self, cycles: Vec<u32>) -> Self {
        self.cycles = cycles;
        self
    }

    /// Set the input column layout
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Make resistance-fit failures fatal
    pub fn with_strict_resistance(mut self, strict: bool) -> Self {
        self.strict_resistance = strict;
        self
    }
}
