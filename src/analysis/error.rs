/// Errors that can occur while deriving results from records
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The fit received no samples
    #[error("Line fit needs at least one sample")]
    InsufficientSamples,

    /// The fit inputs have different lengths
    #[error("Line fit inputs differ in length: {x} x values, {y} y values")]
    LengthMismatch {
        /// Number of x values
        x: usize,
        /// Number of y values
        y: usize,
    },

    /// Every current value is identical, so the slope is undefined
    #[error("Degenerate line fit: all currents are identical (currents {currents:?}, voltage drops {voltage_drops:?})")]
    DegenerateFit {
        /// The offending current values
        currents: Vec<f64>,
        /// Voltage drops paired with `currents`
        voltage_drops: Vec<f64>,
    },

    /// The reference charge capacity of the oxidation ratio is zero
    #[error("Oxidation degree undefined: peak of series {label} is zero")]
    ZeroReferenceCapacity {
        /// Label of the reference series
        label: String,
    },
}
