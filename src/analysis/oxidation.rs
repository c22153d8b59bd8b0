use super::{AnalysisError, NamedSeries, SERIES_PER_CYCLE};

/// Oxidation degree `1 - max(first charge capacity) / max(second charge capacity)`
///
/// `series` is the output of [`SeriesAggregator::aggregate`](super::SeriesAggregator::aggregate):
/// index 0 is the first requested cycle's charge capacity and index
/// [`SERIES_PER_CYCLE`] the second's. Returns `Ok(None)` when fewer than two
/// cycles were requested or either series is empty.
pub fn oxidation_degree(series: &[NamedSeries]) -> Result<Option<f64>, AnalysisError> {
    let (Some(first), Some(second)) = (series.first(), series.get(SERIES_PER_CYCLE)) else {
        return Ok(None);
    };
    let (Some(first_peak), Some(second_peak)) = (first.max(), second.max()) else {
        return Ok(None);
    };

    if second_peak == 0.0 {
        return Err(AnalysisError::ZeroReferenceCapacity {
            label: second.label().to_string(),
        });
    }

    Ok(Some(1.0 - first_peak / second_peak))
}
