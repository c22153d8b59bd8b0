/// Errors that can occur while rendering a plot
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Drawing backend failure
    #[error("Failed to render plot: {0}")]
    Plot(String),

    /// Nothing to draw
    #[error("Nothing to plot: {0}")]
    NoData(String),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Plot(format!("{value:?}"))
    }
}
