//! Property-based tests for the analysis and export stages

use chargelog::analysis::{
    LinearFit, NamedSeries, ResistanceExtractor, SeriesAggregator, SERIES_PER_CYCLE,
};
use chargelog::export::{PadPolicy, TableExporter};
use chargelog::record::{MeasurementRecord, Mode, RecordParser};
use proptest::prelude::*;

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Charge), Just(Mode::Discharge), Just(Mode::Rest)]
}

fn record() -> impl Strategy<Value = MeasurementRecord> {
    (mode(), 1u32..4, 1u32..4, 1u32..4, 0.0f64..5.0, -1.0f64..1.0, 0.0f64..300.0).prop_map(
        |(mode, pattern, cycle, step, voltage, current, capacity)| {
            MeasurementRecord::new(mode, pattern, cycle, step)
                .with_voltage(voltage)
                .with_current(current)
                .with_capacity(capacity)
        },
    )
}

proptest! {
    /// Every matching Charge/Discharge record lands in exactly two series
    #[test]
    fn test_aggregate_accounts_for_every_record(
        records in prop::collection::vec(record(), 0..200),
        cycles in prop::collection::vec(1u32..4, 1..4),
    ) {
        let series = SeriesAggregator::new(2, cycles.clone()).aggregate(&records);
        prop_assert_eq!(series.len(), cycles.len() * SERIES_PER_CYCLE);

        for (n, &cycle) in cycles.iter().enumerate() {
            let chunk = &series[n * SERIES_PER_CYCLE..(n + 1) * SERIES_PER_CYCLE];
            let count = |mode: Mode| {
                records.iter().filter(|r| r.pattern == 2 && r.cycle == cycle && r.mode == mode).count()
            };
            prop_assert_eq!(chunk[0].len(), count(Mode::Charge));
            prop_assert_eq!(chunk[1].len(), count(Mode::Charge));
            prop_assert_eq!(chunk[2].len(), count(Mode::Discharge));
            prop_assert_eq!(chunk[3].len(), count(Mode::Discharge));
        }
    }

    /// Least-squares residuals sum to zero
    #[test]
    fn test_fit_residuals_cancel(
        points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..50),
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let spread = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
            - x.iter().cloned().fold(f64::INFINITY, f64::min);
        prop_assume!(spread > 1.0);

        let fit = LinearFit::fit(&x, &y).unwrap();
        let residual: f64 = x.iter().zip(&y).map(|(&xi, &yi)| yi - fit.predict(xi)).sum();
        let scale: f64 = y.iter().map(|v| v.abs()).sum::<f64>() + 1.0;
        prop_assert!(residual.abs() < 1e-6 * scale, "residual sum {}", residual);
    }

    /// The grid is rectangular and pads exactly the missing cells
    #[test]
    fn test_grid_shape(
        lengths in prop::collection::vec(0usize..20, 1..10),
        empty in any::<bool>(),
    ) {
        let series: Vec<NamedSeries> = lengths
            .iter()
            .enumerate()
            .map(|(n, &len)| NamedSeries::new(format!("s{n}"), (0..len).map(|k| k as f64 + 0.5).collect()))
            .collect();
        let pad = if empty { PadPolicy::Empty } else { PadPolicy::Zero };
        let grid = TableExporter::new(pad).grid(&series);

        let height = lengths.iter().copied().max().unwrap_or(0);
        prop_assert_eq!(grid.len(), height + 1);
        for row in &grid {
            prop_assert_eq!(row.len(), series.len());
        }

        let padded = grid.iter().skip(1).flatten().filter(|cell| cell.as_str() == pad.literal()).count();
        let expected: usize = lengths.iter().map(|len| height - len).sum();
        prop_assert_eq!(padded, expected);
    }

    /// Extraction never panics and never yields more samples than borders
    #[test]
    fn test_extractor_total(records in prop::collection::vec(record(), 0..100)) {
        let samples = ResistanceExtractor::new(1).extract(&records);
        let borders = records
            .windows(2)
            .filter(|w| w[0].mode == Mode::Charge && w[1].mode == Mode::Rest && w[1].pattern == 1)
            .count();
        prop_assert!(samples.len() <= borders);
        prop_assert!(samples.iter().all(|s| s.current >= 0.0 && s.voltage_drop >= 0.0));
    }

    /// Arbitrary bytes either parse or fail with an error
    #[test]
    fn test_parser_total(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = RecordParser::default().parse_bytes(&bytes);
    }
}
