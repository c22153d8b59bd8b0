#![no_main]

use chargelog::analysis::{ResistanceExtractor, SeriesAggregator};
use chargelog::record::{ColumnLayout, RecordParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Short headers exercise the body path with less input
    for layout in [ColumnLayout::default(), ColumnLayout::default().with_header_lines(0)] {
        let Ok(log) = RecordParser::new(layout).parse_bytes(data) else {
            continue;
        };

        // Whatever parses must flow through the analysis stages without panicking
        let _ = SeriesAggregator::new(2, vec![1, 2]).aggregate(&log.records);
        let _ = ResistanceExtractor::new(1).extract(&log.records);
    }
});
