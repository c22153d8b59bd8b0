use super::*;

/// Builds an 18-line header followed by the given data rows.
fn sample_log(rows: &[&str]) -> String {
    let mut lines: Vec<String> = (0..18).map(|i| format!("Header{},value{}", i, i)).collect();
    lines[4] = "Remarks,\"LiCoO2 test\"".to_string();
    lines[7] = "Sample,\"S-042\"".to_string();
    lines[12] = "Mass(mg),1.25".to_string();
    lines.extend(rows.iter().map(|r| r.to_string()));
    lines.join("\r\n")
}

fn row(v: f64, i: f64, cap: f64, cycle: u32, step: u32, mode: &str, pattern: u32) -> String {
    format!(
        "00:00:01,{v},{i},0.0,0.0,{cap},0.0,0.0,00:00:01,00:00:01,{cycle},{step},{mode},{pattern}"
    )
}

#[test]
fn test_header_fields() {
    let log = sample_log(&[]);
    let parsed = RecordParser::default().parse_str(&log).unwrap();

    assert_eq!(parsed.header.remarks.as_deref(), Some("LiCoO2 test"));
    assert_eq!(parsed.header.sample_id.as_deref(), Some("S-042"));
    assert_eq!(parsed.header.active_material_mass.as_deref(), Some("1.25"));
    assert!(parsed.records.is_empty());
}

#[test]
fn test_header_missing_value_stays_unset() {
    let mut lines: Vec<String> = (0..18).map(|i| format!("Header{}", i)).collect();
    lines[7] = "Sample".to_string();
    let parsed = RecordParser::default().parse_str(&lines.join("\n")).unwrap();

    assert_eq!(parsed.header.sample_id, None);
}

#[test]
fn test_parse_records_in_order() {
    let rows = [
        row(3.1, 0.5, 10.0, 1, 2, "Charge", 2),
        row(3.0, 0.0, 10.0, 1, 3, "Rest", 2),
        row(2.9, -0.5, 5.0, 1, 4, "Discharge", 2),
    ];
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let parsed = RecordParser::default().parse_str(&sample_log(&refs)).unwrap();

    assert_eq!(parsed.records.len(), 3);
    let first = &parsed.records[0];
    assert_eq!(first.voltage, 3.1);
    assert_eq!(first.current, 0.5);
    assert_eq!(first.capacity, 10.0);
    assert_eq!(first.cycle, 1);
    assert_eq!(first.step, 2);
    assert_eq!(first.mode, Mode::Charge);
    assert_eq!(first.pattern, 2);
    assert_eq!(parsed.records[1].mode, Mode::Rest);
    assert_eq!(parsed.records[2].mode, Mode::Discharge);
    assert_eq!(parsed.records[2].current, -0.5);
}

#[test]
fn test_quoted_fields_and_blank_lines() {
    let rows = [
        "\"00:00:01\",\"1.0\",\"0.1\",0,0,\"2.5\",0,0,0,0,\"1\",\"2\",\"Charge\",\"1\"",
        "",
    ];
    let parsed = RecordParser::default().parse_str(&sample_log(&rows)).unwrap();

    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].capacity, 2.5);
    assert_eq!(parsed.records[0].mode, Mode::Charge);
}

#[test]
fn test_malformed_number_reports_line() {
    let good = row(1.0, 0.1, 0.0, 1, 1, "Charge", 1);
    let bad = "00:00:01,abc,0.1,0,0,0,0,0,0,0,1,1,Charge,1";
    let parsed = RecordParser::default().parse_str(&sample_log(&[&good, bad]));

    match parsed {
        Err(ParseError::MalformedRecord { line, reason, .. }) => {
            // 18 header lines, then the good row on line 19
            assert_eq!(line, 20);
            assert!(reason.contains("voltage"), "reason was {reason}");
        }
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_line_number_counts_skipped_blank_lines() {
    let bad = "00:00,abc,0.1,0,0,0,0,0,0,0,1,1,Charge,1";
    let parsed = RecordParser::default().parse_str(&sample_log(&["", "", bad]));

    match parsed {
        Err(ParseError::MalformedRecord { line, .. }) => assert_eq!(line, 21),
        other => panic!("expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_line_number_after_blank_lines_between_rows() {
    let good = row(1.0, 0.1, 0.0, 1, 1, "Charge", 1);
    let bad = row(1.0, 0.1, 0.0, 1, 1, "Pause", 1);
    let parsed = RecordParser::default().parse_str(&sample_log(&[&good, "", "", &bad]));

    assert!(matches!(parsed, Err(ParseError::MalformedRecord { line: 22, .. })));
}

#[test]
fn test_insufficient_columns_is_fatal() {
    let parsed = RecordParser::default().parse_str(&sample_log(&["00:00:01,1.0,0.1"]));
    assert!(matches!(parsed, Err(ParseError::MalformedRecord { line: 19, .. })));
}

#[test]
fn test_unknown_mode_is_fatal() {
    let bad = row(1.0, 0.1, 0.0, 1, 1, "Pause", 1);
    let parsed = RecordParser::default().parse_str(&sample_log(&[&bad]));
    assert!(matches!(parsed, Err(ParseError::MalformedRecord { .. })));
}

#[test]
fn test_non_utf8_header_is_tolerated() {
    let mut bytes = b"\x83\x65\x83\x58\x83\x67,\x82\xa0\n".to_vec();
    bytes.extend(sample_log(&[&row(1.0, 0.1, 0.0, 1, 1, "Charge", 1)]).lines().skip(1).flat_map(|l| {
        let mut line = l.as_bytes().to_vec();
        line.push(b'\n');
        line
    }));

    let parsed = RecordParser::default().parse_bytes(&bytes).unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.header.sample_id.as_deref(), Some("S-042"));
}

#[test]
fn test_shift_jis_header_is_decoded() {
    let content = sample_log(&[&row(1.0, 0.1, 0.0, 1, 1, "Charge", 1)]);
    let (before, after) = content.split_once("\"LiCoO2 test\"").unwrap();
    let mut bytes = before.as_bytes().to_vec();
    bytes.extend_from_slice(b"\x90\xb3\x8b\xc9");
    bytes.extend_from_slice(after.as_bytes());

    let parsed = RecordParser::default().parse_bytes(&bytes).unwrap();
    assert_eq!(parsed.header.remarks.as_deref(), Some("正極"));
    assert_eq!(parsed.header.sample_id.as_deref(), Some("S-042"));
    assert_eq!(parsed.records.len(), 1);
}

#[test]
fn test_utf8_header_is_kept() {
    let content = sample_log(&[]).replace("LiCoO2 test", "正極");
    let parsed = RecordParser::default().parse_bytes(content.as_bytes()).unwrap();
    assert_eq!(parsed.header.remarks.as_deref(), Some("正極"));
}

#[test]
fn test_layout_overrides() {
    let layout = ColumnLayout::for_revision(InstrumentRevision::Sd8Legacy)
        .with_header_lines(2)
        .with_delimiter(b';');
    assert_eq!(layout.min_columns(), 14);

    let content = "a;b\nc;d\n0;1.5;0.2;0;0;7.0;0;0;0;0;3;2;Discharge;4\n";
    let parsed = RecordParser::new(layout).parse_str(content).unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].cycle, 3);
    assert_eq!(parsed.records[0].pattern, 4);
}

#[test]
fn test_mode_parsing() {
    assert_eq!("Charge".parse::<Mode>(), Ok(Mode::Charge));
    assert_eq!(" rest ".parse::<Mode>(), Ok(Mode::Rest));
    assert!("Idle".parse::<Mode>().is_err());
    assert_eq!(Mode::Discharge.to_string(), "Discharge");
}
