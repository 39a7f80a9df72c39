use super::*;

const FAST: ScannerConfig = ScannerConfig { fps: 1000, qrbox: DEFAULT_QRBOX };

async fn collect(reader: Reader, input: &'static [u8]) -> Vec<ScanEvent> {
    let (tx, mut rx) = mpsc::channel(16);
    let handle = LineScanner::new(reader, input, FAST).render(tx);
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    handle.await.unwrap();
    events
}

#[test]
fn default_config_matches_widget_defaults() {
    let config = ScannerConfig::default();
    assert_eq!(config.fps, 10);
    assert_eq!(config.qrbox, 250);
    assert_eq!(config.decode_interval(), Duration::from_millis(100));
}

#[test]
fn zero_fps_is_clamped() {
    let config = ScannerConfig { fps: 0, qrbox: 0 };
    assert_eq!(config.decode_interval(), Duration::from_secs(1));
}

#[test]
fn reader_names() {
    assert_eq!(Reader::Pallet.as_str(), "pallet-reader");
    assert_eq!(Reader::Part.as_str(), "part-reader");
}

#[test]
fn decode_line_strips_crlf() {
    assert_eq!(decode_line(b"PAL-1\r\n").unwrap(), "PAL-1");
    assert_eq!(decode_line(b"PAL-1").unwrap(), "PAL-1");
    assert_eq!(decode_line(b"\n").unwrap(), "");
}

#[tokio::test]
async fn emits_one_event_per_line_in_order() {
    let events = collect(Reader::Part, b"PO1|CUT|PT1|2\nPO2|CUT|PT2|3\n").await;
    let texts: Vec<String> = events
        .into_iter()
        .map(|e| {
            assert_eq!(e.reader, Reader::Part);
            e.result.unwrap()
        })
        .collect();
    assert_eq!(texts, vec!["PO1|CUT|PT1|2", "PO2|CUT|PT2|3"]);
}

#[tokio::test]
async fn final_line_without_newline_is_emitted() {
    let events = collect(Reader::Pallet, b"PAL-1\nPAL-2").await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].result.as_deref().unwrap(), "PAL-2");
}

#[tokio::test]
async fn blank_line_is_an_empty_decode() {
    let events = collect(Reader::Pallet, b"\n").await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].result.as_deref().unwrap(), "");
}

#[tokio::test]
async fn invalid_utf8_is_reported_and_scanning_continues() {
    let events = collect(Reader::Part, b"\xff\xfe\nPO1|CUT|PT1|1\n").await;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0].result, Err(ScanError::Encoding)));
    assert_eq!(events[1].result.as_deref().unwrap(), "PO1|CUT|PT1|1");
}

#[tokio::test]
async fn open_input_missing_path_fails() {
    assert!(open_input("/nonexistent/palletscan/scanner").await.is_err());
}

#[tokio::test]
async fn join_scanner_reports_clean_exit() {
    let handle = LineScanner::new(Reader::Pallet, &b"PAL-1\n"[..], FAST).render(mpsc::channel(4).0);
    assert!(join_scanner(Reader::Pallet, handle).await);
}

#[tokio::test]
async fn join_scanner_reports_panicked_task() {
    let handle = tokio::spawn(async { panic!("scanner backend crashed") });
    assert!(!join_scanner(Reader::Part, handle).await);
}
