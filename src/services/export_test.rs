use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};

use super::*;
use crate::db::test_helpers::memory_pool;
use crate::services::scans::{NewScan, record_scan_at};

fn stored(id: i64, pallet: Option<&str>, qty: Option<i64>) -> StoredScan {
    StoredScan {
        id,
        pallet: pallet.map(str::to_owned),
        order_no: Some("PO123".to_owned()),
        phase: Some("CUT".to_owned()),
        part: Some("PT55".to_owned()),
        qty,
        timestamp: Some("2024-01-01T00:00:00.000000".to_owned()),
    }
}

/// Read the first worksheet back as rows of cells.
fn read_sheet(bytes: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range.rows().map(<[Data]>::to_vec).collect()
}

fn text(value: &str) -> Data {
    Data::String(value.to_owned())
}

fn header_row() -> Vec<Data> {
    EXPORT_HEADER.iter().map(|name| text(name)).collect()
}

#[test]
fn workbook_is_a_zip_container() {
    let bytes = render_workbook(&[]).unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));
}

#[test]
fn empty_export_has_header_only() {
    let rows = read_sheet(render_workbook(&[]).unwrap());
    assert_eq!(rows, vec![header_row()]);
}

#[test]
fn rows_follow_header_in_order() {
    let bytes = render_workbook(&[stored(1, Some("PAL-1"), Some(7)), stored(2, Some("PAL-2"), Some(1))]).unwrap();
    let rows = read_sheet(bytes);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], header_row());
    assert_eq!(
        rows[1],
        vec![
            Data::Float(1.0),
            text("PAL-1"),
            text("PO123"),
            text("CUT"),
            text("PT55"),
            Data::Float(7.0),
            text("2024-01-01T00:00:00.000000"),
        ]
    );
    assert_eq!(rows[2][1], text("PAL-2"));
    assert_eq!(rows[2][5], Data::Float(1.0));
}

#[test]
fn null_columns_are_empty_cells() {
    let rows = read_sheet(render_workbook(&[stored(3, None, None)]).unwrap());
    assert_eq!(rows[1][0], Data::Float(3.0));
    assert_eq!(rows[1][1], Data::Empty);
    assert_eq!(rows[1][5], Data::Empty);
    assert_eq!(rows[1][6], text("2024-01-01T00:00:00.000000"));
}

#[tokio::test]
async fn export_scans_reads_from_store() {
    let pool = memory_pool().await;
    let scan = NewScan {
        pallet: "PAL-9".to_owned(),
        order_no: "PO9".to_owned(),
        phase: "WELD".to_owned(),
        part: "PT9".to_owned(),
        qty: 3,
    };
    record_scan_at(&pool, &scan, "2024-05-06T01:02:03.000004").await.unwrap();

    let rows = read_sheet(export_scans(&pool).await.unwrap());
    assert_eq!(
        rows,
        vec![
            header_row(),
            vec![
                Data::Float(1.0),
                text("PAL-9"),
                text("PO9"),
                text("WELD"),
                text("PT9"),
                Data::Float(3.0),
                text("2024-05-06T01:02:03.000004"),
            ],
        ]
    );
}
