//! Spreadsheet export of stored scans.
//!
//! One worksheet, header row first, then every row in id order. Missing
//! column values are left as empty cells.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use sqlx::SqlitePool;

use super::scans::{self, StoreError, StoredScan};

pub const EXPORT_FILENAME: &str = "scans.xlsx";
pub const EXPORT_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_HEADER: [&str; 7] = ["id", "pallet", "order_no", "phase", "part", "qty", "timestamp"];

/// Render every stored scan as an `.xlsx` workbook.
///
/// # Errors
///
/// Returns an error if the query or the workbook encoding fails.
pub async fn export_scans(pool: &SqlitePool) -> Result<Vec<u8>, StoreError> {
    let rows = scans::list_scans(pool).await?;
    render_workbook(&rows)
}

pub(crate) fn render_workbook(rows: &[StoredScan]) -> Result<Vec<u8>, StoreError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in (0u16..).zip(EXPORT_HEADER) {
        worksheet.write_string(0, col, name)?;
    }
    for (row, scan) in (1u32..).zip(rows) {
        write_scan_row(worksheet, row, scan)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[allow(clippy::cast_precision_loss)]
fn write_scan_row(worksheet: &mut Worksheet, row: u32, scan: &StoredScan) -> Result<(), XlsxError> {
    worksheet.write_number(row, 0, scan.id as f64)?;

    let text_cells = [(1, &scan.pallet), (2, &scan.order_no), (3, &scan.phase), (4, &scan.part), (6, &scan.timestamp)];
    for (col, value) in text_cells {
        if let Some(value) = value {
            worksheet.write_string(row, col, value)?;
        }
    }

    if let Some(qty) = scan.qty {
        worksheet.write_number(row, 5, qty as f64)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
