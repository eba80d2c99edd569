use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::AppError;
use crate::models::record::ImageRecord;
use crate::services::file_service;

pub const COLUMNS: &[&str] = &["image_url", "raw_text"];
const SHEET_NAME: &str = "Sheet1";

fn export_err(e: XlsxError) -> AppError {
    AppError::Export(e.to_string())
}

/// Writes the table as a spreadsheet: a header row `image_url`, `raw_text`
/// and one row per record in table order. Creates the destination directory
/// and overwrites any existing file at the path.
pub fn write_table(records: &[ImageRecord], output_file: &Path) -> Result<(), AppError> {
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            file_service::ensure_dir(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(export_err)?;

    let header = Format::new().set_bold();
    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header)
            .map_err(export_err)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;
        worksheet
            .write_string(row, 0, &record.image_path)
            .map_err(export_err)?;
        worksheet
            .write_string(row, 1, &record.raw_text)
            .map_err(export_err)?;
    }

    workbook.save(output_file).map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto, Reader};
    use std::fs;
    use std::path::PathBuf;

    fn record(path: &str, text: &str) -> ImageRecord {
        ImageRecord {
            image_path: path.to_string(),
            raw_text: text.to_string(),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cardlot_test_export_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut workbook = open_workbook_auto(path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_write_table_rows_in_order() {
        let dir = temp_dir("rows");
        let output = dir.join("lot_raw_text_extracted.xlsx");

        let records = vec![
            record("/lot/s1/a.jpg", "ACME Corp\nJane Doe"),
            record("/lot/s2/b.png", ""),
        ];
        write_table(&records, &output).unwrap();

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["image_url", "raw_text"]);
        assert_eq!(rows[1][0], "/lot/s1/a.jpg");
        assert_eq!(rows[1][1], "ACME Corp\nJane Doe");
        assert_eq!(rows[2][0], "/lot/s2/b.png");
        assert_eq!(rows[2][1], "");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_table_empty_has_header_only() {
        let dir = temp_dir("empty");
        let output = dir.join("empty.xlsx");

        write_table(&[], &output).unwrap();

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["image_url", "raw_text"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_table_creates_destination_dir() {
        let dir = temp_dir("mkdir");
        let output = dir.join("deep/out/result.xlsx");

        write_table(&[record("/lot/s1/a.jpg", "text")], &output).unwrap();

        assert!(output.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_table_overwrites_existing() {
        let dir = temp_dir("overwrite");
        let output = dir.join("result.xlsx");

        write_table(
            &[
                record("/lot/s1/a.jpg", "old a"),
                record("/lot/s1/b.jpg", "old b"),
            ],
            &output,
        )
        .unwrap();
        write_table(&[record("/lot/s1/c.jpg", "new c")], &output).unwrap();

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "/lot/s1/c.jpg");
        assert_eq!(rows[1][1], "new c");

        let _ = fs::remove_dir_all(&dir);
    }
}
