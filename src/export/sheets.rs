//! Spreadsheet (.xlsx) workbooks for the monthly ledger and the yearly checkpoints
//!
//! Same columns as the CSV tables; currency cells are numbers formatted with
//! two decimals rather than text.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::tables::{currency, ANNUAL_HEADERS, MONTHLY_HEADERS};
use crate::projection::ProjectionResult;

const MONTHLY_SHEET: &str = "Monthly";
const ANNUAL_SHEET: &str = "Annual";
const CURRENCY_FORMAT: &str = "#,##0.00";
const COLUMN_WIDTH: f64 = 16.0;

/// Workbook with one row per simulated month
pub fn monthly_workbook(result: &ProjectionResult) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format(CURRENCY_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(MONTHLY_SHEET)?;
    write_header(sheet, &MONTHLY_HEADERS)?;

    for (index, record) in result.monthly().iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_number(row, 0, record.month)?;
        let values = [
            record.gross_balance,
            record.real_balance,
            record.contribution,
            record.interest,
            record.tax,
            record.cumulative_contributions,
            record.cumulative_interest,
            record.cumulative_tax,
        ];
        for (offset, value) in values.into_iter().enumerate() {
            sheet.write_number_with_format(row, offset as u16 + 1, cell(value), &money)?;
        }
    }

    Ok(workbook)
}

/// Workbook with one row per yearly checkpoint, partial year included
pub fn annual_workbook(result: &ProjectionResult) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format(CURRENCY_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(ANNUAL_SHEET)?;
    write_header(sheet, &ANNUAL_HEADERS)?;

    for (index, checkpoint) in result.annual().iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_string(row, 0, checkpoint.label())?;
        sheet.write_number(row, 1, checkpoint.month)?;
        sheet.write_number_with_format(row, 2, cell(checkpoint.gross_balance), &money)?;
        sheet.write_number_with_format(row, 3, cell(checkpoint.real_balance), &money)?;
    }

    Ok(workbook)
}

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn cell(value: Decimal) -> f64 {
    currency(value).to_f64().unwrap_or(f64::NAN)
}
