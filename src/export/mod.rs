//! File export of a finished projection
//!
//! Exporters only read `ProjectionResult`; nothing here recomputes a balance.

pub mod charts;
pub mod sheets;
pub mod tables;

use log::info;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::projection::ProjectionResult;
use charts::LineChart;

pub const MONTHLY_CSV: &str = "monthly_ledger.csv";
pub const ANNUAL_CSV: &str = "annual_summary.csv";
pub const MONTHLY_XLSX: &str = "monthly_ledger.xlsx";
pub const ANNUAL_XLSX: &str = "annual_summary.xlsx";
pub const BALANCE_CHART: &str = "balance_over_time.svg";
pub const COMPOSITION_CHART: &str = "composition_over_time.svg";

/// Paths written by an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
}

/// Writes tables, spreadsheets and charts into one output directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write both CSV tables, both workbooks and both charts
    pub fn export_all(&self, result: &ProjectionResult) -> Result<ExportReport, ExportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut files = self.export_tables(result)?;
        files.extend(self.export_sheets(result)?);
        files.extend(self.export_charts(result)?);

        info!("exported {} files to {}", files.len(), self.output_dir.display());
        Ok(ExportReport { files })
    }

    /// Write the monthly and annual CSV tables
    pub fn export_tables(&self, result: &ProjectionResult) -> Result<Vec<PathBuf>, ExportError> {
        let monthly = self.output_dir.join(MONTHLY_CSV);
        tables::write_monthly(self.create(&monthly)?, result).map_err(|source| ExportError::Csv {
            path: monthly.clone(),
            source,
        })?;

        let annual = self.output_dir.join(ANNUAL_CSV);
        tables::write_annual(self.create(&annual)?, result).map_err(|source| ExportError::Csv {
            path: annual.clone(),
            source,
        })?;

        Ok(vec![monthly, annual])
    }

    /// Write the monthly and annual `.xlsx` workbooks
    pub fn export_sheets(&self, result: &ProjectionResult) -> Result<Vec<PathBuf>, ExportError> {
        let workbooks = [
            (MONTHLY_XLSX, sheets::monthly_workbook(result)),
            (ANNUAL_XLSX, sheets::annual_workbook(result)),
        ];

        let mut written = Vec::with_capacity(workbooks.len());
        for (name, workbook) in workbooks {
            let path = self.output_dir.join(name);
            let xlsx_error = |source| ExportError::Xlsx {
                path: path.clone(),
                source,
            };
            workbook.and_then(|mut book| book.save(&path)).map_err(xlsx_error)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Write the balance and composition charts
    pub fn export_charts(&self, result: &ProjectionResult) -> Result<Vec<PathBuf>, ExportError> {
        let charts = [
            (BALANCE_CHART, LineChart::balance(result)),
            (COMPOSITION_CHART, LineChart::composition(result)),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (name, chart) in charts {
            let path = self.output_dir.join(name);
            fs::write(&path, chart.render_svg()).map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        Ok(written)
    }

    fn create(&self, path: &Path) -> Result<BufWriter<File>, ExportError> {
        File::create(path)
            .map(BufWriter::new)
            .map_err(|source| ExportError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}
