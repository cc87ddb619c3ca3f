use std::io::Write;

use serde::Serialize;

use super::summary::SheetReport;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write payout csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush payout csv: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct CsvRow<'a> {
    employee_id: &'a str,
    name: &'a str,
    department: &'static str,
    has_override: bool,
    fin: f64,
    ops: f64,
    ind: f64,
    total_score: f64,
    base: f64,
    factor: f64,
    cap: f64,
    payout: f64,
    flags: String,
}

impl SheetReport {
    /// One CSV record per employee, with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut out = csv::Writer::from_writer(writer);
        for row in &self.rows {
            out.serialize(CsvRow {
                employee_id: row.employee_id.as_str(),
                name: &row.name,
                department: row.department.key(),
                has_override: row.has_override,
                fin: row.score.fin,
                ops: row.score.ops,
                ind: row.score.ind,
                total_score: row.score.total,
                base: row.payout.base,
                factor: row.payout.factor,
                cap: row.payout.cap,
                payout: row.payout.payout,
                flags: row
                    .flags
                    .iter()
                    .map(|flag| flag.label())
                    .collect::<Vec<_>>()
                    .join("; "),
            })?;
        }
        out.flush()?;
        Ok(())
    }
}
