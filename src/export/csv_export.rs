use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 5] = ["Date", "Description", "Category", "Amount", "Id"];

pub(crate) struct CsvExporter;

impl CsvExporter {
    /// Write the transactions to `path`, one row each, in list order.
    /// Expenses are written with a negative amount.
    pub(crate) fn export(path: &Path, transactions: &[Transaction]) -> Result<usize> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        let count = Self::write(file, transactions)?;
        tracing::info!("Exported {count} transactions to {}", path.display());
        Ok(count)
    }

    pub(crate) fn write<W: Write>(writer: W, transactions: &[Transaction]) -> Result<usize> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER)
            .context("Failed to write CSV header")?;
        for txn in transactions {
            let date = txn.date.map(|d| d.to_rfc3339()).unwrap_or_default();
            let amount = format!("{:.2}", txn.signed_amount());
            wtr.write_record([
                date.as_str(),
                txn.name.as_str(),
                txn.kind.as_str(),
                amount.as_str(),
                txn.id.as_str(),
            ])
            .context("Failed to write CSV record")?;
        }
        wtr.flush().context("Failed to flush CSV output")?;
        Ok(transactions.len())
    }
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
