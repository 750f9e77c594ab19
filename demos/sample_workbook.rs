use financial_statement_extractor::{package_workbook, FinancialRecord};
use std::error::Error;
use std::fs;

/// Builds the formatted workbook from the built-in sample record, no PDF or
/// API key required.
fn main() -> Result<(), Box<dyn Error>> {
    let record = FinancialRecord::sample();
    let download = package_workbook(&record)?;

    let filename = "financial_statements_sample.xlsx";
    fs::write(filename, &download.bytes)?;
    println!("📊 Wrote {} ({} bytes)", filename, download.bytes.len());

    Ok(())
}
