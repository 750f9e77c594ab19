use anyhow::{Context, Result};
use dotenv::dotenv;
use financial_statement_extractor::{run_extraction, ExtractionRequest};
use std::fs;

/// Full pipeline against a real report: reads the PDF given on the command
/// line, extracts statements through the OpenAI API, and writes the workbook
/// to the current directory under its content-derived filename.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .context("usage: extract_from_pdf <report.pdf>")?;
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;

    println!("🚀 Extracting financial statements from {}...", path);

    let request = ExtractionRequest {
        pdf_bytes: Some(fs::read(&path)?),
        api_key: Some(api_key),
        use_sample: false,
    };

    let output = run_extraction(&request).await?;

    if let Some(name) = &output.record.company_name {
        println!("🏢 Company: {}", name);
    }
    for warning in &output.warnings {
        println!("⚠️  {}", warning);
    }

    fs::write(&output.filename, &output.workbook)?;
    println!(
        "✅ Wrote {} ({} bytes)",
        output.filename,
        output.workbook.len()
    );

    Ok(())
}
