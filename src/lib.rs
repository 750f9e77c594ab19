//! # Financial Statement Extractor
//!
//! A library for pulling structured financial statements out of PDF reports
//! via an LLM and rendering them into a formatted Excel workbook.
//!
//! ## Pipeline
//!
//! - **PDF text**: per-page extraction with page-break markers, tolerant of
//!   individual pages that fail to decode.
//! - **Chunking**: the text is split into overlapping windows sized for the
//!   model's context budget.
//! - **Extraction**: one earlier request pulls the company name from the
//!   first chunk; then each statement type (balance sheet, profit & loss,
//!   cash flows) is requested chunk by chunk until one yields data.
//! - **Workbook**: the consolidated record becomes a Summary sheet plus one
//!   formatted sheet per statement, serialized to bytes with a
//!   content-derived filename.
//!
//! The core is stateless: callers hand in an [`ExtractionRequest`] and get an
//! [`ExtractionOutput`] back. Failures degrade: a chunk or statement that
//! cannot be extracted becomes a warning on the output, not an abort.
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_statement_extractor::{run_extraction, ExtractionRequest};
//!
//! let request = ExtractionRequest {
//!     pdf_bytes: Some(std::fs::read("report.pdf")?),
//!     api_key: Some(std::env::var("OPENAI_API_KEY")?),
//!     use_sample: false,
//! };
//!
//! let output = run_extraction(&request).await?;
//! std::fs::write(&output.filename, &output.workbook)?;
//! ```

pub mod chunker;
pub mod error;
pub mod llm;
pub mod pdf;
pub mod record;
pub mod workbook;

pub use chunker::{chunk_text, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use error::{ExtractorError, Result};
pub use llm::*;
pub use pdf::{extract_pdf_text, PAGE_BREAK};
pub use record::*;
pub use workbook::*;

use log::{debug, info};

/// Everything the UI gathers from the user. The UI layer owns form state;
/// the pipeline only ever sees this snapshot of it.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    /// The uploaded PDF, if any.
    pub pdf_bytes: Option<Vec<u8>>,
    /// The user-supplied API key, passed through to the model API.
    pub api_key: Option<String>,
    /// When set, skip the document and API entirely and use built-in sample
    /// data.
    pub use_sample: bool,
}

impl ExtractionRequest {
    /// Rejects requests that cannot be processed before any work happens:
    /// without sample mode, both a document and a key are required.
    pub fn validate(&self) -> Result<()> {
        if self.use_sample {
            return Ok(());
        }
        if self.pdf_bytes.is_none() {
            return Err(ExtractorError::MissingInput(
                "upload a PDF file or select the sample data option",
            ));
        }
        if self.api_key.is_none() {
            return Err(ExtractorError::MissingInput(
                "enter an API key or select the sample data option",
            ));
        }
        Ok(())
    }
}

/// The finished run: the consolidated record, anything non-fatal that went
/// wrong, and the packaged workbook.
#[derive(Debug, Clone)]
pub struct ExtractionOutput {
    pub record: FinancialRecord,
    pub warnings: Vec<String>,
    pub workbook: Vec<u8>,
    pub filename: String,
}

/// Runs the full pipeline for one request. Sample mode builds the workbook
/// from the built-in record without touching the document or the API.
pub async fn run_extraction(request: &ExtractionRequest) -> Result<ExtractionOutput> {
    request.validate()?;

    if request.use_sample {
        info!("Sample mode selected; skipping document and API");
        return package_output(FinancialRecord::sample(), Vec::new());
    }

    // validate() guarantees both are present past this point
    let pdf_bytes = request.pdf_bytes.as_deref().unwrap_or_default();
    let api_key = request.api_key.as_deref().unwrap_or_default();

    let client = OpenAiClient::new(api_key);
    run_extraction_with_client(pdf_bytes, client).await
}

/// Same pipeline with a caller-supplied client, which is also the seam tests
/// use to mock the API.
pub async fn run_extraction_with_client<C: LlmClient>(
    pdf_bytes: &[u8],
    client: C,
) -> Result<ExtractionOutput> {
    let text = extract_pdf_text(pdf_bytes)?;
    debug!("Document text extracted ({} characters)", text.len());

    let extractor = StatementExtractor::new(client);
    let report = extractor.extract(&text, None).await?;

    package_output(report.record, report.warnings)
}

fn package_output(record: FinancialRecord, warnings: Vec<String>) -> Result<ExtractionOutput> {
    let download = package_workbook(&record)?;
    info!(
        "Workbook packaged as '{}' ({} bytes, {} warning(s))",
        download.filename,
        download.bytes.len(),
        warnings.len()
    );
    Ok(ExtractionOutput {
        record,
        warnings,
        workbook: download.bytes,
        filename: download.filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_file() {
        let request = ExtractionRequest {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ExtractorError::MissingInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let request = ExtractionRequest {
            pdf_bytes: Some(vec![0u8; 4]),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ExtractorError::MissingInput(_))
        ));
    }

    #[test]
    fn test_validate_accepts_sample_mode_alone() {
        let request = ExtractionRequest {
            use_sample: true,
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[tokio::test]
    async fn test_sample_mode_produces_a_download() {
        let request = ExtractionRequest {
            use_sample: true,
            ..Default::default()
        };

        let output = run_extraction(&request).await.unwrap();
        assert_eq!(output.filename, "ABC_Corporation_Ltd..xlsx");
        assert!(!output.workbook.is_empty());
        assert!(output.warnings.is_empty());
    }
}
