use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Failed to read PDF document: {0}")]
    PdfRead(#[from] lopdf::Error),

    #[error("No text could be extracted from the document")]
    EmptyDocument,

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("HTTP request to the model API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Model returned an unusable response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Workbook generation failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
