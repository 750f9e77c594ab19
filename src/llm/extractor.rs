use crate::chunker::{chunk_text, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::error::{ExtractorError, Result};
use crate::llm::client::LlmClient;
use crate::llm::prompts;
use crate::llm::types::ExtractionEvent;
use crate::record::{BalanceSheet, CashFlows, FinancialRecord, ProfitLoss, Statement};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::mpsc::Sender;

/// The three statements a report is mined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    BalanceSheet,
    ProfitLoss,
    CashFlows,
}

impl StatementType {
    pub fn label(&self) -> &'static str {
        match self {
            StatementType::BalanceSheet => "balance sheet",
            StatementType::ProfitLoss => "profit & loss",
            StatementType::CashFlows => "cash flows",
        }
    }

    fn prompt(&self) -> &'static str {
        match self {
            StatementType::BalanceSheet => prompts::BALANCE_SHEET_PROMPT,
            StatementType::ProfitLoss => prompts::PROFIT_LOSS_PROMPT,
            StatementType::CashFlows => prompts::CASH_FLOWS_PROMPT,
        }
    }
}

/// What one (chunk, statement-type) request produced.
enum ChunkOutcome<T> {
    /// The chunk yielded at least one line item for this statement.
    Data(T),
    /// The request succeeded but the chunk holds nothing for this statement.
    Empty,
    /// API error or malformed JSON; surfaced as a warning, never fatal.
    Failed(String),
}

/// The consolidated record plus everything that went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub record: FinancialRecord,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CompanyNameResponse {
    #[serde(default)]
    company_name: Option<String>,
}

/// Runs the extraction passes against a chat-completion client.
///
/// The chunked strategy ([`extract`](Self::extract)) issues one request per
/// (chunk, statement type) and stops querying a statement at the first chunk
/// that yields data for it. The whole-document strategy
/// ([`extract_single_pass`](Self::extract_single_pass)) truncates the text to
/// the chunk budget and asks for the full record in one request.
pub struct StatementExtractor<C> {
    client: C,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl<C: LlmClient> StatementExtractor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    /// Chunked multi-pass extraction: company name from the first chunk, then
    /// each statement type in turn across the chunks until one yields data.
    ///
    /// Per-request failures are logged, recorded on the report, and skipped;
    /// a statement no chunk can fill stays empty.
    pub async fn extract(
        &self,
        document_text: &str,
        progress: Option<Sender<ExtractionEvent>>,
    ) -> Result<ExtractionReport> {
        if document_text.trim().is_empty() {
            return Err(ExtractorError::EmptyDocument);
        }

        let chunks = chunk_text(document_text, self.chunk_size, self.chunk_overlap);
        info!(
            "Extracting financial statements from {} chunk(s)",
            chunks.len()
        );
        self.send_event(&progress, ExtractionEvent::Starting {
            chunks: chunks.len(),
        })
        .await;

        let mut record = FinancialRecord::default();
        let mut warnings = Vec::new();

        self.send_event(&progress, ExtractionEvent::ExtractingCompanyName)
            .await;
        record.company_name = self.company_name(&chunks[0], &mut warnings).await;

        record.balance_sheet = self
            .statement_pass::<BalanceSheet>(
                &chunks,
                StatementType::BalanceSheet,
                &progress,
                &mut warnings,
            )
            .await
            .unwrap_or_default();

        record.profit_loss = self
            .statement_pass::<ProfitLoss>(
                &chunks,
                StatementType::ProfitLoss,
                &progress,
                &mut warnings,
            )
            .await
            .unwrap_or_default();

        record.cash_flows = self
            .statement_pass::<CashFlows>(
                &chunks,
                StatementType::CashFlows,
                &progress,
                &mut warnings,
            )
            .await
            .unwrap_or_default();

        self.send_event(&progress, ExtractionEvent::Finished {
            warnings: warnings.len(),
        })
        .await;

        Ok(ExtractionReport { record, warnings })
    }

    /// Whole-document extraction in a single request, the text truncated to
    /// the chunk budget. The expected shape is pinned by the record's JSON
    /// schema. An API failure here is fatal: there is no other chunk to fall
    /// back to.
    pub async fn extract_single_pass(&self, document_text: &str) -> Result<ExtractionReport> {
        if document_text.trim().is_empty() {
            return Err(ExtractorError::EmptyDocument);
        }

        let excerpt: String = document_text.chars().take(self.chunk_size).collect();
        let schema = FinancialRecord::schema_as_json()?;
        let instructions = format!(
            "{}\nThe response must be a JSON object matching this schema:\n{}",
            prompts::FULL_RECORD_PROMPT.trim(),
            schema
        );

        let user = prompts::chunk_request(&instructions, &excerpt);
        let raw = self.client.chat_json(prompts::SYSTEM_PROMPT, &user).await?;

        let record: FinancialRecord = serde_json::from_str(&clean_json_output(&raw))
            .map_err(|e| ExtractorError::MalformedResponse(e.to_string()))?;

        Ok(ExtractionReport {
            record,
            warnings: Vec::new(),
        })
    }

    /// Iterates chunks in order for one statement type, stopping at the first
    /// chunk that yields data. Returns `None` when every chunk came back
    /// empty or failed.
    async fn statement_pass<T>(
        &self,
        chunks: &[String],
        statement: StatementType,
        progress: &Option<Sender<ExtractionEvent>>,
        warnings: &mut Vec<String>,
    ) -> Option<T>
    where
        T: DeserializeOwned + Statement,
    {
        self.send_event(progress, ExtractionEvent::ExtractingStatement {
            statement: statement.label().to_string(),
        })
        .await;

        let mut found = None;
        for (index, chunk) in chunks.iter().enumerate() {
            match self.query_chunk::<T>(chunk, statement.prompt()).await {
                ChunkOutcome::Data(data) => {
                    debug!(
                        "Found {} data in chunk {} of {}",
                        statement.label(),
                        index + 1,
                        chunks.len()
                    );
                    found = Some(data);
                    break;
                }
                ChunkOutcome::Empty => {
                    debug!(
                        "Chunk {} of {} holds no {} data",
                        index + 1,
                        chunks.len(),
                        statement.label()
                    );
                }
                ChunkOutcome::Failed(reason) => {
                    let message = format!(
                        "{} extraction failed on chunk {}: {}",
                        statement.label(),
                        index + 1,
                        reason
                    );
                    warn!("{}", message);
                    warnings.push(message);
                }
            }
        }

        self.send_event(progress, ExtractionEvent::StatementDone {
            statement: statement.label().to_string(),
            found: found.is_some(),
        })
        .await;

        found
    }

    /// One request for one statement type against one chunk.
    async fn query_chunk<T>(&self, excerpt: &str, instructions: &str) -> ChunkOutcome<T>
    where
        T: DeserializeOwned + Statement,
    {
        let user = prompts::chunk_request(instructions, excerpt);
        let raw = match self.client.chat_json(prompts::SYSTEM_PROMPT, &user).await {
            Ok(raw) => raw,
            Err(e) => return ChunkOutcome::Failed(e.to_string()),
        };

        match serde_json::from_str::<T>(&clean_json_output(&raw)) {
            Ok(data) if data.is_empty() => ChunkOutcome::Empty,
            Ok(data) => ChunkOutcome::Data(data),
            Err(e) => ChunkOutcome::Failed(format!("malformed JSON in response: {}", e)),
        }
    }

    /// The company name is asked for once, against the first chunk only.
    async fn company_name(&self, chunk: &str, warnings: &mut Vec<String>) -> Option<String> {
        let user = prompts::chunk_request(prompts::COMPANY_NAME_PROMPT, chunk);
        let raw = match self.client.chat_json(prompts::SYSTEM_PROMPT, &user).await {
            Ok(raw) => raw,
            Err(e) => {
                let message = format!("company name extraction failed: {}", e);
                warn!("{}", message);
                warnings.push(message);
                return None;
            }
        };

        match serde_json::from_str::<CompanyNameResponse>(&clean_json_output(&raw)) {
            Ok(parsed) => parsed.company_name.filter(|name| !name.trim().is_empty()),
            Err(e) => {
                let message = format!("company name response was not valid JSON: {}", e);
                warn!("{}", message);
                warnings.push(message);
                None
            }
        }
    }

    async fn send_event(&self, sender: &Option<Sender<ExtractionEvent>>, event: ExtractionEvent) {
        if let Some(tx) = sender {
            let _ = tx.send(event).await;
        }
    }
}

/// Models sometimes wrap the JSON body in code fences or prose; keep only the
/// outermost object.
fn clean_json_output(raw: &str) -> String {
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            return raw[start..=end].to_string();
        }
    }
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_output_strips_fences() {
        let raw = "```json\n{\"assets\": []}\n```";
        assert_eq!(clean_json_output(raw), "{\"assets\": []}");
    }

    #[test]
    fn test_clean_json_output_passes_plain_json_through() {
        assert_eq!(clean_json_output("{\"a\":1}"), "{\"a\":1}");
    }
}
