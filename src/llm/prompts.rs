// Prompts for the per-statement chunked passes and the whole-document pass.
// Each extraction prompt pins down the exact JSON shape the parser expects.

pub const SYSTEM_PROMPT: &str =
    "You are a financial analyst AI that extracts structured financial information from reports.";

pub const COMPANY_NAME_PROMPT: &str = r#"
Identify the name of the company this financial report belongs to.

Return a JSON object with a single key:
- company_name: the company's legal name as written in the report, or null if
  the excerpt does not name the company.

Do not guess a name that is not in the text.
"#;

pub const BALANCE_SHEET_PROMPT: &str = r#"
Extract the balance sheet from this excerpt of a financial report.

Return a JSON object with the keys 'assets', 'liabilities' and 'equity'.
Each key holds a list of items with 'name' and 'amount', in the order they
appear in the report. Keep 'amount' exactly as displayed, including currency
symbols, separators and parentheses (e.g. "$1,234,567", "$(500,000)").

If the excerpt contains no balance sheet data, return all three keys with
empty lists. Do not invent figures and do not total anything yourself.
"#;

pub const PROFIT_LOSS_PROMPT: &str = r#"
Extract the profit & loss statement from this excerpt of a financial report.

Return a JSON object with the keys 'revenue', 'expenses' and 'profit'.
Each key holds a list of items with 'name' and 'amount', in the order they
appear in the report. Keep 'amount' exactly as displayed, including currency
symbols, separators and parentheses. Profit rows are lines such as Gross
Profit, Operating Income or Net Income.

If the excerpt contains no profit & loss data, return all three keys with
empty lists. Do not invent figures and do not total anything yourself.
"#;

pub const CASH_FLOWS_PROMPT: &str = r#"
Extract the statement of cash flows from this excerpt of a financial report.

Return a JSON object with the keys 'operating', 'investing' and 'financing'.
Each key holds a list of items with 'name' and 'amount', in the order they
appear in the report. Keep 'amount' exactly as displayed, including currency
symbols, separators and parentheses.

If the excerpt contains no cash flow data, return all three keys with empty
lists. Do not invent figures and do not total anything yourself.
"#;

pub const FULL_RECORD_PROMPT: &str = r#"
I have a financial report in text format. Please extract the following
information:

1. Company Name
2. Balance Sheet (with all assets, liabilities, and equity items)
3. Profit & Loss Statement (with all revenue, expenses, and profit items)
4. Statement of Cash Flows (with operating, investing, and financing activities)

Format the response as a structured JSON object with the following keys:
- company_name: the name of the company
- balance_sheet: an object with 'assets', 'liabilities', and 'equity' as keys,
  each containing a list of items with 'name' and 'amount'
- profit_loss: an object with 'revenue', 'expenses', and 'profit' as keys,
  each containing a list of items with 'name' and 'amount'
- cash_flows: an object with 'operating', 'investing', and 'financing' as
  keys, each containing a list of items with 'name' and 'amount'

Keep every 'amount' exactly as displayed in the report.
"#;

/// Builds the user message for one request: the task instructions followed by
/// the document excerpt they apply to.
pub fn chunk_request(instructions: &str, excerpt: &str) -> String {
    format!(
        "{}\nHere is the text from the financial report:\n{}",
        instructions.trim(),
        excerpt
    )
}
