use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single named figure within a statement section. The amount is kept as
/// display text ("$1,234,567", "$(500,000)") exactly as the model returned
/// it; no arithmetic is performed on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    #[serde(default)]
    #[schemars(description = "The line item label exactly as it appears in the statement")]
    pub name: String,

    #[serde(default)]
    #[schemars(
        description = "The amount as displayed in the report, currency formatting preserved (e.g. '$1,234,567')"
    )]
    pub amount: String,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }
}

/// Common view over the three statement shapes: emptiness (did a chunk yield
/// anything for this statement?) and the fixed ordering of sections used when
/// rendering sheets.
pub trait Statement {
    /// Subheader label and items for each section, in presentation order.
    fn sections(&self) -> [(&'static str, &[LineItem]); 3];

    fn is_empty(&self) -> bool {
        self.sections().iter().all(|(_, items)| items.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BalanceSheet {
    #[serde(default)]
    #[schemars(description = "Asset line items, in statement order")]
    pub assets: Vec<LineItem>,

    #[serde(default)]
    #[schemars(description = "Liability line items, in statement order")]
    pub liabilities: Vec<LineItem>,

    #[serde(default)]
    #[schemars(description = "Equity line items, in statement order")]
    pub equity: Vec<LineItem>,
}

impl Statement for BalanceSheet {
    fn sections(&self) -> [(&'static str, &[LineItem]); 3] {
        [
            ("ASSETS", &self.assets),
            ("LIABILITIES", &self.liabilities),
            ("EQUITY", &self.equity),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProfitLoss {
    #[serde(default)]
    #[schemars(description = "Revenue line items, in statement order")]
    pub revenue: Vec<LineItem>,

    #[serde(default)]
    #[schemars(description = "Expense line items, in statement order")]
    pub expenses: Vec<LineItem>,

    #[serde(default)]
    #[schemars(description = "Profit/loss line items such as Gross Profit or Net Income")]
    pub profit: Vec<LineItem>,
}

impl Statement for ProfitLoss {
    fn sections(&self) -> [(&'static str, &[LineItem]); 3] {
        [
            ("REVENUE", &self.revenue),
            ("EXPENSES", &self.expenses),
            ("PROFIT/LOSS", &self.profit),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CashFlows {
    #[serde(default)]
    #[schemars(description = "Operating activity line items, in statement order")]
    pub operating: Vec<LineItem>,

    #[serde(default)]
    #[schemars(description = "Investing activity line items, in statement order")]
    pub investing: Vec<LineItem>,

    #[serde(default)]
    #[schemars(description = "Financing activity line items, in statement order")]
    pub financing: Vec<LineItem>,
}

impl Statement for CashFlows {
    fn sections(&self) -> [(&'static str, &[LineItem]); 3] {
        [
            ("OPERATING ACTIVITIES", &self.operating),
            ("INVESTING ACTIVITIES", &self.investing),
            ("FINANCING ACTIVITIES", &self.financing),
        ]
    }
}

/// The consolidated extraction result. Created empty, populated as each
/// chunk/statement pass returns data, and handed to the workbook builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialRecord {
    #[serde(default)]
    #[schemars(description = "The legal name of the company the report belongs to")]
    pub company_name: Option<String>,

    #[serde(default)]
    #[schemars(description = "Balance sheet: assets, liabilities and equity")]
    pub balance_sheet: BalanceSheet,

    #[serde(default)]
    #[schemars(description = "Profit & loss statement: revenue, expenses and profit")]
    pub profit_loss: ProfitLoss,

    #[serde(default)]
    #[schemars(description = "Statement of cash flows: operating, investing and financing activities")]
    pub cash_flows: CashFlows,
}

impl FinancialRecord {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FinancialRecord)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }

    /// The built-in record used by sample mode, so the workbook path can be
    /// exercised without a PDF or an API key.
    pub fn sample() -> Self {
        fn items(pairs: &[(&str, &str)]) -> Vec<LineItem> {
            pairs
                .iter()
                .map(|(name, amount)| LineItem::new(*name, *amount))
                .collect()
        }

        FinancialRecord {
            company_name: Some("ABC Corporation Ltd.".to_string()),
            balance_sheet: BalanceSheet {
                assets: items(&[
                    ("Cash and Cash Equivalents", "$1,234,567"),
                    ("Accounts Receivable", "$987,654"),
                    ("Inventory", "$765,432"),
                    ("Property, Plant and Equipment", "$4,321,098"),
                    ("Intangible Assets", "$1,543,210"),
                ]),
                liabilities: items(&[
                    ("Accounts Payable", "$654,321"),
                    ("Short-term Debt", "$432,109"),
                    ("Long-term Debt", "$2,109,876"),
                    ("Deferred Tax Liabilities", "$123,456"),
                ]),
                equity: items(&[
                    ("Common Stock", "$1,000,000"),
                    ("Retained Earnings", "$4,532,199"),
                    ("Treasury Stock", "$(500,000)"),
                ]),
            },
            profit_loss: ProfitLoss {
                revenue: items(&[
                    ("Sales Revenue", "$12,345,678"),
                    ("Service Revenue", "$1,234,567"),
                    ("Other Revenue", "$234,567"),
                ]),
                expenses: items(&[
                    ("Cost of Goods Sold", "$7,654,321"),
                    ("Selling, General & Administrative", "$2,345,678"),
                    ("Research & Development", "$1,234,567"),
                    ("Depreciation & Amortization", "$543,210"),
                    ("Interest Expense", "$321,098"),
                ]),
                profit: items(&[
                    ("Gross Profit", "$5,925,924"),
                    ("Operating Income", "$1,802,369"),
                    ("Income Before Tax", "$1,481,271"),
                    ("Net Income", "$1,111,271"),
                ]),
            },
            cash_flows: CashFlows {
                operating: items(&[
                    ("Net Income", "$1,111,271"),
                    ("Depreciation & Amortization", "$543,210"),
                    ("Changes in Working Capital", "$(123,456)"),
                    ("Net Cash from Operating Activities", "$1,531,025"),
                ]),
                investing: items(&[
                    ("Capital Expenditures", "$(876,543)"),
                    ("Acquisitions", "$(432,109)"),
                    ("Net Cash used in Investing Activities", "$(1,308,652)"),
                ]),
                financing: items(&[
                    ("Dividends Paid", "$(234,567)"),
                    ("Debt Repayment", "$(123,456)"),
                    ("Share Repurchases", "$(87,654)"),
                    ("Net Cash used in Financing Activities", "$(445,677)"),
                ]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_generation() {
        let schema_json = FinancialRecord::schema_as_json().unwrap();
        assert!(schema_json.contains("company_name"));
        assert!(schema_json.contains("balance_sheet"));
        assert!(schema_json.contains("cash_flows"));
    }

    #[test]
    fn test_missing_keys_deserialize_to_defaults() {
        let partial: BalanceSheet =
            serde_json::from_str(r#"{"assets":[{"name":"Cash","amount":"$100"}]}"#).unwrap();
        assert_eq!(partial.assets, vec![LineItem::new("Cash", "$100")]);
        assert!(partial.liabilities.is_empty());
        assert!(partial.equity.is_empty());
        assert!(!partial.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_statement() {
        let empty: CashFlows = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_record_round_trip() {
        let record = FinancialRecord::sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: FinancialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.company_name.as_deref(), Some("ABC Corporation Ltd."));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let labels: Vec<&str> = FinancialRecord::sample()
            .balance_sheet
            .sections()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(labels, ["ASSETS", "LIABILITIES", "EQUITY"]);
    }
}
