//! Renders a [`FinancialRecord`] into a formatted multi-sheet Excel workbook
//! and packages it for download. Output is deterministic for a given record:
//! sheet order, section order and item order never vary.

use crate::error::Result;
use crate::record::{FinancialRecord, Statement};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

/// Filename used when no company name was extracted.
pub const DEFAULT_DOWNLOAD_NAME: &str = "financial_statements.xlsx";

/// MIME type to serve the packaged bytes under.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

struct SheetFormats {
    title: Format,
    header: Format,
    subheader: Format,
    item: Format,
    amount: Format,
}

impl SheetFormats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_font_color(Color::RGB(0x1F497D))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            header: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_background_color(Color::RGB(0x4F81BD))
                .set_font_color(Color::White)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            subheader: Format::new()
                .set_bold()
                .set_font_size(11)
                .set_background_color(Color::RGB(0xD0D8E8))
                .set_border(FormatBorder::Thin),
            item: Format::new().set_border(FormatBorder::Thin),
            amount: Format::new()
                .set_border(FormatBorder::Thin)
                .set_num_format("#,##0.00"),
        }
    }
}

/// Builds the four-sheet workbook: a summary plus one sheet per statement.
pub struct WorkbookBuilder<'a> {
    record: &'a FinancialRecord,
}

impl<'a> WorkbookBuilder<'a> {
    pub fn new(record: &'a FinancialRecord) -> Self {
        Self { record }
    }

    /// Serializes the workbook to an in-memory xlsx byte buffer.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let formats = SheetFormats::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        self.write_summary(sheet, &formats)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name("Balance Sheet")?;
        write_statement(sheet, "Balance Sheet", &self.record.balance_sheet, &formats)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name("Profit & Loss")?;
        write_statement(
            sheet,
            "Profit & Loss Statement",
            &self.record.profit_loss,
            &formats,
        )?;

        let sheet = workbook.add_worksheet();
        sheet.set_name("Cash Flows")?;
        write_statement(
            sheet,
            "Statement of Cash Flows",
            &self.record.cash_flows,
            &formats,
        )?;

        Ok(workbook.save_to_buffer()?)
    }

    fn write_summary(&self, sheet: &mut Worksheet, formats: &SheetFormats) -> Result<()> {
        sheet.merge_range(0, 0, 0, 1, "Financial Statement Summary", &formats.title)?;
        sheet.write_string_with_format(2, 0, "Information", &formats.header)?;
        sheet.write_string_with_format(2, 1, "Value", &formats.header)?;
        sheet.write_string_with_format(3, 0, "Company Name", &formats.item)?;
        sheet.write_string_with_format(
            3,
            1,
            self.record.company_name.as_deref().unwrap_or("Not Available"),
            &formats.item,
        )?;
        sheet.write_string_with_format(4, 0, "Report Date", &formats.item)?;
        sheet.write_string_with_format(4, 1, "As extracted", &formats.item)?;
        sheet.set_column_width(0, 20)?;
        sheet.set_column_width(1, 40)?;
        Ok(())
    }
}

/// One statement sheet: merged title, Item/Amount header, then each section
/// as a subheader row followed by its line items, a blank row between
/// sections.
fn write_statement(
    sheet: &mut Worksheet,
    title: &str,
    statement: &dyn Statement,
    formats: &SheetFormats,
) -> Result<()> {
    sheet.merge_range(0, 0, 0, 1, title, &formats.title)?;
    sheet.write_string_with_format(2, 0, "Item", &formats.header)?;
    sheet.write_string_with_format(2, 1, "Amount", &formats.header)?;

    let mut row = 3u32;
    for (index, (label, items)) in statement.sections().iter().enumerate() {
        if index > 0 {
            row += 1;
        }
        sheet.write_string_with_format(row, 0, *label, &formats.subheader)?;
        sheet.write_string_with_format(row, 1, "", &formats.subheader)?;
        row += 1;

        for item in *items {
            sheet.write_string_with_format(row, 0, &item.name, &formats.item)?;
            sheet.write_string_with_format(row, 1, &item.amount, &formats.amount)?;
            row += 1;
        }
    }

    sheet.set_column_width(0, 40)?;
    sheet.set_column_width(1, 20)?;
    Ok(())
}

/// A workbook serialized for download.
#[derive(Debug, Clone)]
pub struct WorkbookDownload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Builds the workbook and pairs it with its content-derived filename.
pub fn package_workbook(record: &FinancialRecord) -> Result<WorkbookDownload> {
    Ok(WorkbookDownload {
        bytes: WorkbookBuilder::new(record).build()?,
        filename: download_filename(record),
    })
}

/// `<Company_Name>.xlsx` with spaces replaced, or the generic default when
/// no company name was extracted.
pub fn download_filename(record: &FinancialRecord) -> String {
    match record
        .company_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    {
        Some(name) => format!("{}.xlsx", name.replace(' ', "_")),
        None => DEFAULT_DOWNLOAD_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BalanceSheet, CashFlows, LineItem, ProfitLoss};
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;

    fn one_item_record() -> FinancialRecord {
        FinancialRecord {
            company_name: Some("Test Co".to_string()),
            balance_sheet: BalanceSheet {
                assets: vec![LineItem::new("Cash", "$100")],
                liabilities: vec![LineItem::new("Loans", "$50")],
                equity: vec![LineItem::new("Capital", "$50")],
            },
            profit_loss: ProfitLoss {
                revenue: vec![LineItem::new("Sales", "$200")],
                expenses: vec![LineItem::new("Rent", "$80")],
                profit: vec![LineItem::new("Net Income", "$120")],
            },
            cash_flows: CashFlows {
                operating: vec![LineItem::new("Net Income", "$120")],
                investing: vec![LineItem::new("Capex", "$(30)")],
                financing: vec![LineItem::new("Dividends", "$(10)")],
            },
        }
    }

    fn rows_of(bytes: &[u8], sheet: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> =
            Xlsx::new(Cursor::new(bytes.to_vec())).expect("generated buffer parses as xlsx");
        workbook
            .worksheet_range(sheet)
            .expect("sheet exists")
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_workbook_has_summary_and_one_sheet_per_statement() {
        let bytes = WorkbookBuilder::new(&one_item_record()).build().unwrap();
        let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            ["Summary", "Balance Sheet", "Profit & Loss", "Cash Flows"]
        );
    }

    #[test]
    fn test_line_items_appear_verbatim_under_their_subheader() {
        let bytes = WorkbookBuilder::new(&one_item_record()).build().unwrap();
        let rows = rows_of(&bytes, "Balance Sheet");

        let assets_row = rows
            .iter()
            .position(|row| row.first().map(String::as_str) == Some("ASSETS"))
            .expect("ASSETS subheader present");
        assert_eq!(rows[assets_row + 1][0], "Cash");
        assert_eq!(rows[assets_row + 1][1], "$100");

        let equity_row = rows
            .iter()
            .position(|row| row.first().map(String::as_str) == Some("EQUITY"))
            .expect("EQUITY subheader present");
        assert!(equity_row > assets_row);
        assert_eq!(rows[equity_row + 1][0], "Capital");
    }

    #[test]
    fn test_summary_carries_company_name() {
        let bytes = WorkbookBuilder::new(&one_item_record()).build().unwrap();
        let rows = rows_of(&bytes, "Summary");
        assert!(rows
            .iter()
            .any(|row| row.contains(&"Company Name".to_string())
                && row.contains(&"Test Co".to_string())));
    }

    #[test]
    fn test_filename_replaces_spaces() {
        let record = FinancialRecord {
            company_name: Some("ABC Corporation Ltd.".to_string()),
            ..Default::default()
        };
        assert_eq!(download_filename(&record), "ABC_Corporation_Ltd..xlsx");
    }

    #[test]
    fn test_filename_falls_back_without_company_name() {
        assert_eq!(
            download_filename(&FinancialRecord::default()),
            DEFAULT_DOWNLOAD_NAME
        );
    }
}
