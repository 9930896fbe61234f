//! Customer spreadsheet export.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::error::ExportError;
use crate::lease::CustomerLedger;

/// Worksheet name.
pub const SHEET_NAME: &str = "Customers";

/// Column headers, in order.
pub const HEADERS: [&str; 12] = [
    "ID",
    "Full Name",
    "Phone",
    "Car",
    "Purchase Cost",
    "Leasing Amount",
    "Monthly Payment",
    "Lease Duration (months)",
    "Start Date",
    "Total Paid",
    "Profit",
    "Status",
];

const COLUMN_WIDTHS: [u16; 12] = [38, 24, 18, 28, 14, 15, 16, 22, 12, 12, 12, 11];

/// One customer as it appears in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSheetRow {
    /// Customer ID.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Phone.
    pub phone: String,
    /// `"<brand> <model> (<year>)"`.
    pub car: String,
    /// Purchase cost.
    pub purchase_cost: Decimal,
    /// Leasing amount.
    pub leasing_amount: Decimal,
    /// Monthly installment.
    pub monthly_payment: Decimal,
    /// Months.
    pub lease_duration: i32,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// Sum of settled payments.
    pub total_paid: Decimal,
    /// Scheduled lease profit.
    pub profit: Decimal,
    /// `Active` or `Completed`.
    pub status: &'static str,
}

impl CustomerSheetRow {
    /// Flattens a customer and their payments into a sheet row.
    #[must_use]
    pub fn from_ledger(ledger: &CustomerLedger) -> Self {
        let c = &ledger.customer;
        Self {
            id: c.id.to_string(),
            full_name: c.full_name.clone(),
            phone: c.phone.clone(),
            car: c.car_description(),
            purchase_cost: c.purchase_cost,
            leasing_amount: c.leasing_amount,
            monthly_payment: c.monthly_payment,
            lease_duration: c.lease_duration,
            start_date: c.start_date.format("%Y-%m-%d").to_string(),
            total_paid: ledger.total_paid(),
            profit: c.lease_profit(),
            status: ledger.status().label(),
        }
    }
}

/// The customer sheet, rows newest customer first.
#[derive(Debug, Clone, Default)]
pub struct CustomerSheet {
    /// Data rows.
    pub rows: Vec<CustomerSheetRow>,
}

impl CustomerSheet {
    /// Builds the sheet from customers with their payments loaded.
    #[must_use]
    pub fn build(ledgers: &[CustomerLedger]) -> Self {
        let mut ordered: Vec<&CustomerLedger> = ledgers.iter().collect();
        ordered.sort_by(|a, b| {
            b.customer
                .created_at
                .cmp(&a.customer.created_at)
                .then_with(|| b.customer.id.cmp(&a.customer.id))
        });

        Self {
            rows: ordered.into_iter().map(CustomerSheetRow::from_ledger).collect(),
        }
    }

    /// Renders the workbook to `.xlsx` bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Spreadsheet` if the writer fails.
    pub fn render(&self) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let bold = Format::new().set_bold();
        for (col, (header, width)) in (0u16..).zip(HEADERS.iter().zip(COLUMN_WIDTHS)) {
            sheet.write_string_with_format(0, col, *header, &bold)?;
            sheet.set_column_width(col, width)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (row, data) in (1u32..).zip(&self.rows) {
            write_row(sheet, row, data)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn write_row(sheet: &mut Worksheet, row: u32, data: &CustomerSheetRow) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, &data.id)?;
    sheet.write_string(row, 1, &data.full_name)?;
    sheet.write_string(row, 2, &data.phone)?;
    sheet.write_string(row, 3, &data.car)?;
    sheet.write_number(row, 4, cell_number(data.purchase_cost))?;
    sheet.write_number(row, 5, cell_number(data.leasing_amount))?;
    sheet.write_number(row, 6, cell_number(data.monthly_payment))?;
    sheet.write_number(row, 7, f64::from(data.lease_duration))?;
    sheet.write_string(row, 8, &data.start_date)?;
    sheet.write_number(row, 9, cell_number(data.total_paid))?;
    sheet.write_number(row, 10, cell_number(data.profit))?;
    sheet.write_string(row, 11, data.status)?;
    Ok(())
}

/// Spreadsheet cells hold IEEE doubles; conversion happens only here.
fn cell_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use chrono::{DateTime, NaiveDate};
    use leasebook_shared::types::{CustomerId, PaymentId};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::lease::{Customer, Payment, PaymentStatus};

    fn ledger(n: i64, paid: &[Decimal]) -> CustomerLedger {
        let customer = Customer {
            id: CustomerId::new(),
            full_name: format!("Customer {n}"),
            phone: format!("+99451{n:07}"),
            car_brand: Some("Toyota".into()),
            car_model: Some("Camry".into()),
            car_year: Some(2022),
            purchase_cost: dec!(30000),
            leasing_amount: dec!(25000),
            monthly_payment: dec!(900),
            lease_duration: 36,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            created_at: DateTime::from_timestamp(1_750_000_000 + n, 0).unwrap(),
        };
        let payments = paid
            .iter()
            .map(|amount| Payment {
                id: PaymentId::new(),
                customer_id: customer.id,
                amount: *amount,
                due_date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                payment_date: NaiveDate::from_ymd_opt(2025, 2, 14),
                status: PaymentStatus::Paid,
            })
            .collect();
        CustomerLedger { customer, payments }
    }

    fn zip_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_row_values() {
        let row = CustomerSheetRow::from_ledger(&ledger(1, &[dec!(900), dec!(900)]));
        assert_eq!(row.car, "Toyota Camry (2022)");
        assert_eq!(row.start_date, "2025-01-15");
        assert_eq!(row.total_paid, dec!(1800));
        assert_eq!(row.profit, dec!(7400));
        assert_eq!(row.status, "Completed");
    }

    #[test]
    fn test_rows_newest_first() {
        let sheet = CustomerSheet::build(&[ledger(1, &[]), ledger(3, &[]), ledger(2, &[])]);
        let names: Vec<&str> = sheet.rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["Customer 3", "Customer 2", "Customer 1"]);
    }

    #[test]
    fn test_workbook_has_header_plus_one_row_per_customer() {
        let ledgers: Vec<CustomerLedger> = (0..5).map(|n| ledger(n, &[dec!(900)])).collect();
        let bytes = CustomerSheet::build(&ledgers).render().unwrap();

        let sheet_xml = zip_entry(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet_xml.matches("<row ").count(), 6);

        let strings = zip_entry(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("Toyota Camry (2022)"));
        assert!(strings.contains("Lease Duration (months)"));
    }

    #[test]
    fn test_empty_workbook_is_header_only() {
        let bytes = CustomerSheet::build(&[]).render().unwrap();
        assert!(bytes.starts_with(b"PK"));

        let sheet_xml = zip_entry(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet_xml.matches("<row ").count(), 1);

        let workbook_xml = zip_entry(&bytes, "xl/workbook.xml");
        assert!(workbook_xml.contains(SHEET_NAME));
    }
}
