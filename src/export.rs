//! Excel export functionality.

use crate::models::account::Account;
use crate::models::leave::LeaveRequest;
use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::{Path, PathBuf};

/// Export the accounts table to an Excel file.
pub fn export_accounts_to_excel(accounts: &[Account], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Accounts")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    // Headers
    let headers = [
        "Username",
        "Full Name",
        "Role",
        "Gender",
        "Phone Number",
        "Address",
        "Date of Birth",
        "Outlet",
        "Status",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 15)?; // Username
    worksheet.set_column_width(1, 30)?; // Full Name
    worksheet.set_column_width(2, 12)?; // Role
    worksheet.set_column_width(3, 10)?; // Gender
    worksheet.set_column_width(4, 16)?; // Phone Number
    worksheet.set_column_width(5, 35)?; // Address
    worksheet.set_column_width(6, 12)?; // Date of Birth
    worksheet.set_column_width(7, 15)?; // Outlet
    worksheet.set_column_width(8, 10)?; // Status

    // Data rows
    for (idx, account) in accounts.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &account.username)?;
        worksheet.write_string(row, 1, &account.full_name)?;
        worksheet.write_string(row, 2, &account.role)?;
        worksheet.write_string(row, 3, account.gender.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 4, &account.phone_number)?;
        worksheet.write_string(row, 5, &account.address)?;

        if let Some(date) = account.date_of_birth {
            worksheet.write_string(row, 6, date.to_string())?;
        } else {
            worksheet.write_string(row, 6, "")?;
        }

        worksheet.write_string(row, 7, account.outlet.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 8, account.status.as_deref().unwrap_or(""))?;
    }

    // Autofilter
    if !accounts.is_empty() {
        let last_row = accounts.len() as u32;
        worksheet.autofilter(0, 0, last_row, 8)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export the leave request table to an Excel file.
pub fn export_leave_to_excel(requests: &[LeaveRequest], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Leave Requests")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    // Headers
    let headers = ["ID", "Username", "Request Date", "Type", "Reason", "Status"];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 8)?; // ID
    worksheet.set_column_width(1, 15)?; // Username
    worksheet.set_column_width(2, 13)?; // Request Date
    worksheet.set_column_width(3, 12)?; // Type
    worksheet.set_column_width(4, 40)?; // Reason
    worksheet.set_column_width(5, 10)?; // Status

    // Data rows
    for (idx, request) in requests.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_number(row, 0, request.id as f64)?;
        worksheet.write_string(row, 1, &request.user_name)?;
        worksheet.write_string(row, 2, request.request_date.to_string())?;
        worksheet.write_string(row, 3, &request.leave_type)?;
        worksheet.write_string(row, 4, &request.reason)?;
        worksheet.write_string(row, 5, request.status.to_string())?;
    }

    // Autofilter
    if !requests.is_empty() {
        let last_row = requests.len() as u32;
        worksheet.autofilter(0, 0, last_row, 5)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}
