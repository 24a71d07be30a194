use crate::domain::PropertyRecord;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Format, Workbook};

pub fn export_price_history_xlsx(record: &PropertyRecord, sheet: &str) -> ResultResp {
    let buffer = price_history_workbook(record, sheet)?;
    xlsx_response(buffer, &export_filename(&record.address))
}

/// One worksheet: the address and its attributes on top, then a Date/Price table.
pub fn price_history_workbook(record: &PropertyRecord, sheet: &str) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0");

    let xlsx_err = |what: &str, e: rust_xlsxwriter::XlsxError| {
        ServerError::XlsxError(format!("Failed to write {what}: {e}"))
    };

    worksheet
        .write_string_with_format(0, 0, "Address", &bold)
        .map_err(|e| xlsx_err("address label", e))?;
    worksheet
        .write_string(0, 1, &record.address)
        .map_err(|e| xlsx_err("address", e))?;
    worksheet
        .write_string_with_format(1, 0, "Sheet", &bold)
        .map_err(|e| xlsx_err("sheet label", e))?;
    worksheet
        .write_string(1, 1, sheet)
        .map_err(|e| xlsx_err("sheet", e))?;

    let mut row: u32 = 2;
    for (label, field) in record.attributes() {
        let Some(value) = field.value() else {
            continue;
        };

        worksheet
            .write_string_with_format(row, 0, label, &bold)
            .map_err(|e| xlsx_err(label, e))?;

        let written = match value.as_number() {
            Some(n) if value.as_text().is_none() => worksheet.write_number(row, 1, n),
            _ => worksheet.write_string(row, 1, value.to_string()),
        };
        written.map_err(|e| xlsx_err(label, e))?;

        row += 1;
    }

    // Blank spacer row, then the history table.
    row += 1;
    worksheet
        .write_string_with_format(row, 0, "Date", &bold)
        .map_err(|e| xlsx_err("header", e))?;
    worksheet
        .write_string_with_format(row, 1, "Price", &bold)
        .map_err(|e| xlsx_err("header", e))?;

    let history = &record.price_history;
    let len = history.dates.len().max(history.prices.len());
    for i in 0..len {
        let r = row + 1 + i as u32;

        if let Some(date) = history.dates.get(i) {
            worksheet
                .write_string(r, 0, date.format("%Y-%m-%d").to_string())
                .map_err(|e| xlsx_err("date", e))?;
        }
        if let Some(price) = history.prices.get(i) {
            worksheet
                .write_number_with_format(r, 1, *price, &money)
                .map_err(|e| xlsx_err("price", e))?;
        }
    }

    worksheet
        .set_column_width(0, 18)
        .map_err(|e| xlsx_err("column width", e))?;
    worksheet
        .set_column_width(1, 48)
        .map_err(|e| xlsx_err("column width", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

/// `price_history_12_Elm_St.xlsx`; anything but letters and digits becomes `_`.
pub fn export_filename(address: &str) -> String {
    let slug: String = address
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    format!("price_history_{slug}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_header_safe() {
        assert_eq!(
            export_filename("12 Elm St, Phoenix \"AZ\""),
            "price_history_12_Elm_St__Phoenix__AZ_.xlsx"
        );
    }
}
