use crate::dashboard::Dashboard;
use crate::dataset::ListingWorkbook;
use crate::domain::ExtractOptions;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct FixtureSheet<'a> {
    pub name: &'a str,
    pub header: &'a [&'a str],
    pub rows: &'a [&'a [&'a str]],
}

/// Writes `sheets` to `dir/listings.xlsx`. In "Date" columns, ISO dates are
/// written as date-formatted cells. Elsewhere cells that parse as numbers are
/// written as numbers, empty strings are left blank, the rest as text.
pub fn fixture_workbook(dir: &Path, sheets: &[FixtureSheet]) -> PathBuf {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();

        for (col, name) in sheet.header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let r = (r + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let is_date_column = sheet.header.get(col).is_some_and(|h| h.contains("Date"));
                let col = col as u16;

                if is_date_column {
                    if let Ok(date) = ExcelDateTime::parse_from_str(value) {
                        worksheet
                            .write_datetime_with_format(r, col, &date, &date_format)
                            .unwrap();
                        continue;
                    }
                }
                match value.parse::<f64>() {
                    Ok(n) => worksheet.write_number(r, col, n).unwrap(),
                    Err(_) => worksheet.write_string(r, col, *value).unwrap(),
                };
            }
        }
    }

    let path = dir.join("listings.xlsx");
    workbook.save(&path).unwrap();
    path
}

pub const PHOENIX_HEADER: &[&str] = &[
    "Address",
    "Phone",
    "Listed By",
    "Zillow Links",
    "Bedrooms",
    "Bathrooms",
    "Area (sqft)",
    "Days on Zillow",
    "Built in",
    "Date1",
    "Price1",
    "Date2",
    "Price2",
    "Notes",
];

pub const PHOENIX_ROWS: &[&[&str]] = &[
    &[
        "12 Elm St",
        "555-1111",
        "Desert Realty",
        "https://www.zillow.com/homedetails/12-elm-st",
        "3",
        "2",
        "1450",
        "12",
        "1998",
        "2023-01-01",
        "450000",
        "2023-03-01",
        "440000",
        "",
    ],
    &[
        "14 Oak Ave",
        "555-3333",
        "",
        "",
        "4",
        "3",
        "2100",
        "5",
        "2005",
        "2023-02-01",
        "610000",
        "",
        "",
        "",
    ],
    &[
        "12 Elm St",
        "555-2222",
        "Desert Realty",
        "",
        "3",
        "2",
        "1450",
        "40",
        "1998",
        "2023-02-01",
        "445000",
        "",
        "",
        "",
    ],
];

/// Two sheets: "Phoenix" with full listings, "Tucson" with a bare address list.
pub fn fixture_dashboard() -> (TempDir, Dashboard) {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_workbook(
        dir.path(),
        &[
            FixtureSheet {
                name: "Phoenix",
                header: PHOENIX_HEADER,
                rows: PHOENIX_ROWS,
            },
            FixtureSheet {
                name: "Tucson",
                header: &["Address", "Bedrooms"],
                rows: &[&["1 Saguaro Rd", "2"]],
            },
        ],
    );

    let workbook = ListingWorkbook::open(&path).unwrap();
    (dir, Dashboard::new(workbook, ExtractOptions::default()))
}
