// src/tests/router_tests/api_tests.rs

use super::{body_bytes, get};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::fixture_dashboard;
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

#[test]
fn property_json_matches_extraction() {
    let (_dir, dashboard) = fixture_dashboard();

    let resp = handle(
        get("/api/property?sheet=Phoenix&address=12+Elm+St"),
        &dashboard,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["Content-Type"].to_str().unwrap(),
        "application/json"
    );

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(resp)).unwrap();
    assert_eq!(json["address"], "12 Elm St");
    assert_eq!(json["phone"], "555-1111");
    assert_eq!(json["bedrooms"], 3.0);
    assert_eq!(json["days_on_zillow"], 12.0);
    assert_eq!(
        json["price_history"]["dates"],
        serde_json::json!(["2023-01-01", "2023-02-01", "2023-03-01"])
    );
    assert_eq!(
        json["price_history"]["prices"],
        serde_json::json!([450000.0, 445000.0, 440000.0])
    );
}

#[test]
fn property_json_for_unknown_address_is_empty() {
    let (_dir, dashboard) = fixture_dashboard();

    let resp = handle(get("/api/property?sheet=Tucson&address=12+Elm+St"), &dashboard).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(resp)).unwrap();

    assert!(json["phone"].is_null());
    assert!(json["bedrooms"].is_null());
    assert_eq!(json["price_history"]["dates"], serde_json::json!([]));
}

#[test]
fn export_returns_a_readable_workbook() {
    let (_dir, dashboard) = fixture_dashboard();

    let resp = handle(get("/export?sheet=Phoenix&address=12+Elm+St"), &dashboard).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["Content-Disposition"]
        .to_str()
        .unwrap()
        .contains("price_history_12_Elm_St.xlsx"));

    let bytes = body_bytes(resp);
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();

    assert_eq!(range.get_value((0, 1)), Some(&Data::String("12 Elm St".into())));

    let prices: Vec<f64> = range
        .rows()
        .skip_while(|row| row.first() != Some(&Data::String("Date".into())))
        .skip(1)
        .filter_map(|row| match row.get(1) {
            Some(Data::Float(p)) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(prices, vec![450000.0, 445000.0, 440000.0]);
}

#[test]
fn export_of_unknown_sheet_is_not_found() {
    let (_dir, dashboard) = fixture_dashboard();
    assert!(matches!(
        handle(get("/export?sheet=Nope&address=12+Elm+St"), &dashboard),
        Err(ServerError::NotFound)
    ));
}
