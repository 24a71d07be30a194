// src/tests/router_tests/dashboard_tests.rs

use super::{body_string, get};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::fixture_dashboard;

#[test]
fn root_shows_first_sheet_and_first_address() {
    let (_dir, dashboard) = fixture_dashboard();

    let resp = handle(get("/"), &dashboard).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Arizona Properties Dashboard"));
    assert!(body.contains("Price Changes for Address: 12 Elm St"));
    // first-seen phone wins over the later 555-2222 row
    assert!(body.contains("555-1111"));
    assert!(body.contains("Desert Realty"));
    assert!(body.contains("View on Zillow"));
    assert!(body.contains("01/01/2023"));
}

#[test]
fn dashboard_honors_selection() {
    let (_dir, dashboard) = fixture_dashboard();

    let resp = handle(
        get("/dashboard?sheet=Phoenix&address=14+Oak+Ave"),
        &dashboard,
    )
    .unwrap();
    let body = body_string(resp);

    assert!(body.contains("Price Changes for Address: 14 Oak Ave"));
    assert!(body.contains("$610,000"));
    assert!(!body.contains("Price Changes for Address: 12 Elm St"));
}

#[test]
fn sheet_without_prices_renders_attributes_only() {
    let (_dir, dashboard) = fixture_dashboard();

    let body = body_string(handle(get("/dashboard?sheet=Tucson"), &dashboard).unwrap());
    assert!(body.contains("1 Saguaro Rd"));
    assert!(body.contains("Bedrooms"));
    assert!(!body.contains("price-chart"));
}

#[test]
fn unknown_sheet_is_not_found() {
    let (_dir, dashboard) = fixture_dashboard();

    let result = handle(get("/dashboard?sheet=Flagstaff"), &dashboard);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn unknown_path_is_not_found() {
    let (_dir, dashboard) = fixture_dashboard();
    assert!(matches!(
        handle(get("/admin"), &dashboard),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn address_partial_lists_sheet_addresses() {
    let (_dir, dashboard) = fixture_dashboard();

    let body = body_string(handle(get("/partials/addresses?sheet=Phoenix"), &dashboard).unwrap());
    assert!(body.contains("12 Elm St"));
    assert!(body.contains("14 Oak Ave"));
    assert_eq!(body.matches("<option").count(), 2);
    assert!(body.contains("load, change"));
}

#[test]
fn property_partial_for_unknown_address_has_no_chart() {
    let (_dir, dashboard) = fixture_dashboard();

    let body = body_string(
        handle(
            get("/partials/property?sheet=Phoenix&address=99%20Nowhere%20Ln"),
            &dashboard,
        )
        .unwrap(),
    );
    assert!(body.contains("No listings found for"));
    assert!(body.contains("99 Nowhere Ln"));
    assert!(!body.contains("<svg"));
}

#[test]
fn partials_need_their_parameters() {
    let (_dir, dashboard) = fixture_dashboard();

    assert!(matches!(
        handle(get("/partials/property?sheet=Phoenix"), &dashboard),
        Err(ServerError::BadRequest(msg)) if msg.contains("address")
    ));
    assert!(matches!(
        handle(get("/partials/addresses"), &dashboard),
        Err(ServerError::BadRequest(_))
    ));
}
