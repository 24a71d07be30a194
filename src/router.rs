use crate::dashboard::Dashboard;
use crate::dataset::DatasetError;
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, ResultResp};
use crate::spreadsheets::export_price_history_xlsx;
use crate::templates::pages::{address_picker, dashboard_page, property_panel, DashboardVm};
use astra::Request;
use std::collections::HashMap;
use url::form_urlencoded;

pub fn handle(req: Request, dashboard: &Dashboard) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);

    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") => dashboard_view(dashboard, None, None),
        ("GET", "/dashboard") => dashboard_view(
            dashboard,
            params.get("sheet").map(String::as_str),
            params.get("address").map(String::as_str),
        ),

        // htmx fragments
        ("GET", "/partials/addresses") => {
            let sheet = required(&params, "sheet")?;
            let addresses = sheet_addresses(dashboard, sheet)?;
            html_response(address_picker(&addresses))
        }
        ("GET", "/partials/property") => {
            let sheet = required(&params, "sheet")?;
            let address = required(&params, "address")?;
            let record = dashboard.property(sheet, address)?;
            html_response(property_panel(sheet, &record))
        }

        ("GET", "/api/property") => {
            let sheet = required(&params, "sheet")?;
            let address = required(&params, "address")?;
            json_response(&dashboard.property(sheet, address)?)
        }
        ("GET", "/export") => {
            let sheet = required(&params, "sheet")?;
            let address = required(&params, "address")?;
            let record = dashboard.property(sheet, address)?;
            export_price_history_xlsx(&record, sheet)
        }

        _ => Err(ServerError::NotFound),
    }
}

/// Full page. Missing selections fall back to the first sheet and its first address.
fn dashboard_view(dashboard: &Dashboard, sheet: Option<&str>, address: Option<&str>) -> ResultResp {
    let sheet = match sheet.or(dashboard.default_sheet()) {
        Some(s) => s.to_string(),
        None => {
            return Err(ServerError::DatasetError(
                "workbook has no worksheets".to_string(),
            ))
        }
    };

    let addresses = sheet_addresses(dashboard, &sheet)?;
    let address = address.or(addresses.first().map(String::as_str));
    let record = address
        .map(|a| dashboard.property(&sheet, a))
        .transpose()?;

    html_response(dashboard_page(&DashboardVm {
        sheets: dashboard.sheet_names().to_vec(),
        selected_sheet: sheet,
        addresses,
        record,
    }))
}

/// A sheet without an `Address` column simply has nothing to pick.
fn sheet_addresses(dashboard: &Dashboard, sheet: &str) -> Result<Vec<String>, ServerError> {
    match dashboard.addresses(sheet) {
        Ok(addresses) => Ok(addresses),
        Err(DatasetError::MissingColumn(col)) => {
            tracing::warn!(sheet, column = %col, "sheet has no address column");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    params
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ServerError::BadRequest(format!("missing '{key}' parameter")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
