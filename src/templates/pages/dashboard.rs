use crate::domain::PropertyRecord;
use crate::templates::components::{
    address_select, attribute_list, button, card, price_chart, sheet_select,
};
use crate::templates::desktop_layout;
use maud::{html, Markup};
use url::form_urlencoded;

pub struct DashboardVm {
    pub sheets: Vec<String>,
    pub selected_sheet: String,
    pub addresses: Vec<String>,
    pub record: Option<PropertyRecord>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let selected_address = vm.record.as_ref().map(|r| r.address.as_str());

    desktop_layout(
        "Arizona Properties Dashboard",
        html! {
            div class="shell" {
                aside {
                    h2 { "Settings" }
                    // Plain GET form so the page still works without htmx.
                    form action="/dashboard" method="get" {
                        (sheet_select(&vm.sheets, &vm.selected_sheet))
                        div id="address-picker" {
                            (address_select(&vm.addresses, selected_address, false))
                        }
                        noscript { (button("Show")) }
                    }
                    p class="info" { "Select a sheet and address to view the price trend." }
                }

                main {
                    h1 { "Arizona Properties Dashboard" }
                    div id="property-panel" {
                        @if let Some(record) = &vm.record {
                            (property_panel(&vm.selected_sheet, record))
                        } @else {
                            p class="muted" { "This sheet has no addresses." }
                        }
                    }
                }
            }
        },
    )
}

/// Fragment swapped in when the sheet changes.
pub fn address_picker(addresses: &[String]) -> Markup {
    address_select(addresses, addresses.first().map(String::as_str), true)
}

/// Chart, attributes and download links for one address.
pub fn property_panel(sheet: &str, record: &PropertyRecord) -> Markup {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("sheet", sheet)
        .append_pair("address", &record.address)
        .finish();

    html! {
        @if record.is_empty() {
            p class="muted" { "No listings found for " strong { (record.address) } "." }
        } @else {
            @if !record.price_history.is_empty() {
                section class="card" {
                    (price_chart(&record.address, &record.price_history))
                }
            }

            (card("Listing", html! {
                (attribute_list(record))
                p class="muted" {
                    a href=(format!("/export?{query}")) { "Download price history (.xlsx)" }
                    " · "
                    a href=(format!("/api/property?{query}")) { "JSON" }
                }
            }))
        }
    }
}
