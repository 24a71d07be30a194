use maud::{html, Markup};
use url::Url;

use crate::dataset::Cell;
use crate::domain::PropertyRecord;

/// Sidebar list of the listing attributes. Values that are absent, zero or
/// blank are left out; renders nothing when no attribute has a value.
pub fn attribute_list(record: &PropertyRecord) -> Markup {
    let shown: Vec<_> = record
        .attributes()
        .into_iter()
        .filter_map(|(label, field)| {
            field
                .value()
                .filter(|v| v.is_truthy())
                .map(|v| (label, v, field.conflicts()))
        })
        .collect();

    html! {
        @if !shown.is_empty() {
            div class="address-info" {
                h4 { "Address Information" }
                ul {
                    @for (label, value, conflicts) in &shown {
                        li {
                            strong { (label) ":" } " "
                            (attribute_value(label, value))
                            @if *conflicts > 0 {
                                " " span class="muted" title="Other rows for this address disagree" {
                                    "(+" (conflicts) " other)"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn attribute_value(label: &str, value: &Cell) -> Markup {
    match (label, value.as_text().and_then(web_link)) {
        ("Zillow Link", Some(href)) => html! {
            a href=(href.as_str()) target="_blank" rel="noopener" { "View on Zillow" }
        },
        _ => html! { (value.to_string()) },
    }
}

/// Only http(s) URLs become links; anything else is shown as text.
fn web_link(raw: &str) -> Option<Url> {
    Url::parse(raw.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
