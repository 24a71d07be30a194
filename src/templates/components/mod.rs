use maud::{html, Markup};

pub mod attributes;
pub mod card;
pub mod chart;
pub mod error;
pub mod pickers;

pub use attributes::attribute_list;
pub use card::card;
pub use chart::price_chart;
pub use error::error_page;
pub use pickers::{address_select, sheet_select};

pub fn button(label: &str) -> Markup {
    html! {
        button type="submit" class="btn" { (label) }
    }
}
