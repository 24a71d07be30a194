use maud::{html, Markup};

/// Worksheet selector. Changing it swaps in a fresh address picker.
pub fn sheet_select(sheets: &[String], selected: &str) -> Markup {
    html! {
        label for="sheet" { "Select Sheet" }
        select
            name="sheet"
            id="sheet"
            hx-get="/partials/addresses"
            hx-target="#address-picker"
            hx-swap="innerHTML"
            hx-trigger="change"
        {
            @for sheet in sheets {
                option value=(sheet) selected[sheet == selected] { (sheet) }
            }
        }
    }
}

/// Address selector for one sheet. With `eager`, it also loads the property
/// panel for the preselected address as soon as it is swapped in.
pub fn address_select(addresses: &[String], selected: Option<&str>, eager: bool) -> Markup {
    let trigger = if eager { "load, change" } else { "change" };

    html! {
        label for="address" { "Select Address" }
        select
            name="address"
            id="address"
            hx-get="/partials/property"
            hx-include="[name='sheet']"
            hx-target="#property-panel"
            hx-swap="innerHTML"
            hx-trigger=(trigger)
        {
            @for address in addresses {
                option value=(address) selected[Some(address.as_str()) == selected] { (address) }
            }
        }
    }
}
