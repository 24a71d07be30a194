pub mod price_history;
pub mod property;

pub use price_history::{PairingMode, PriceHistory};
pub use property::{addresses, extract_with, ExtractOptions, PropertyRecord};
