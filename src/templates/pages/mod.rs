pub mod dashboard;

pub use dashboard::{address_picker, dashboard_page, property_panel, DashboardVm};
