use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::dataset::{ListingWorkbook, SourceFetcher};
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod dashboard;
mod dataset;
mod domain;
mod errors;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    // 1️⃣ Load settings
    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Make sure the workbook is on disk, then open it
    let dashboard = match open_dashboard(&settings) {
        Ok(d) => Arc::new(d),
        Err(e) => {
            tracing::error!("❌ Dataset initialization failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr: SocketAddr = match settings.server_address.parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("❌ Bad server_address '{}': {e}", settings.server_address);
            std::process::exit(1);
        }
    };
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(settings.max_workers);

    // 4️⃣ Serve requests, passing the dashboard handle into the closure
    let result = server.serve(move |req, _info| match handle(req, &dashboard) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!("Server ended with error: {e}");
    }

    tracing::info!("Server shut down cleanly.");
}

fn open_dashboard(settings: &Settings) -> Result<Dashboard, dataset::DatasetError> {
    let fetcher = SourceFetcher::new(settings.download_timeout_secs)?;
    fetcher.ensure_local(&settings.dataset_url, &settings.dataset_path)?;

    let workbook = ListingWorkbook::open(&settings.dataset_path)?;
    tracing::info!(sheets = ?workbook.sheet_names(), "✅ workbook ready");

    Ok(Dashboard::new(workbook, settings.extract_options()))
}
