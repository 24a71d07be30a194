// fetcher.rs
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use super::DatasetError;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Zip container (xlsx, ods) and OLE compound file (xls) signatures.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, DatasetError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DatasetError::Download(e.to_string()))?;

        Ok(Self { client })
    }

    /// Downloads `url` to `path` unless the file is already there.
    /// Returns whether a download happened.
    pub fn ensure_local(&self, url: &str, path: &Path) -> Result<bool, DatasetError> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "dataset already present, skipping download");
            return Ok(false);
        }

        tracing::info!(%url, path = %path.display(), "downloading dataset");

        let bytes = match self.fetch(url)? {
            Fetched::Workbook(bytes) => bytes,
            // Drive answers large files with a "can't scan for viruses" page first.
            Fetched::Interstitial => {
                tracing::warn!("got an HTML page instead of the workbook, retrying with confirm=t");
                match self.fetch(&with_confirm(url)?)? {
                    Fetched::Workbook(bytes) => bytes,
                    Fetched::Interstitial => {
                        return Err(DatasetError::Download(
                            "remote returned an HTML page instead of a workbook".into(),
                        ))
                    }
                }
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target first so a failed write never leaves a half file behind.
        let partial = path.with_extension("part");
        fs::write(&partial, &bytes)?;
        fs::rename(&partial, path)?;

        tracing::info!(bytes = bytes.len(), path = %path.display(), "dataset saved");
        Ok(true)
    }

    fn fetch(&self, url: &str) -> Result<Fetched, DatasetError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DatasetError::Download(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DatasetError::Download(format!("HTTP {status} from {url}")));
        }

        let is_html = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with(mime::TEXT_HTML.essence_str()))
            .unwrap_or(false);

        let bytes = resp
            .bytes()
            .map_err(|e| DatasetError::Download(e.to_string()))?;

        if looks_like_workbook(&bytes) {
            Ok(Fetched::Workbook(bytes.to_vec()))
        } else if is_html {
            Ok(Fetched::Interstitial)
        } else {
            Err(DatasetError::Download(format!(
                "{} bytes from {url} are not a spreadsheet",
                bytes.len()
            )))
        }
    }
}

enum Fetched {
    Workbook(Vec<u8>),
    Interstitial,
}

pub fn looks_like_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC)
}

fn with_confirm(url: &str) -> Result<String, DatasetError> {
    let mut parsed = Url::parse(url).map_err(|e| DatasetError::Download(format!("{url}: {e}")))?;
    parsed.query_pairs_mut().append_pair("confirm", "t");
    Ok(parsed.into())
}
