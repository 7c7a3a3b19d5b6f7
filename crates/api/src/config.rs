//! Service configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use whs_documents::PartnerProfile;

use crate::source::CsvTarget;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CSV_PATH: &str = "/inventarios.csv";
pub const DEFAULT_SOURCE_LABEL: &str = "inventarios.csv";
pub const DEFAULT_SERVICE_NAME: &str = "grupoayala-michelin-beta";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Where inventory CSV text is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSourceConfig {
    Http(CsvTarget),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub csv_source: CsvSourceConfig,
    /// Echoed as `source` in the flat listing.
    pub source_label: String,
    /// Reported by `/health`.
    pub service_name: String,
    pub partner: PartnerProfile,
    pub fetch_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            csv_source: CsvSourceConfig::Http(CsvTarget::OriginPath(DEFAULT_CSV_PATH.to_string())),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            partner: PartnerProfile::default(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Read the process environment.
    ///
    /// - `BIND_ADDR` (default `0.0.0.0:8080`)
    /// - `CSV_FILE`: local file; wins over the HTTP settings
    /// - `CSV_URL`: absolute URL of the CSV
    /// - `CSV_PATH`: path on the request origin (default `/inventarios.csv`)
    /// - `CSV_SOURCE_LABEL`, `SERVICE_NAME`
    /// - `PARTNER_DOCUMENT_ID` (default `C1`), `PARTNER_CONTRACT_ID` (default `00001`)
    /// - `FETCH_TIMEOUT_SECS` (default 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let csv_source = if let Some(file) = get("CSV_FILE") {
            CsvSourceConfig::File(PathBuf::from(file))
        } else if let Some(url) = get("CSV_URL") {
            CsvSourceConfig::Http(CsvTarget::Url(url))
        } else {
            let path = get("CSV_PATH").unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());
            let path = if path.starts_with('/') { path } else { format!("/{path}") };
            CsvSourceConfig::Http(CsvTarget::OriginPath(path))
        };

        let fetch_timeout = match get("FETCH_TIMEOUT_SECS") {
            None => defaults.fetch_timeout,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "invalid FETCH_TIMEOUT_SECS; using default");
                    defaults.fetch_timeout
                }
            },
        };

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            csv_source,
            source_label: get("CSV_SOURCE_LABEL").unwrap_or(defaults.source_label),
            service_name: get("SERVICE_NAME").unwrap_or(defaults.service_name),
            partner: PartnerProfile {
                document_id: get("PARTNER_DOCUMENT_ID").unwrap_or(defaults.partner.document_id),
                contract_id: get("PARTNER_CONTRACT_ID").unwrap_or(defaults.partner.contract_id),
                variant: defaults.partner.variant,
            },
            fetch_timeout,
        }
    }
}
