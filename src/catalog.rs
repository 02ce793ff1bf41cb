//! In-memory instrument catalog built from the broker's scrip-master CSV.
//!
//! The catalog maps a normalized (trimmed, uppercased) display name to one
//! [`InstrumentRecord`]. Reloads build a complete new map and swap it in
//! atomically; a request that already took a snapshot keeps reading the old
//! map and never observes a half-built one.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::broker::types::OptionType;
use crate::constants::catalog as columns;
use crate::error::CatalogError;

/// One row of the reference catalog.
#[derive(Clone, Debug)]
pub struct InstrumentRecord {
    pub display_name: String,
    pub underlying_symbol: String,
    pub expiry_date: Option<NaiveDate>,
    pub option_type: Option<OptionType>,
    pub strike_price: Option<Decimal>,
    pub security_id: String,
}

/// Normalized catalog key: trimmed, uppercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

type CatalogMap = HashMap<String, InstrumentRecord>;

/// Shared, read-mostly instrument mapping.
///
/// Readers clone the inner `Arc` (one pointer copy under a read lock) and
/// do all lookups against that snapshot. Writers replace the whole `Arc`.
#[derive(Clone)]
pub struct InstrumentCatalog {
    records: Arc<RwLock<Arc<CatalogMap>>>,
}

impl Default for InstrumentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InstrumentCatalog {
    /// Create an empty catalog. Every lookup misses until a load succeeds.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Arc::new(HashMap::new()))),
        }
    }

    /// Current snapshot of the mapping. Never blocks on a concurrent reload.
    pub fn snapshot(&self) -> Arc<CatalogMap> {
        self.records.read().unwrap().clone()
    }

    fn replace(&self, map: CatalogMap) {
        *self.records.write().unwrap() = Arc::new(map);
    }

    /// Case-insensitive, whitespace-trimmed exact lookup. No fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.snapshot()
            .get(&normalize_name(name))
            .map(|r| r.security_id.clone())
    }

    /// Full record lookup, same key normalization as [`lookup`](Self::lookup).
    pub fn get(&self, name: &str) -> Option<InstrumentRecord> {
        self.snapshot().get(&normalize_name(name)).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Fetch the dataset from `source` (http(s) URL or local path) and swap
    /// it in. On any failure the previous contents stay live.
    pub async fn load(
        &self,
        client: &reqwest::Client,
        source: &str,
    ) -> Result<usize, CatalogError> {
        let data = if source.starts_with("http://") || source.starts_with("https://") {
            client
                .get(source)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        } else {
            std::fs::read_to_string(source)?
        };
        self.load_from_csv(&data)
    }

    /// Parse a scrip-master CSV and atomically replace the mapping.
    ///
    /// Rows missing the display name or the security id are skipped, not
    /// errors. A structurally broken dataset is an error and leaves the
    /// catalog untouched.
    pub fn load_from_csv(&self, data: &str) -> Result<usize, CatalogError> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let headers = reader.headers()?.clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let display_idx = col(columns::DISPLAY_NAME)
            .or_else(|| col(columns::SYMBOL_NAME))
            .ok_or(CatalogError::MissingColumn(columns::DISPLAY_NAME))?;
        let id_idx = col(columns::SECURITY_ID)
            .ok_or(CatalogError::MissingColumn(columns::SECURITY_ID))?;
        let underlying_idx = col(columns::UNDERLYING_SYMBOL);
        let expiry_idx = col(columns::EXPIRY_DATE);
        let option_type_idx = col(columns::OPTION_TYPE);
        let strike_idx = col(columns::STRIKE_PRICE);

        let mut map: CatalogMap = HashMap::new();
        let mut skipped = 0usize;

        for row in reader.records() {
            let row = row?;
            let display = row.get(display_idx).unwrap_or("").trim();
            let security_id = row.get(id_idx).unwrap_or("").trim();
            if display.is_empty() || security_id.is_empty() {
                skipped += 1;
                continue;
            }

            let field = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i)).map(str::trim).unwrap_or("")
            };

            let record = InstrumentRecord {
                display_name: display.to_string(),
                underlying_symbol: field(underlying_idx).to_string(),
                expiry_date: NaiveDate::parse_from_str(field(expiry_idx), "%Y-%m-%d").ok(),
                option_type: OptionType::parse(field(option_type_idx)),
                strike_price: field(strike_idx)
                    .parse::<Decimal>()
                    .ok()
                    .map(|d| d.normalize()),
                security_id: security_id.to_string(),
            };
            map.insert(normalize_name(display), record);
        }

        let count = map.len();
        self.replace(map);
        if skipped > 0 {
            debug!("catalog load skipped {} incomplete rows", skipped);
        }
        info!("instrument catalog swapped in: {} instruments", count);
        Ok(count)
    }
}
