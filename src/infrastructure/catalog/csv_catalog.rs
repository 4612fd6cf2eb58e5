//! CSV catalog loader.
//!
//! Expected header columns (any order, extra columns ignored):
//! `Ticker`, `Name`, `embeddings`. The `embeddings` cell holds a JSON array
//! of numbers. Any malformed row fails the whole load; a partially loaded
//! catalog is never returned.

use crate::domain::entities::asset_record::AssetRecord;
use crate::domain::entities::catalog::EmbeddingCatalog;
use crate::domain::error::DomainError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const TICKER_COLUMN: &str = "Ticker";
pub const NAME_COLUMN: &str = "Name";
pub const EMBEDDING_COLUMN: &str = "embeddings";

pub fn load(path: &Path) -> Result<EmbeddingCatalog, DomainError> {
    let file = File::open(path).map_err(|e| {
        DomainError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open catalog {}: {e}", path.display()),
        ))
    })?;
    let catalog = load_from_reader(file)?;
    tracing::info!(
        path = %path.display(),
        rows = catalog.len(),
        dimension = catalog.dimension().unwrap_or(0),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<EmbeddingCatalog, DomainError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers().map_err(|e| DomainError::CatalogFormat {
        row: 0,
        reason: format!("unreadable header: {e}"),
    })?;
    let ticker_idx = column_index(headers, TICKER_COLUMN)?;
    let name_idx = column_index(headers, NAME_COLUMN)?;
    let emb_idx = column_index(headers, EMBEDDING_COLUMN)?;

    let mut records = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| DomainError::CatalogFormat {
            row,
            reason: format!("malformed CSV: {e}"),
        })?;

        let ticker = record.get(ticker_idx).unwrap_or("").trim();
        if ticker.is_empty() {
            return Err(DomainError::CatalogFormat {
                row,
                reason: "empty ticker".into(),
            });
        }
        let name = record.get(name_idx).unwrap_or("").trim();
        let raw = record.get(emb_idx).unwrap_or("");

        let embedding = parse_embedding(raw).map_err(|reason| DomainError::CatalogFormat {
            row,
            reason: format!("{ticker}: {reason}"),
        })?;

        records.push(AssetRecord::new(ticker.to_string(), name.to_string(), embedding));
    }

    // Records map one-to-one onto data rows, so the catalog's row numbers
    // are the file's.
    let catalog = EmbeddingCatalog::new(records)?;
    let dupes = catalog.duplicate_tickers();
    if !dupes.is_empty() {
        tracing::warn!(
            count = dupes.len(),
            tickers = %dupes.join(","),
            "catalog contains duplicate tickers; ranking treats them as separate rows"
        );
    }
    Ok(catalog)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DomainError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| DomainError::CatalogFormat {
            row: 0,
            reason: format!("missing column '{name}'"),
        })
}

fn parse_embedding(raw: &str) -> Result<Vec<f32>, String> {
    let values: Vec<f64> = serde_json::from_str(raw.trim())
        .map_err(|e| format!("embedding is not a JSON number array ({e})"))?;
    values
        .into_iter()
        .enumerate()
        .map(|(j, v)| {
            let f = v as f32;
            if f.is_finite() {
                Ok(f)
            } else {
                Err(format!("embedding value {j} is not a finite f32"))
            }
        })
        .collect()
}
