use crate::domain::entities::asset_record::AssetRecord;
use crate::domain::error::DomainError;
use std::collections::HashMap;

/// Ordered, immutable set of assets searched against.
///
/// Every record shares one dimensionality; construction rejects anything
/// else so ranking never compares vectors of different lengths.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingCatalog {
    records: Vec<AssetRecord>,
    dimension: Option<usize>,
}

impl EmbeddingCatalog {
    pub fn new(records: Vec<AssetRecord>) -> Result<Self, DomainError> {
        let mut dimension = None;
        for (i, record) in records.iter().enumerate() {
            let dim = record.dimension();
            if dim == 0 {
                return Err(DomainError::CatalogFormat {
                    row: i + 1,
                    reason: format!("empty embedding for {}", record.ticker),
                });
            }
            match dimension {
                None => dimension = Some(dim),
                Some(expected) if expected != dim => {
                    return Err(DomainError::CatalogFormat {
                        row: i + 1,
                        reason: format!(
                            "embedding for {} has {dim} values, expected {expected}",
                            record.ticker
                        ),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Self { records, dimension })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shared vector size; `None` for an empty catalog.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRecord> {
        self.records.iter()
    }

    /// Tickers that appear more than once, in first-seen order.
    pub fn duplicate_tickers(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for r in &self.records {
            let c = counts.entry(r.ticker.as_str()).or_insert(0);
            *c += 1;
            if *c == 2 {
                order.push(r.ticker.clone());
            }
        }
        order
    }
}
