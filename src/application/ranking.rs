//! Exact top-K ranking of catalog entries by cosine similarity.
//!
//! Brute-force O(N·D) scan. Results are ordered by descending similarity;
//! the sort is stable, so equal scores keep catalog insertion order and
//! output is reproducible for a fixed catalog and query.

use crate::domain::entities::catalog::EmbeddingCatalog;
use crate::domain::entities::ranked_result::RankedResult;
use crate::domain::values::similarity::{cosine_with_norms, norm};

pub const DEFAULT_K: usize = 10;

pub fn rank(query: &[f32], catalog: &EmbeddingCatalog, k: usize) -> Vec<RankedResult> {
    if k == 0 || catalog.is_empty() {
        return vec![];
    }

    let query_norm = norm(query);
    let mut scored: Vec<(usize, f64)> = catalog
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let sim = cosine_with_norms(query, query_norm, record.embedding(), record.norm());
            (i, sim)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);

    let records = catalog.records();
    scored
        .into_iter()
        .map(|(i, similarity)| RankedResult {
            ticker: records[i].ticker.clone(),
            display_name: records[i].display_name.clone(),
            similarity,
        })
        .collect()
}
