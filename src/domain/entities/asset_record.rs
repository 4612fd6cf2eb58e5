use serde::Serialize;

/// One searchable asset: ticker, display name and its precomputed embedding.
#[derive(Debug, Clone, Serialize)]
pub struct AssetRecord {
    pub ticker: String,
    pub display_name: String,
    #[serde(skip)]
    embedding: Vec<f32>,
    #[serde(skip)]
    norm: f64,
}

impl AssetRecord {
    pub fn new(ticker: String, display_name: String, embedding: Vec<f32>) -> Self {
        let norm = crate::domain::values::similarity::norm(&embedding);
        Self {
            ticker,
            display_name,
            embedding,
            norm,
        }
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    /// Euclidean norm, computed once at construction.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_is_cached() {
        let r = AssetRecord::new("AAPL".into(), "Apple Inc.".into(), vec![3.0, 4.0]);
        assert!((r.norm() - 5.0).abs() < 1e-12);
        assert_eq!(r.dimension(), 2);
    }

    #[test]
    fn test_zero_vector_has_zero_norm() {
        let r = AssetRecord::new("ZERO".into(), "Zero".into(), vec![0.0; 4]);
        assert_eq!(r.norm(), 0.0);
    }
}
