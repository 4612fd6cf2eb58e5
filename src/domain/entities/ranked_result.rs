use serde::Serialize;

/// A catalog entry scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub ticker: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Cosine similarity in [-1, 1].
    pub similarity: f64,
}

impl RankedResult {
    /// "TICKER - Name", the label shown when picking a result.
    pub fn label(&self) -> String {
        format!("{} - {}", self.ticker, self.display_name)
    }
}
