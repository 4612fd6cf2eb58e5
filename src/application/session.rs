use crate::domain::entities::ranked_result::RankedResult;
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Per-user browsing state: the last search and the asset picked from it.
///
/// Owned by the caller and passed into handlers; nothing here is global.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    last_query: Option<String>,
    results: Vec<RankedResult>,
    /// Position in `results`, so duplicate tickers stay distinguishable.
    selected: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            last_query: None,
            results: vec![],
            selected: None,
        }
    }

    /// Replace the shortlist and drop any selection made from the old one.
    pub fn record_search(&mut self, query: &str, results: Vec<RankedResult>) {
        self.last_query = Some(query.to_string());
        self.results = results;
        self.selected = None;
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    /// Select the first result with this ticker.
    pub fn select(&mut self, ticker: &str) -> Result<&RankedResult, DomainError> {
        let idx = self
            .results
            .iter()
            .position(|r| r.ticker.eq_ignore_ascii_case(ticker))
            .ok_or_else(|| DomainError::NotFound(format!("{ticker} is not in the current results")))?;
        self.selected = Some(idx);
        Ok(&self.results[idx])
    }

    /// Select by 1-based position in the current results.
    pub fn select_index(&mut self, position: usize) -> Result<&RankedResult, DomainError> {
        if position == 0 || position > self.results.len() {
            return Err(DomainError::InvalidInput(format!(
                "pick a number between 1 and {}",
                self.results.len()
            )));
        }
        self.selected = Some(position - 1);
        Ok(&self.results[position - 1])
    }

    pub fn selected(&self) -> Option<&RankedResult> {
        self.selected.and_then(|i| self.results.get(i))
    }
}
