use serde::{Deserialize, Serialize};

/// Company attributes from the market-data provider. Every field may be
/// absent upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<u64>,
    pub summary: Option<String>,
}

impl Fundamentals {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sector.is_none()
            && self.industry.is_none()
            && self.market_cap.is_none()
            && self.summary.is_none()
    }

    /// Market cap with thousands separators, e.g. `$2,950,000,000`.
    pub fn market_cap_display(&self) -> Option<String> {
        self.market_cap.map(|cap| format!("${}", group_thousands(cap)))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_cap_display() {
        let f = Fundamentals {
            market_cap: Some(2_950_000_000),
            ..Default::default()
        };
        assert_eq!(f.market_cap_display().as_deref(), Some("$2,950,000,000"));
    }

    #[test]
    fn test_small_and_missing_caps() {
        let f = Fundamentals {
            market_cap: Some(999),
            ..Default::default()
        };
        assert_eq!(f.market_cap_display().as_deref(), Some("$999"));
        assert_eq!(Fundamentals::default().market_cap_display(), None);
        assert!(Fundamentals::default().is_empty());
    }
}
