use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assetfinder", version, about = "Find financial assets by description and inspect their returns")]
pub struct Cli {
    /// Catalog CSV (overrides ASSETFINDER_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank catalog assets against a free-text query
    Search {
        query: String,
        /// Number of results (defaults to ASSETFINDER_DEFAULT_LIMIT or 10)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fundamentals, history, returns and distribution for one ticker
    Show {
        ticker: String,
        /// History window (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
        #[arg(long, default_value = "5y")]
        period: String,
        /// Return column to summarize (simple or log)
        #[arg(long = "returns", default_value = "simple")]
        return_type: String,
        /// Only summarize the last N returns
        #[arg(long)]
        window: Option<usize>,
        /// Histogram bin count
        #[arg(long, default_value = "30")]
        bins: usize,
    },
    /// Company fundamentals
    Fundamentals { ticker: String },
    /// Daily price history
    History {
        ticker: String,
        #[arg(long, default_value = "5y")]
        period: String,
    },
    /// Daily simple and log returns with summary statistics
    Returns {
        ticker: String,
        #[arg(long, default_value = "5y")]
        period: String,
        #[arg(long = "returns", default_value = "simple")]
        return_type: String,
        #[arg(long)]
        window: Option<usize>,
    },
    /// Catalog size, dimensionality and duplicate tickers
    Catalog,
    /// Search and pick assets in a line-oriented session
    Interactive {
        #[arg(long, default_value = "5y")]
        period: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["assetfinder", "search", "electric cars", "--limit", "5"]).unwrap();
        match cli.command {
            Commands::Search { query, limit } => {
                assert_eq!(query, "electric cars");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_show_defaults_and_global_catalog() {
        let cli = Cli::try_parse_from(["assetfinder", "show", "AAPL", "--catalog", "/tmp/c.csv"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/c.csv")));
        match cli.command {
            Commands::Show { ticker, period, return_type, window, bins } => {
                assert_eq!(ticker, "AAPL");
                assert_eq!(period, "5y");
                assert_eq!(return_type, "simple");
                assert_eq!(window, None);
                assert_eq!(bins, 30);
            }
            _ => panic!("expected show"),
        }
    }
}
