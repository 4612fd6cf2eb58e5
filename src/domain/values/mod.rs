pub mod lookback;
pub mod return_kind;
pub mod return_stats;
pub mod returns;
pub mod similarity;
