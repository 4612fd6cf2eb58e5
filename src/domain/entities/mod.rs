pub mod asset_record;
pub mod catalog;
pub mod fundamentals;
pub mod price_series;
pub mod ranked_result;
