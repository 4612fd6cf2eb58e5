pub mod asset_detail;
pub mod encoder;
pub mod ranking;
pub mod search;
pub mod session;
