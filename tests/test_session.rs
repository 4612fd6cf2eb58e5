mod common;

use assetfinder::application::asset_detail::DetailRequest;
use assetfinder::application::session::Session;
use assetfinder::domain::error::DomainError;
use assetfinder::infrastructure::catalog::csv_catalog;
use assetfinder::AssetFinder;
use common::{FakeMarketData, KeywordEmbedder};
use std::sync::Arc;

#[tokio::test]
async fn test_search_pick_show() {
    let finder = common::setup();
    let mut session = Session::new();

    let results = finder
        .search_in_session(&mut session, "apple iphone", 3)
        .await
        .unwrap();
    assert_eq!(session.results(), results.as_slice());
    assert_eq!(session.last_query(), Some("apple iphone"));

    let picked = session.select_index(1).unwrap();
    assert_eq!(picked.label(), "AAPL - Apple Inc.");

    let detail = finder
        .detail_selected(&session, &DetailRequest::default())
        .await
        .unwrap();
    assert_eq!(detail.ticker, "AAPL");
    assert!(detail.has_chart());
}

#[tokio::test]
async fn test_show_without_selection() {
    let finder = common::setup();
    let session = Session::new();
    let err = finder
        .detail_selected(&session, &DetailRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let finder = common::setup();
    let mut a = Session::new();
    let mut b = Session::new();

    finder.search_in_session(&mut a, "bank", 2).await.unwrap();
    finder.search_in_session(&mut b, "software", 2).await.unwrap();

    a.select("JPM").unwrap();
    assert!(b.select("JPM").is_err());
    assert_eq!(b.results()[0].ticker, "MSFT");
    assert_eq!(a.selected().unwrap().ticker, "JPM");
}

#[tokio::test]
async fn test_pick_duplicate_ticker_by_position() {
    let rows = [
        ("SPY", "SPDR S&P 500 ETF Trust", "bank bank"),
        ("SPY", "SPDR S&P 500 (second listing)", "bank energy"),
    ];
    let file = common::write_catalog(&common::catalog_csv(&rows));
    let catalog = Arc::new(csv_catalog::load(file.path()).unwrap());
    let finder = AssetFinder::with_providers(
        catalog,
        Arc::new(KeywordEmbedder::new()),
        Arc::new(FakeMarketData::default()),
    )
    .unwrap();

    let mut session = Session::new();
    let results = finder.search_in_session(&mut session, "bank", 2).await.unwrap();
    assert_eq!(results[1].display_name, "SPDR S&P 500 (second listing)");

    assert_eq!(
        session.select_index(2).unwrap().display_name,
        "SPDR S&P 500 (second listing)"
    );
    assert_eq!(
        session.selected().unwrap().display_name,
        "SPDR S&P 500 (second listing)"
    );
}
