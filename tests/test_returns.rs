mod common;

use assetfinder::compute_returns;
use assetfinder::domain::error::DomainError;
use assetfinder::domain::values::return_kind::ReturnKind;
use assetfinder::domain::values::return_stats::{histogram, select_returns, summarize};

#[test]
fn test_reference_series() {
    let out = compute_returns(&common::series("T", &[100.0, 110.0, 99.0])).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out.rows[0].bar.date, common::date(2));
    assert_eq!(out.rows[1].bar.date, common::date(3));

    let simple = out.simple_returns();
    assert!((simple[0] - 0.10).abs() < 1e-9);
    assert!((simple[1] + 0.10).abs() < 1e-9);

    let log = out.log_returns();
    assert!((log[0] - 1.10_f64.ln()).abs() < 1e-9);
    assert!((log[1] - 0.9_f64.ln()).abs() < 1e-9);
}

#[test]
fn test_one_row_is_insufficient() {
    let err = compute_returns(&common::series("T", &[100.0])).unwrap_err();
    assert!(matches!(err, DomainError::InsufficientData { rows: 1 }));
    assert!(!err.is_fatal());
}

#[test]
fn test_zero_close_is_invalid_price() {
    let err = compute_returns(&common::series("T", &[100.0, 0.0, 101.0])).unwrap_err();
    assert!(matches!(err, DomainError::InvalidPrice { close, .. } if close == 0.0));
}

#[test]
fn test_stats_and_histogram_agree() {
    let returns = compute_returns(&common::series(
        "T",
        &[100.0, 101.0, 99.0, 102.0, 102.5, 98.0, 100.0],
    ))
    .unwrap();
    let stats = summarize(&returns, ReturnKind::Log, None).unwrap();
    assert_eq!(stats.count, 6);

    let values = select_returns(&returns, ReturnKind::Log, None);
    let bins = histogram(&values, 4);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), stats.count);
    assert_eq!(bins.first().unwrap().lower, stats.min);
    assert_eq!(bins.last().unwrap().upper, stats.max);
}
