//! Statistics Unit Tests.

use cachesim_core::CacheStats;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn rates_are_undefined_before_any_access() {
    let stats = CacheStats::default();
    assert_eq!(stats.accesses(), 0);
    assert_eq!(stats.hit_rate(), None);
    assert_eq!(stats.miss_rate(), None);
    assert_eq!(stats.hit_percent(), None);
}

#[rstest]
#[case(1, 1, 50.0, 50.0)]
#[case(3, 1, 75.0, 25.0)]
#[case(0, 8, 0.0, 100.0)]
#[case(5, 0, 100.0, 0.0)]
fn percentages(#[case] hits: u64, #[case] misses: u64, #[case] hit: f64, #[case] miss: f64) {
    let stats = CacheStats::new(hits, misses);
    assert_eq!(stats.hit_percent(), Some(hit));
    assert_eq!(stats.miss_percent(), Some(miss));
}

#[test]
fn rates_sum_to_one() {
    let stats = CacheStats::new(7, 13);
    let sum = stats.hit_rate().unwrap() + stats.miss_rate().unwrap();
    assert!((sum - 1.0).abs() < 1e-12);
}

#[test]
fn render_shows_counters_and_rates() {
    let text = CacheStats::new(1, 3).render("gcc.trace");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "gcc.trace");
    assert!(lines[0].chars().all(|c| c == '='));
    assert!(text.contains("accesses                 4"));
    assert!(text.contains("hit_rate                 25.000000%"));
    assert!(text.contains("miss_rate                75.000000%"));
}

#[test]
fn render_marks_missing_rates() {
    let text = CacheStats::default().render("empty");
    assert!(text.contains("hit_rate                 n/a"));
}
