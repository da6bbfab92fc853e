use chrono::TimeZone;

use super::*;

#[test]
fn example_urls_cover_each_theme() {
    let target = Utc.with_ymd_and_hms(2026, 10, 24, 8, 30, 0).unwrap();
    let urls = example_urls("http://localhost:3000/", target);
    let names: Vec<_> = urls.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["default", "warm", "green"]);

    assert_eq!(
        urls[0].1,
        "http://localhost:3000/api/countdown.gif?time=2026-10-24T08:30:00.000Z&duration=10"
    );
    assert!(urls[1].1.contains("bg1=4a0e0e&bg2=8e2f17&boxcolor=c2482a"));
    assert!(urls[2].1.ends_with("labelcolor=b6e6ce"));
}
