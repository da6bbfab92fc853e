use super::*;

#[test]
fn decompose_then_reconstruct_is_exact() {
    let samples = [
        0u64,
        1,
        59,
        60,
        3_599,
        3_600,
        86_399,
        86_400,
        5 * 86_400,
        5 * 86_400 - 1,
        123 * 86_400 + 7 * 3_600 + 8 * 60 + 9,
        u64::from(u32::MAX),
    ];
    for s in samples {
        let u = TimeUnits::from_secs(s);
        assert_eq!(u.total_secs(), s, "round trip for {s}");
        assert!(u.hours <= 23);
        assert!(u.minutes <= 59);
        assert!(u.seconds <= 59);
    }
}

#[test]
fn splits_known_value() {
    let u = TimeUnits::from_secs(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
    assert_eq!(
        u,
        TimeUnits {
            days: 2,
            hours: 3,
            minutes: 4,
            seconds: 5
        }
    );
}

#[test]
fn iter_follows_display_order() {
    let u = TimeUnits::from_secs(86_400 + 2 * 3_600 + 3 * 60 + 4);
    let pairs: Vec<_> = u.iter().collect();
    assert_eq!(
        pairs,
        vec![
            (TimeUnit::Days, 1),
            (TimeUnit::Hours, 2),
            (TimeUnit::Minutes, 3),
            (TimeUnit::Seconds, 4),
        ]
    );
}

#[test]
fn values_are_zero_padded_but_never_truncated() {
    assert_eq!(format_unit_value(0), "00");
    assert_eq!(format_unit_value(5), "05");
    assert_eq!(format_unit_value(59), "59");
    assert_eq!(format_unit_value(100), "100");
    assert_eq!(format_unit_value(12_345), "12345");
}

#[test]
fn labels_are_fixed() {
    let labels: Vec<_> = TimeUnit::ORDER.iter().map(|u| u.label()).collect();
    assert_eq!(labels, vec!["Days", "Hours", "Minutes", "Seconds"]);
}
