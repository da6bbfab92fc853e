use super::*;
use crate::style::policy::Profile;
use chrono::TimeZone;

fn params(time: &str) -> RequestParams {
    RequestParams {
        time: Some(time.to_owned()),
        ..RequestParams::default()
    }
}

#[test]
fn missing_or_empty_time_is_missing_input() {
    let policy = RenderPolicy::default();
    let err = resolve_request(&RequestParams::default(), &policy).unwrap_err();
    assert!(matches!(err, CountdownError::MissingInput(_)));

    let err = resolve_request(&params("   "), &policy).unwrap_err();
    assert!(matches!(err, CountdownError::MissingInput(_)));
}

#[test]
fn unparsable_time_is_invalid_input() {
    let policy = RenderPolicy::default();
    for bad in ["tomorrow", "2030-13-01", "2030-02-30T00:00:00Z", "12345", "2030-01-01T25:00"] {
        let err = resolve_request(&params(bad), &policy).unwrap_err();
        assert!(
            matches!(err, CountdownError::InvalidInput(_)),
            "{bad:?} gave {err}"
        );
    }
}

#[test]
fn parses_iso_8601_variants() {
    let midnight = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_target_instant("2030-01-01T00:00:00Z").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T07:00:00+07:00").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T00:00:00.000Z").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T00:00:00").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T00:00").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T00:00Z").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01 00:00:00").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01").unwrap(), midnight);
    assert_eq!(parse_target_instant(" 2030-01-01 ").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T09:00+09:00").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T07:00:00+0700").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T07:00:00+07").unwrap(), midnight);
    assert_eq!(
        parse_target_instant("2029-12-31T19:00:00.5-05:00").unwrap(),
        midnight + chrono::Duration::milliseconds(500)
    );
    assert_eq!(parse_target_instant("2030-01-01T00Z").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01-01T00").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030-01").unwrap(), midnight);
    assert_eq!(parse_target_instant("2030").unwrap(), midnight);
}

#[test]
fn malformed_zones_and_dates_are_rejected() {
    for bad in [
        "2030-01-01T00:00:00+7",
        "2030-01-01T00:00:00+07:0",
        "2030-01-01T00:00:00+24:00",
        "2030-01-01T00:00+",
        "2030-1",
        "2030-01-01-01",
        "2030-00",
        "2030-01-01T",
        "2030-01-01T00:00+1é1",
    ] {
        assert!(parse_target_instant(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn bare_date_with_z_is_rejected() {
    assert!(parse_target_instant("2030-01-01Z").is_err());
}

#[test]
fn invalid_colors_fall_back_to_defaults() {
    let policy = RenderPolicy::default();
    let mut p = params("2030-01-01");
    p.boxcolor = Some("GGGGGG".into());
    p.textcolor = Some("12345".into());
    p.labelcolor = Some("1234567".into());
    p.bg1 = Some(String::new());
    p.bg2 = Some("#1e3050".into());

    let style = resolve_request(&p, &policy).unwrap().style;
    assert_eq!(style, StyleConfig::defaults(&policy));
    assert_eq!(style.box_color, policy.box_default);
    assert_eq!(style.text_color, policy.text_default);
    assert_eq!(style.label_color, policy.label_default);
}

#[test]
fn valid_colors_override_defaults() {
    let policy = RenderPolicy::default();
    let mut p = params("2030-01-01");
    p.bg1 = Some("4a0e0e".into());
    p.bg2 = Some("8E2F17".into());
    p.boxcolor = Some("c2482a".into());
    p.textcolor = Some("ffffff".into());
    p.labelcolor = Some("fdd3c9".into());

    let style = resolve_request(&p, &policy).unwrap().style;
    assert_eq!(
        style.background,
        Background::Gradient {
            start: Rgb8::new(0x4a, 0x0e, 0x0e),
            end: Rgb8::new(0x8e, 0x2f, 0x17),
        }
    );
    assert_eq!(style.box_color, Some(Rgb8::new(0xc2, 0x48, 0x2a)));
    assert_eq!(style.label_color, Rgb8::new(0xfd, 0xd3, 0xc9));
}

#[test]
fn compact_background_is_flat_or_transparent() {
    let policy = Profile::Compact.policy();
    let mut p = params("2030-01-01");
    assert_eq!(resolve_style(&p, &policy).background, Background::Transparent);

    p.bg = Some("zzzzzz".into());
    assert_eq!(resolve_style(&p, &policy).background, Background::Transparent);

    p.bg = Some("ffffff".into());
    assert_eq!(
        resolve_style(&p, &policy).background,
        Background::Flat(Rgb8::new(255, 255, 255))
    );

    p.boxcolor = Some("123456".into());
    assert_eq!(resolve_style(&p, &policy).box_color, None);
}

#[test]
fn frame_count_clamps_and_defaults() {
    let policy = RenderPolicy::default();
    let fc = |raw: Option<&str>| resolve_frame_count(raw, &policy);
    assert_eq!(fc(None), 5);
    assert_eq!(fc(Some("")), 5);
    assert_eq!(fc(Some("abc")), 5);
    assert_eq!(fc(Some("0")), 5);
    assert_eq!(fc(Some("-3")), 5);
    assert_eq!(fc(Some("1")), 1);
    assert_eq!(fc(Some("10")), 10);
    assert_eq!(fc(Some("60")), 60);
    assert_eq!(fc(Some("61")), 60);
    assert_eq!(fc(Some("99999999999999999999999")), 60);
    assert_eq!(fc(Some("10.5")), 10);
    assert_eq!(fc(Some(" 7s")), 7);

    for d in 1..=200u32 {
        assert_eq!(fc(Some(&d.to_string())), d.clamp(1, 60));
    }
}

#[test]
fn frame_count_uses_profile_ceiling() {
    let compact = Profile::Compact.policy();
    assert_eq!(resolve_frame_count(Some("60"), &compact), 10);
    assert_eq!(resolve_frame_count(Some("3"), &compact), 3);

    let still = Profile::Still.policy();
    assert_eq!(resolve_frame_count(Some("30"), &still), 1);
    assert_eq!(resolve_frame_count(None, &still), 1);
}

#[test]
fn leading_int_parsing() {
    assert_eq!(parse_leading_int("42"), Some(42));
    assert_eq!(parse_leading_int("  +8"), Some(8));
    assert_eq!(parse_leading_int("-12x"), Some(-12));
    assert_eq!(parse_leading_int("x12"), None);
    assert_eq!(parse_leading_int("-"), None);
    assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
    assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
}

#[test]
fn from_pairs_keeps_the_first_value_of_each_key() {
    let params = RequestParams::from_pairs([
        ("time", "2030-01-01"),
        ("duration", "3"),
        ("duration", "4"),
        ("bg1", "nothex"),
        ("bg1", "ffffff"),
        ("utm_source", "mail"),
    ]);
    assert_eq!(params.time.as_deref(), Some("2030-01-01"));
    assert_eq!(params.duration.as_deref(), Some("3"));
    assert_eq!(params.bg1.as_deref(), Some("nothex"));

    let style = resolve_style(&params, &RenderPolicy::default());
    assert_eq!(style.frame_count, 3);
    assert_eq!(
        style.background,
        StyleConfig::defaults(&RenderPolicy::default()).background
    );
}
