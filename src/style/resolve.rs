use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::style::policy::{BackgroundPolicy, CellLayout, RenderPolicy};

/// Raw, unvalidated request parameters as they arrive in the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// Target instant, ISO-8601.
    pub time: Option<String>,
    /// Requested animation length in frames (one frame per simulated second).
    pub duration: Option<String>,
    /// Gradient top color.
    pub bg1: Option<String>,
    /// Gradient bottom color.
    pub bg2: Option<String>,
    /// Flat background color (profiles without a gradient).
    pub bg: Option<String>,
    /// Digit box fill.
    pub boxcolor: Option<String>,
    /// Value text color.
    pub textcolor: Option<String>,
    /// Unit label color.
    pub labelcolor: Option<String>,
}

impl RequestParams {
    /// Collect decoded query pairs. The first occurrence of a key wins; unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "time" => &mut params.time,
                "duration" => &mut params.duration,
                "bg1" => &mut params.bg1,
                "bg2" => &mut params.bg2,
                "bg" => &mut params.bg,
                "boxcolor" => &mut params.boxcolor,
                "textcolor" => &mut params.textcolor,
                "labelcolor" => &mut params.labelcolor,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Background fill resolved for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// Vertical two-stop gradient, `start` at the top.
    Gradient {
        /// Top color.
        start: Rgb8,
        /// Bottom color.
        end: Rgb8,
    },
    /// Single flat color.
    Flat(Rgb8),
    /// Nothing drawn; pixels stay fully transparent.
    Transparent,
}

/// Fully validated styling for one request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Background fill.
    pub background: Background,
    /// Digit box fill; `None` skips the backdrop.
    pub box_color: Option<Rgb8>,
    /// Value text color.
    pub text_color: Rgb8,
    /// Unit label color.
    pub label_color: Rgb8,
    /// Number of frames to emit.
    pub frame_count: u32,
    /// Whether the animation repeats forever.
    pub looping: bool,
    /// Cell geometry.
    pub cells: CellLayout,
}

impl StyleConfig {
    /// Style with every default of `policy` and its default frame count.
    pub fn defaults(policy: &RenderPolicy) -> Self {
        resolve_style(&RequestParams::default(), policy)
    }
}

/// Output of the resolver: validated style plus the parsed target instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRequest {
    /// Validated style.
    pub style: StyleConfig,
    /// Instant the countdown counts toward.
    pub target: DateTime<Utc>,
}

/// Validate a request: the target instant is required, everything else falls back silently.
pub fn resolve_request(
    params: &RequestParams,
    policy: &RenderPolicy,
) -> CountdownResult<ResolvedRequest> {
    let raw_time = params
        .time
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| CountdownError::missing_input("\"time\" parameter is required"))?;
    let target = parse_target_instant(raw_time)?;
    Ok(ResolvedRequest {
        style: resolve_style(params, policy),
        target,
    })
}

/// Resolve the cosmetic parameters. Invalid values never error; they take the profile default.
pub fn resolve_style(params: &RequestParams, policy: &RenderPolicy) -> StyleConfig {
    let color = |raw: &Option<String>, default: Rgb8| -> Rgb8 {
        raw.as_deref().and_then(Rgb8::from_hex6).unwrap_or(default)
    };

    let background = match policy.background {
        BackgroundPolicy::Gradient { start, end } => Background::Gradient {
            start: color(&params.bg1, start),
            end: color(&params.bg2, end),
        },
        BackgroundPolicy::FlatOrTransparent => params
            .bg
            .as_deref()
            .and_then(Rgb8::from_hex6)
            .map_or(Background::Transparent, Background::Flat),
    };

    StyleConfig {
        canvas: policy.canvas,
        background,
        box_color: policy.box_default.map(|d| color(&params.boxcolor, d)),
        text_color: color(&params.textcolor, policy.text_default),
        label_color: color(&params.labelcolor, policy.label_default),
        frame_count: resolve_frame_count(params.duration.as_deref(), policy),
        looping: policy.frames.looping,
        cells: policy.cells,
    }
}

/// Requested duration to frame count: below one or non-numeric gives the default, above the
/// ceiling is clamped down.
pub fn resolve_frame_count(raw: Option<&str>, policy: &RenderPolicy) -> u32 {
    let frames = policy.frames;
    if frames.single {
        return 1;
    }
    match raw.and_then(parse_leading_int) {
        Some(d) if d >= 1 => u32::try_from(d).unwrap_or(u32::MAX).min(frames.max),
        _ => frames.default,
    }
}

/// Parse a leading decimal integer the lenient way: surrounding whitespace and an optional sign,
/// then as many digits as follow. Trailing garbage is ignored (`"10.5"` is 10). Digit runs too
/// large for `i64` saturate.
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let value = digits
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    Some(if negative && value != i64::MIN {
        -value
    } else {
        value
    })
}

/// Parse an ISO-8601 target instant.
///
/// The date is `YYYY-MM-DD`, `YYYY-MM` or `YYYY` (missing parts default to the first). An optional
/// time follows after `T` or a space: `HH`, `HH:MM` or `HH:MM:SS[.fff]`, then an optional zone:
/// `Z`, `±HH`, `±HHMM` or `±HH:MM`. Times without a zone, and dates without a time, are UTC. A zone
/// is only accepted after a time.
pub fn parse_target_instant(raw: &str) -> CountdownResult<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_iso_parts(s).ok_or_else(|| {
        CountdownError::invalid_input(format!("\"time\" is not an ISO-8601 instant: {s:?}"))
    })
}

fn parse_iso_parts(s: &str) -> Option<DateTime<Utc>> {
    let (date_part, time_part) = match s.find(['T', 't', ' ']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let date = parse_iso_date(date_part)?;
    let Some(time_part) = time_part else {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    };

    let (clock, offset) = split_zone(time_part)?;
    let naive = date.and_time(parse_iso_clock(clock)?);
    match offset {
        Some(offset) => Some(
            naive
                .and_local_timezone(offset)
                .single()?
                .with_timezone(&Utc),
        ),
        None => Some(naive.and_utc()),
    }
}

fn digits<T: std::str::FromStr>(s: &str, len: usize) -> Option<T> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = digits::<i32>(parts.next()?, 4)?;
    let month = parts.next().map_or(Some(1), |m| digits::<u32>(m, 2))?;
    let day = parts.next().map_or(Some(1), |d| digits::<u32>(d, 2))?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso_clock(s: &str) -> Option<NaiveTime> {
    if let Some(hour) = digits::<u32>(s, 2) {
        return NaiveTime::from_hms_opt(hour, 0, 0);
    }
    ["%H:%M:%S%.f", "%H:%M"]
        .into_iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Split a trailing zone designator off a time. `None` means the designator is malformed.
fn split_zone(s: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(clock) = s.strip_suffix(['Z', 'z']) {
        return Some((clock, FixedOffset::east_opt(0)));
    }
    let Some(i) = s.rfind(['+', '-']) else {
        return Some((s, None));
    };
    let rest = &s[i + 1..];
    if !rest.is_ascii() {
        return None;
    }
    let (hh, mm) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    let (hours, minutes) = (digits::<i32>(hh, 2)?, digits::<i32>(mm, 2)?);
    if hours > 23 || minutes > 59 {
        return None;
    }
    let secs = hours * 3600 + minutes * 60;
    let secs = if s.as_bytes()[i] == b'-' { -secs } else { secs };
    Some((&s[..i], Some(FixedOffset::east_opt(secs)?)))
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
