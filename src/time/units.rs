const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// One of the four displayed countdown units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Whole days, unbounded above.
    Days,
    /// Hours within the current day, `0..=23`.
    Hours,
    /// Minutes within the current hour, `0..=59`.
    Minutes,
    /// Seconds within the current minute, `0..=59`.
    Seconds,
}

impl TimeUnit {
    /// Display order, left to right.
    pub const ORDER: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    /// Fixed label text, before upper-casing.
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Days => "Days",
            TimeUnit::Hours => "Hours",
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Seconds => "Seconds",
        }
    }
}

/// A remaining-seconds count split into days, hours, minutes and seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeUnits {
    /// Whole days.
    pub days: u64,
    /// Hours, `0..=23`.
    pub hours: u64,
    /// Minutes, `0..=59`.
    pub minutes: u64,
    /// Seconds, `0..=59`.
    pub seconds: u64,
}

impl TimeUnits {
    /// Split `total_secs` using the 86400/3600/60 divisors.
    pub fn from_secs(total_secs: u64) -> Self {
        Self {
            days: total_secs / SECS_PER_DAY,
            hours: (total_secs % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total_secs % SECS_PER_MINUTE,
        }
    }

    /// Inverse of [`TimeUnits::from_secs`].
    pub fn total_secs(self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// Value of one unit.
    pub fn get(self, unit: TimeUnit) -> u64 {
        match unit {
            TimeUnit::Days => self.days,
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Seconds => self.seconds,
        }
    }

    /// `(unit, value)` pairs in display order.
    pub fn iter(self) -> impl Iterator<Item = (TimeUnit, u64)> {
        TimeUnit::ORDER.into_iter().map(move |u| (u, self.get(u)))
    }
}

/// Format a unit value as at least two zero-padded digits; wider values keep every digit.
pub fn format_unit_value(value: u64) -> String {
    format!("{value:02}")
}

#[cfg(test)]
#[path = "../../tests/unit/time/units.rs"]
mod tests;
