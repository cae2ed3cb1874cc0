//! Wall clock used to stamp new messages.

use time::OffsetDateTime;

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Local time when the offset can be determined, UTC otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Two-digit 12-hour display time, e.g. `"02:05 PM"`.
#[must_use]
pub fn display_time(at: OffsetDateTime) -> String {
    let hour = at.hour();
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}:{:02} {meridiem}", at.minute())
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
