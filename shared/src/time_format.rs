//! Time formatting for the clock readout
//!
//! Turns a wall-clock time into the display string under the 12/24-hour and
//! show-seconds preferences.

use chrono::Timelike;

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    AM,
    PM,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// Convert a 24-hour value (0-23) to a 12-hour value (1-12) and its meridiem
pub fn to_12_hour(hour24: u32) -> (u32, Meridiem) {
    let meridiem = if hour24 < 12 { Meridiem::AM } else { Meridiem::PM };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    (hour12, meridiem)
}

/// Format `now` as `HH:MM`, `HH:MM:SS`, `HH:MM AM` or `HH:MM:SS AM`
pub fn format_time<T: Timelike>(now: &T, show_seconds: bool, use_12h: bool) -> String {
    let (hour, meridiem) = if use_12h {
        let (h, m) = to_12_hour(now.hour());
        (h, Some(m))
    } else {
        (now.hour(), None)
    };

    let mut out = format!("{:02}:{:02}", hour, now.minute());
    if show_seconds {
        out.push_str(&format!(":{:02}", now.second()));
    }
    if let Some(meridiem) = meridiem {
        out.push_str(&format!(" {}", meridiem));
    }
    out
}
