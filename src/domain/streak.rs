//! Streak update rule and display-only progress helpers.

use chrono::NaiveDate;

/// Date format used for `users.last_active`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Points credited per resolved doubt.
pub const POINTS_PER_RESOLUTION: i64 = 10;

const STREAK_MILESTONES: &[(i64, &str)] = &[
    (1, "Rookie Helper"),
    (3, "Consistent Helper"),
    (7, "Weekly Warrior"),
    (15, "Hero Helper"),
    (30, "Legend"),
    (60, "Master"),
    (100, "Grandmaster"),
];

/// Consecutive-day streak rule.
pub struct StreakRule;

impl StreakRule {
    /// Returns the new streak, or `None` when the streak must stay as it is.
    ///
    /// A missing `last_active` (never credited, or unparseable) resets to 1,
    /// like any gap other than exactly one day.
    pub fn next(today: NaiveDate, last_active: Option<NaiveDate>, streak: i64) -> Option<i64> {
        let Some(last) = last_active else {
            return Some(1);
        };
        match (today - last).num_days() {
            0 => None,
            1 => Some(streak + 1),
            _ => Some(1),
        }
    }
}

/// Reads a stored `last_active` value; anything not in `YYYY-MM-DD` form is treated as absent.
pub fn parse_activity_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
}

pub fn format_activity_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Level 1 for 0..=99 points, level 2 for 100..=199, and so on.
pub fn level_for_points(points: i64) -> i64 {
    points.max(0) / 100 + 1
}

/// Highest streak milestone reached.
pub fn streak_title(streak: i64) -> Option<&'static str> {
    STREAK_MILESTONES
        .iter()
        .rev()
        .find(|(days, _)| streak >= *days)
        .map(|(_, title)| *title)
}
