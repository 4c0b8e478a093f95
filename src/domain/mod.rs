//! Domain rules: roles, streaks, progress.

mod role;
mod streak;

pub use role::Role;
pub use streak::{
    format_activity_date, level_for_points, parse_activity_date, streak_title, StreakRule,
    DATE_FORMAT, POINTS_PER_RESOLUTION,
};
