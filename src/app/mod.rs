//! Application use cases and transactions.

mod doubt;
mod leaderboard;
mod resolution;
mod user;

pub use doubt::{
    doubt_create, doubt_get, doubt_list_by_asker, doubt_list_unsolved, doubt_mark_solved,
    DoubtCreateReq, DoubtDto,
};
pub use leaderboard::{
    leaderboard_limit, leaderboard_top, LeaderboardEntryDto, DEFAULT_LEADERBOARD_SIZE,
};
pub use resolution::{doubt_resolve, doubt_resolve_on, ResolutionOutcome, StreakUpdate};
pub use user::{
    user_activity, user_add_points, user_create, user_get, user_list_by_role, user_set_activity,
    user_stats, UserActivity, UserCreateReq, UserDto, UserStatsDto,
};
