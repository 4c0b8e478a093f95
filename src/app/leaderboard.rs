//! Leaderboard: top users by points.

use crate::domain::{level_for_points, streak_title};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;
const MAX_LEADERBOARD_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct LeaderboardEntryDto {
    pub rank: usize,
    pub user_id: i64,
    pub name: String,
    pub points: i64,
    pub streak: i64,
    pub level: i64,
    pub title: Option<String>,
}

/// Number of entries `leaderboard_top(n)` returns at most.
pub fn leaderboard_limit(n: usize) -> usize {
    n.min(MAX_LEADERBOARD_SIZE)
}

/// Top `n` users by points, highest first; equal points keep registration order.
pub fn leaderboard_top(pool: &DbPool, n: usize) -> Result<Vec<LeaderboardEntryDto>, AppError> {
    let limit = leaderboard_limit(n) as i64;
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare("SELECT id, name, points, streak FROM users ORDER BY points DESC, id ASC LIMIT ?1")
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt
        .query_map([limit], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, i64>(3)?,
            ))
        })
        .map_err(|e| AppError::Db(e.to_string()))?;

    let mut out = Vec::new();
    for (i, r) in rows.enumerate() {
        let (user_id, name, points, streak) = r.map_err(|e| AppError::Db(e.to_string()))?;
        out.push(LeaderboardEntryDto {
            rank: i + 1,
            user_id,
            name,
            points,
            streak,
            level: level_for_points(points),
            title: streak_title(streak).map(str::to_string),
        });
    }
    Ok(out)
}
