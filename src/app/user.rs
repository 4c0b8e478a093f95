//! User use cases: register, look up, credit points, track activity.

use crate::domain::{
    format_activity_date, level_for_points, parse_activity_date, streak_title, Role,
};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, name, role, points, streak, last_active";

#[derive(Debug)]
pub struct UserCreateReq {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub points: i64,
    pub streak: i64,
    pub last_active: Option<String>,
}

/// Last credited day and current streak of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserActivity {
    pub last_active: Option<NaiveDate>,
    pub streak: i64,
}

#[derive(Debug)]
pub struct UserStatsDto {
    pub user: UserDto,
    pub doubts_asked: i64,
    pub doubts_solved: i64,
    pub level: i64,
    pub title: Option<String>,
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<UserDto> {
    let role: String = row.get(2)?;
    let role = role.parse::<Role>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;
    Ok(UserDto {
        id: row.get(0)?,
        name: row.get(1)?,
        role,
        points: row.get(3)?,
        streak: row.get(4)?,
        last_active: row.get(5)?,
    })
}

/// Registers a user with no points, no streak and no recorded activity.
pub fn user_create(pool: &DbPool, req: UserCreateReq) -> Result<UserDto, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }

    let conn = get_connection(pool);
    conn.execute(
        "INSERT INTO users (name, role, points, streak, last_active) VALUES (?1, ?2, 0, 0, NULL)",
        params![name, req.role.as_str()],
    )
    .map_err(|e| AppError::Db(e.to_string()))?;
    let id = conn.last_insert_rowid();
    log::info!("Registered {} #{} ({})", req.role, id, name);

    Ok(UserDto {
        id,
        name: name.to_string(),
        role: req.role,
        points: 0,
        streak: 0,
        last_active: None,
    })
}

pub fn user_get(pool: &DbPool, id: i64) -> Result<UserDto, AppError> {
    let conn = get_connection(pool);
    conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
        [id],
        row_to_user,
    )
    .optional()
    .map_err(|e| AppError::Db(e.to_string()))?
    .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
}

/// All users with `role`, in registration order.
pub fn user_list_by_role(pool: &DbPool, role: Role) -> Result<Vec<UserDto>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM users WHERE role = ?1 ORDER BY id",
            USER_COLUMNS
        ))
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt.query_map([role.as_str()], row_to_user)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
    }
    Ok(out)
}

pub(crate) fn add_points(conn: &Connection, user_id: i64, delta: i64) -> Result<bool, AppError> {
    if delta < 0 {
        return Err(AppError::Validation("points can only increase".into()));
    }
    let changed = conn
        .execute(
            "UPDATE users SET points = points + ?1 WHERE id = ?2",
            params![delta, user_id],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    if changed == 0 {
        log::warn!("add_points: no user #{}", user_id);
    }
    Ok(changed > 0)
}

/// Adds `delta` points. Returns false when the user does not exist.
pub fn user_add_points(pool: &DbPool, user_id: i64, delta: i64) -> Result<bool, AppError> {
    let conn = get_connection(pool);
    add_points(&conn, user_id, delta)
}

pub(crate) fn activity(conn: &Connection, user_id: i64) -> Result<Option<UserActivity>, AppError> {
    let row: Option<(Option<String>, i64)> = conn
        .query_row(
            "SELECT last_active, streak FROM users WHERE id = ?1",
            [user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()
        .map_err(|e| AppError::Db(e.to_string()))?;
    Ok(row.map(|(last_active, streak)| UserActivity {
        last_active: parse_activity_date(last_active.as_deref()),
        streak,
    }))
}

/// Activity record of a user; `None` when the user does not exist.
pub fn user_activity(pool: &DbPool, user_id: i64) -> Result<Option<UserActivity>, AppError> {
    let conn = get_connection(pool);
    activity(&conn, user_id)
}

pub(crate) fn set_activity(
    conn: &Connection,
    user_id: i64,
    streak: i64,
    date: NaiveDate,
) -> Result<bool, AppError> {
    let changed = conn
        .execute(
            "UPDATE users SET streak = ?1, last_active = ?2 WHERE id = ?3",
            params![streak, format_activity_date(date), user_id],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    Ok(changed > 0)
}

/// Overwrites streak and last-active date. Returns false when the user does not exist.
pub fn user_set_activity(
    pool: &DbPool,
    user_id: i64,
    streak: i64,
    date: NaiveDate,
) -> Result<bool, AppError> {
    let conn = get_connection(pool);
    set_activity(&conn, user_id, streak, date)
}

pub fn user_stats(pool: &DbPool, user_id: i64) -> Result<UserStatsDto, AppError> {
    let user = user_get(pool, user_id)?;
    let conn = get_connection(pool);
    let (doubts_asked, doubts_solved): (i64, i64) = conn
        .query_row(
            "SELECT
                (SELECT COUNT(1) FROM doubts WHERE asker_id = ?1),
                (SELECT COUNT(1) FROM doubts WHERE solver_id = ?1 AND is_solved = 1)",
            [user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .map_err(|e| AppError::Db(e.to_string()))?;

    Ok(UserStatsDto {
        level: level_for_points(user.points),
        title: streak_title(user.streak).map(str::to_string),
        user,
        doubts_asked,
        doubts_solved,
    })
}
