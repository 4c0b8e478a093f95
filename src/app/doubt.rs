//! Doubt use cases: post, list, look up, mark solved.

use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use rusqlite::{params, Connection, OptionalExtension, Row};

const DOUBT_COLUMNS: &str = "id, question, asker_id, solver_id, is_solved";

#[derive(Debug)]
pub struct DoubtCreateReq {
    pub question: String,
    pub asker_id: i64,
}

#[derive(Debug, Clone)]
pub struct DoubtDto {
    pub id: i64,
    pub question: String,
    pub asker_id: i64,
    pub solver_id: Option<i64>,
    pub is_solved: bool,
}

fn row_to_doubt(row: &Row<'_>) -> rusqlite::Result<DoubtDto> {
    Ok(DoubtDto {
        id: row.get(0)?,
        question: row.get(1)?,
        asker_id: row.get(2)?,
        solver_id: row.get(3)?,
        is_solved: row.get::<_, i32>(4)? != 0,
    })
}

fn list_where(conn: &Connection, clause: &str, args: &[i64]) -> Result<Vec<DoubtDto>, AppError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM doubts WHERE {} ORDER BY id",
            DOUBT_COLUMNS, clause
        ))
        .map_err(|e| AppError::Db(e.to_string()))?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args), row_to_doubt)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
    }
    Ok(out)
}

/// Posts an unsolved doubt. The asker id is not checked against `users`.
pub fn doubt_create(pool: &DbPool, req: DoubtCreateReq) -> Result<DoubtDto, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question is required".into()));
    }

    let conn = get_connection(pool);
    conn.execute(
        "INSERT INTO doubts (question, asker_id, solver_id, is_solved) VALUES (?1, ?2, NULL, 0)",
        params![question, req.asker_id],
    )
    .map_err(|e| AppError::Db(e.to_string()))?;
    let id = conn.last_insert_rowid();
    log::info!("Doubt #{} posted by user #{}", id, req.asker_id);

    Ok(DoubtDto {
        id,
        question: question.to_string(),
        asker_id: req.asker_id,
        solver_id: None,
        is_solved: false,
    })
}

pub fn doubt_get(pool: &DbPool, id: i64) -> Result<DoubtDto, AppError> {
    let conn = get_connection(pool);
    conn.query_row(
        &format!("SELECT {} FROM doubts WHERE id = ?1", DOUBT_COLUMNS),
        [id],
        row_to_doubt,
    )
    .optional()
    .map_err(|e| AppError::Db(e.to_string()))?
    .ok_or_else(|| AppError::NotFound(format!("doubt {}", id)))
}

/// Every doubt still waiting for a solver, oldest first.
pub fn doubt_list_unsolved(pool: &DbPool) -> Result<Vec<DoubtDto>, AppError> {
    let conn = get_connection(pool);
    list_where(&conn, "is_solved = 0", &[])
}

pub fn doubt_list_by_asker(pool: &DbPool, asker_id: i64) -> Result<Vec<DoubtDto>, AppError> {
    let conn = get_connection(pool);
    list_where(&conn, "asker_id = ?1", &[asker_id])
}

pub(crate) fn mark_solved(conn: &Connection, doubt_id: i64, solver_id: i64) -> Result<bool, AppError> {
    let changed = conn
        .execute(
            "UPDATE doubts SET is_solved = 1, solver_id = ?1 WHERE id = ?2",
            params![solver_id, doubt_id],
        )
        .map_err(|e| AppError::Db(e.to_string()))?;
    if changed == 0 {
        log::warn!("mark_solved: no doubt #{}", doubt_id);
    }
    Ok(changed > 0)
}

/// Sets the solved flag and solver. Returns false when the doubt does not exist.
/// Already solved doubts are overwritten, not rejected.
pub fn doubt_mark_solved(pool: &DbPool, doubt_id: i64, solver_id: i64) -> Result<bool, AppError> {
    let conn = get_connection(pool);
    mark_solved(&conn, doubt_id, solver_id)
}
