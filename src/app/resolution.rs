//! Doubt resolution: mark solved, credit the solver, update the solver's streak.

use super::doubt::mark_solved;
use super::user::{activity, add_points, set_activity};
use crate::domain::{StreakRule, POINTS_PER_RESOLUTION};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::DbPool;
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub previous: i64,
    pub current: i64,
    /// False when the solver was already credited today.
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    pub doubt_id: i64,
    pub solver_id: i64,
    /// False when no doubt has `doubt_id`.
    pub doubt_marked: bool,
    /// Points added to the solver; 0 when the solver row is missing.
    pub points_awarded: i64,
    /// `None` when the solver row is missing.
    pub streak: Option<StreakUpdate>,
}

/// Resolves a doubt as of today's local date.
pub fn doubt_resolve(
    pool: &DbPool,
    doubt_id: i64,
    solver_id: i64,
) -> Result<ResolutionOutcome, AppError> {
    doubt_resolve_on(pool, doubt_id, solver_id, Local::now().date_naive())
}

/// Resolves a doubt as of `today`.
///
/// Marking, crediting and the streak update commit together. Neither id is
/// validated: an unknown doubt is left alone while the solver is still
/// credited, and resolving a solved doubt again credits again.
pub fn doubt_resolve_on(
    pool: &DbPool,
    doubt_id: i64,
    solver_id: i64,
    today: NaiveDate,
) -> Result<ResolutionOutcome, AppError> {
    let conn = get_connection(pool);
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| AppError::Db(e.to_string()))?;

    let doubt_marked = mark_solved(&tx, doubt_id, solver_id)?;
    let credited = add_points(&tx, solver_id, POINTS_PER_RESOLUTION)?;

    let streak = match activity(&tx, solver_id)? {
        None => None,
        Some(current) => match StreakRule::next(today, current.last_active, current.streak) {
            None => Some(StreakUpdate {
                previous: current.streak,
                current: current.streak,
                changed: false,
            }),
            Some(next) => {
                set_activity(&tx, solver_id, next, today)?;
                Some(StreakUpdate {
                    previous: current.streak,
                    current: next,
                    changed: true,
                })
            }
        },
    };

    tx.commit().map_err(|e| AppError::Db(e.to_string()))?;

    log::info!(
        "Resolved doubt #{} by user #{} (marked: {}, credited: {}, streak: {:?})",
        doubt_id,
        solver_id,
        doubt_marked,
        credited,
        streak.map(|s| s.current)
    );

    Ok(ResolutionOutcome {
        doubt_id,
        solver_id,
        doubt_marked,
        points_awarded: if credited { POINTS_PER_RESOLUTION } else { 0 },
        streak,
    })
}
