//! Terminal session flow tests

use std::io::Cursor;
use vfriends::app::{
    doubt_create, doubt_get, doubt_list_unsolved, user_create, user_get, user_stats,
    DoubtCreateReq, UserCreateReq,
};
use vfriends::commands::{run_session, SessionOutcome};
use vfriends::domain::Role;
use vfriends::infra::db::init_test_db;
use vfriends::infra::DbPool;

// ──────────────────────── Helper ────────────────────────

fn session(pool: &DbPool, input: &str) -> (SessionOutcome, String) {
    let mut out = Vec::new();
    let outcome = run_session(pool, Cursor::new(input.as_bytes()), &mut out, 5).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

fn seed_doubt(pool: &DbPool, question: &str) -> i64 {
    let asker = user_create(
        pool,
        UserCreateReq {
            name: "Seed Asker".to_string(),
            role: Role::Asker,
        },
    )
    .unwrap();
    doubt_create(
        pool,
        DoubtCreateReq {
            question: question.to_string(),
            asker_id: asker.id,
        },
    )
    .unwrap()
    .id
}

// ══════════════════════════════════════════════════════════
//  role handling
// ══════════════════════════════════════════════════════════

#[test]
fn invalid_role_ends_without_registering() {
    let pool = init_test_db();
    let (outcome, out) = session(&pool, "Mira\nmentor\n");
    assert!(matches!(outcome, SessionOutcome::InvalidRole(ref r) if r == "mentor"));
    assert!(out.contains("Invalid role"));
    assert!(!out.contains("Leaderboard"));
    assert!(user_get(&pool, 1).is_err());
}

#[test]
fn empty_name_is_rejected() {
    let pool = init_test_db();
    let (outcome, out) = session(&pool, "   \nasker\n");
    assert!(matches!(outcome, SessionOutcome::Rejected(_)));
    assert!(out.contains("name is required"));
}

// ══════════════════════════════════════════════════════════
//  asker
// ══════════════════════════════════════════════════════════

#[test]
fn asker_posts_doubt_and_sees_leaderboard() {
    let pool = init_test_db();
    let (outcome, out) = session(&pool, "Mira\n  ASKER \nWhat is ownership?\n");

    let (user_id, doubt_id) = match outcome {
        SessionOutcome::Posted { user_id, doubt_id } => (user_id, doubt_id),
        other => panic!("expected Posted, got {:?}", other),
    };
    let doubt = doubt_get(&pool, doubt_id).unwrap();
    assert_eq!(doubt.question, "What is ownership?");
    assert_eq!(doubt.asker_id, user_id);
    assert!(out.contains("Your doubt has been posted"));
    assert!(out.contains("1. Mira | Points: 0 | Streak: 0"));
}

// ══════════════════════════════════════════════════════════
//  solver
// ══════════════════════════════════════════════════════════

#[test]
fn solver_with_no_doubts_ends_early() {
    let pool = init_test_db();
    let (outcome, out) = session(&pool, "Kai\nsolver\n");
    assert!(matches!(outcome, SessionOutcome::NoDoubts { .. }));
    assert!(out.contains("No doubts available"));
    assert!(!out.contains("Leaderboard"));
}

#[test]
fn solver_lists_and_resolves_doubt() {
    let pool = init_test_db();
    let doubt_id = seed_doubt(&pool, "Why is my iterator lazy?");

    let (outcome, out) = session(&pool, &format!("Kai\nsolver\n{}\n", doubt_id));

    assert!(out.contains(&format!("ID {}: Why is my iterator lazy?", doubt_id)));
    assert!(out.contains("earned 10 points"));
    assert!(out.contains("Streak: 1 | Level: 1 | Rookie Helper"));
    assert!(out.contains("1. Kai | Points: 10 | Streak: 1"));

    let resolved = match outcome {
        SessionOutcome::Resolved(resolved) => resolved,
        other => panic!("expected Resolved, got {:?}", other),
    };
    assert!(resolved.doubt_marked);
    assert!(doubt_list_unsolved(&pool).unwrap().is_empty());
    let stats = user_stats(&pool, resolved.solver_id).unwrap();
    assert_eq!(stats.doubts_solved, 1);
    assert_eq!(stats.user.points, 10);
}

#[test]
fn solver_non_integer_id_still_shows_leaderboard() {
    let pool = init_test_db();
    seed_doubt(&pool, "q");

    let (outcome, out) = session(&pool, "Kai\nsolver\nabc\n");

    assert!(matches!(outcome, SessionOutcome::InvalidDoubtId { ref input, .. } if input == "abc"));
    assert!(out.contains("Invalid input. Please enter a valid ID."));
    assert!(out.contains("Leaderboard"));
    assert_eq!(doubt_list_unsolved(&pool).unwrap().len(), 1);
}

#[test]
fn solver_unknown_id_warns() {
    let pool = init_test_db();
    seed_doubt(&pool, "q");

    let (outcome, out) = session(&pool, "Kai\nsolver\n999\n");

    let resolved = match outcome {
        SessionOutcome::Resolved(resolved) => resolved,
        other => panic!("expected Resolved, got {:?}", other),
    };
    assert!(!resolved.doubt_marked);
    assert!(out.contains("No doubt with ID 999 was found."));
    assert!(out.contains("You were still credited 10 points."));
    assert!(!out.contains("You solved a doubt"));
    assert_eq!(doubt_list_unsolved(&pool).unwrap().len(), 1);
}

#[test]
fn leaderboard_header_shows_capped_size() {
    let pool = init_test_db();
    let mut out = Vec::new();
    run_session(
        &pool,
        Cursor::new("Mira\nasker\nq\n".as_bytes()),
        &mut out,
        500,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Leaderboard (Top 100 Users):"));
}

#[test]
fn eof_on_role_prompt_is_invalid_role() {
    let pool = init_test_db();
    let (outcome, _) = session(&pool, "Kai\n");
    assert!(matches!(outcome, SessionOutcome::InvalidRole(ref r) if r.is_empty()));
}
