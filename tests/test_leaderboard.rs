//! Leaderboard integration tests

use vfriends::app::{leaderboard_top, user_add_points, user_create, UserCreateReq};
use vfriends::domain::Role;
use vfriends::infra::db::init_test_db;
use vfriends::infra::DbPool;

fn user_with_points(pool: &DbPool, name: &str, points: i64) -> i64 {
    let user = user_create(
        pool,
        UserCreateReq {
            name: name.to_string(),
            role: Role::Solver,
        },
    )
    .unwrap();
    if points > 0 {
        user_add_points(pool, user.id, points).unwrap();
    }
    user.id
}

#[test]
fn empty_store_has_empty_leaderboard() {
    let pool = init_test_db();
    assert!(leaderboard_top(&pool, 5).unwrap().is_empty());
}

#[test]
fn never_more_than_n_and_sorted_by_points() {
    let pool = init_test_db();
    for (i, points) in [30, 10, 70, 0, 50, 20, 60].iter().enumerate() {
        user_with_points(&pool, &format!("u{}", i), *points);
    }

    let board = leaderboard_top(&pool, 5).unwrap();
    assert_eq!(board.len(), 5);
    let points: Vec<i64> = board.iter().map(|e| e.points).collect();
    assert_eq!(points, vec![70, 60, 50, 30, 20]);
    let ranks: Vec<usize> = board.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}

#[test]
fn fewer_users_than_n() {
    let pool = init_test_db();
    user_with_points(&pool, "only", 10);
    let board = leaderboard_top(&pool, 5).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "only");
}

#[test]
fn ties_keep_registration_order() {
    let pool = init_test_db();
    let first = user_with_points(&pool, "first", 10);
    let second = user_with_points(&pool, "second", 10);
    let board = leaderboard_top(&pool, 5).unwrap();
    assert_eq!(board[0].user_id, first);
    assert_eq!(board[1].user_id, second);
}

#[test]
fn includes_askers_and_zero_point_users() {
    let pool = init_test_db();
    user_create(
        &pool,
        UserCreateReq {
            name: "asker".to_string(),
            role: Role::Asker,
        },
    )
    .unwrap();
    let board = leaderboard_top(&pool, 5).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].points, 0);
    assert_eq!(board[0].level, 1);
    assert_eq!(board[0].title, None);
}

#[test]
fn zero_limit_returns_nothing() {
    let pool = init_test_db();
    user_with_points(&pool, "a", 10);
    assert!(leaderboard_top(&pool, 0).unwrap().is_empty());
}

#[test]
fn level_follows_points() {
    let pool = init_test_db();
    user_with_points(&pool, "veteran", 250);
    assert_eq!(leaderboard_top(&pool, 1).unwrap()[0].level, 3);
}
