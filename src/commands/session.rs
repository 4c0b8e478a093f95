//! Interactive terminal session: register, then post or resolve a doubt, then show the leaderboard.

use crate::app::{
    doubt_create, doubt_list_unsolved, doubt_resolve, leaderboard_limit, leaderboard_top,
    user_create, user_stats, DoubtCreateReq, LeaderboardEntryDto, ResolutionOutcome,
    UserCreateReq,
};
use crate::domain::Role;
use crate::error::AppError;
use crate::infra::DbPool;
use std::io::{BufRead, Write};

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    InvalidRole(String),
    /// Empty name or question.
    Rejected(String),
    Posted { user_id: i64, doubt_id: i64 },
    NoDoubts { user_id: i64 },
    InvalidDoubtId { user_id: i64, input: String },
    Resolved(ResolutionOutcome),
}

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Prints `label` and reads one line without its line ending. EOF reads as empty.
    fn prompt(&mut self, label: &str) -> Result<String, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

pub fn run_session<R: BufRead, W: Write>(
    pool: &DbPool,
    input: R,
    output: W,
    leaderboard_size: usize,
) -> Result<SessionOutcome, AppError> {
    let mut term = Terminal { input, output };

    term.say("==========================")?;
    term.say(" Welcome to Vfriends App!")?;
    term.say("==========================")?;

    let name = term.prompt("Enter your name: ")?;
    let role_input = term.prompt("Are you a Doubt Asker or Solver? (asker/solver): ")?;

    let Some(role) = Role::parse_input(&role_input) else {
        term.say("Invalid role. Please restart and type 'asker' or 'solver'.")?;
        return Ok(SessionOutcome::InvalidRole(role_input.trim().to_string()));
    };

    let user = match user_create(pool, UserCreateReq { name, role }) {
        Ok(user) => user,
        Err(AppError::Validation(msg)) => {
            term.say(&format!("Invalid input: {}. Please restart.", msg))?;
            return Ok(SessionOutcome::Rejected(msg));
        }
        Err(e) => return Err(e),
    };

    let outcome = match role {
        Role::Asker => {
            let question = term.prompt("\nEnter your doubt/question: ")?;
            let doubt = match doubt_create(
                pool,
                DoubtCreateReq {
                    question,
                    asker_id: user.id,
                },
            ) {
                Ok(doubt) => doubt,
                Err(AppError::Validation(msg)) => {
                    term.say(&format!("Invalid input: {}. Please restart.", msg))?;
                    return Ok(SessionOutcome::Rejected(msg));
                }
                Err(e) => return Err(e),
            };
            term.say("\n✅ Your doubt has been posted. A solver will help you soon!")?;
            SessionOutcome::Posted {
                user_id: user.id,
                doubt_id: doubt.id,
            }
        }
        Role::Solver => {
            let doubts = doubt_list_unsolved(pool)?;
            if doubts.is_empty() {
                term.say("\n📭 No doubts available at the moment. Come back later!")?;
                return Ok(SessionOutcome::NoDoubts { user_id: user.id });
            }

            term.say("\n📝 Available Doubts:")?;
            for d in &doubts {
                term.say(&format!("ID {}: {}", d.id, d.question))?;
            }

            let raw = term.prompt("\nEnter the ID of the doubt you want to solve: ")?;
            match raw.trim().parse::<i64>() {
                Ok(doubt_id) => {
                    let resolved = doubt_resolve(pool, doubt_id, user.id)?;
                    if resolved.doubt_marked {
                        term.say(&format!(
                            "\n🎉 You solved a doubt and earned {} points!",
                            resolved.points_awarded
                        ))?;
                    } else {
                        term.say(&format!("⚠️ No doubt with ID {} was found.", doubt_id))?;
                        term.say(&format!(
                            "You were still credited {} points.",
                            resolved.points_awarded
                        ))?;
                    }
                    let stats = user_stats(pool, user.id)?;
                    let title = stats
                        .title
                        .as_deref()
                        .map(|t| format!(" | {}", t))
                        .unwrap_or_default();
                    term.say(&format!(
                        "Streak: {} | Level: {}{}",
                        stats.user.streak, stats.level, title
                    ))?;
                    SessionOutcome::Resolved(resolved)
                }
                Err(_) => {
                    log::debug!("Rejected doubt id input {:?}", raw);
                    term.say("❌ Invalid input. Please enter a valid ID.")?;
                    SessionOutcome::InvalidDoubtId {
                        user_id: user.id,
                        input: raw,
                    }
                }
            }
        }
    };

    let board = leaderboard_top(pool, leaderboard_size)?;
    term.say(&format!(
        "\n🏆 Leaderboard (Top {} Users):",
        leaderboard_limit(leaderboard_size)
    ))?;
    for entry in &board {
        term.say(&format_entry(entry))?;
    }
    term.output.flush()?;

    Ok(outcome)
}

fn format_entry(entry: &LeaderboardEntryDto) -> String {
    format!(
        "{}. {} | Points: {} | Streak: {} 🔥",
        entry.rank, entry.name, entry.points, entry.streak
    )
}
