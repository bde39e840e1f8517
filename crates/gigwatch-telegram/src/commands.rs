// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bot command surface: registration, skill management, run/stop.
//!
//! Command handling is split in two so it stays testable: the teloxide
//! dispatcher glue ([`spawn_command_bot`] / `answer`) and the pure-ish
//! [`dispatch_command`] that takes a database and returns the reply text.
//! A storage failure answers with a plain "database unreachable" message;
//! the tick loop is unaffected.

use gigwatch_core::normalize_slug;
use gigwatch_storage::queries::{flags, skills, users};
use gigwatch_storage::{Database, RegisterOutcome};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

const DB_UNREACHABLE: &str = "The database is unreachable right now. Try again in a few minutes.";

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "register to receive matching postings")]
    Register,
    #[command(description = "list your recorded skills")]
    Skills,
    #[command(description = "add a skill: /add <skill>")]
    Add(String),
    #[command(description = "remove a skill: /remove <skill>")]
    Remove(String),
    #[command(description = "clear all your skills")]
    Clear,
    #[command(description = "enable the job-board scraper")]
    Run,
    #[command(description = "disable the job-board scraper")]
    Stop,
    #[command(description = "show this help")]
    Help,
}

/// Spawn the long-polling command dispatcher on its own task.
pub fn spawn_command_bot(bot: Bot, db: Database) -> tokio::task::JoinHandle<()> {
    info!("starting Telegram command dispatcher");
    tokio::spawn(async move {
        let handler = Update::filter_message()
            .filter_command::<Command>()
            .endpoint(answer);
        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![db])
            .default_handler(|_| async {}) // Silently ignore non-command updates
            .build()
            .dispatch()
            .await;
    })
}

async fn answer(bot: Bot, msg: Message, cmd: Command, db: Database) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;
    let username = msg
        .from
        .as_ref()
        .and_then(|user| user.username.clone())
        .unwrap_or_else(|| "unnamed".to_string());

    let reply = dispatch_command(&db, chat_id, &username, cmd).await;
    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
        warn!(chat_id, error = %e, "failed to answer command");
    }
    Ok(())
}

/// Handle one command against the store and produce the reply text.
pub async fn dispatch_command(
    db: &Database,
    chat_id: i64,
    username: &str,
    cmd: Command,
) -> String {
    match cmd {
        Command::Register => match users::register(db, chat_id, username).await {
            Ok(RegisterOutcome::Created) => {
                "Registered. Add skills with /add <skill> to start receiving matches.".to_string()
            }
            Ok(RegisterOutcome::Reactivated) => {
                "Welcome back -- your account is active again.".to_string()
            }
            Ok(RegisterOutcome::AlreadyActive) => "You are already registered.".to_string(),
            Err(e) => {
                warn!(chat_id, error = %e, "register failed");
                DB_UNREACHABLE.to_string()
            }
        },

        Command::Skills => match skills::skills_for(db, chat_id).await {
            Ok(list) => skills_summary(&list),
            Err(_) => DB_UNREACHABLE.to_string(),
        },

        Command::Add(skill) => {
            if skill.trim().is_empty() {
                return "Tell me which skill to add: /add <skill>.".to_string();
            }
            let slug = normalize_slug(&skill);
            let note = match skills::has_skill(db, chat_id, &skill).await {
                Ok(true) => format!("Skill already recorded: {slug}."),
                Ok(false) => match skills::add_skill(db, chat_id, &skill).await {
                    Ok(true) => format!("Skill added: {slug}."),
                    Ok(false) => return "Register first with /register.".to_string(),
                    Err(_) => return DB_UNREACHABLE.to_string(),
                },
                Err(_) => return DB_UNREACHABLE.to_string(),
            };
            with_skills_status(db, chat_id, note).await
        }

        Command::Remove(skill) => {
            if skill.trim().is_empty() {
                return "Tell me which skill to remove: /remove <skill>.".to_string();
            }
            let slug = normalize_slug(&skill);
            let note = match skills::remove_skill(db, chat_id, &skill).await {
                Ok(true) => format!("Skill removed: {slug}."),
                Ok(false) => "That skill was not recorded.".to_string(),
                Err(_) => return DB_UNREACHABLE.to_string(),
            };
            with_skills_status(db, chat_id, note).await
        }

        Command::Clear => {
            let note = match skills::clear_skills(db, chat_id).await {
                Ok(0) => "You had no skills to clear.".to_string(),
                Ok(n) => format!("Cleared {n} skills."),
                Err(_) => return DB_UNREACHABLE.to_string(),
            };
            with_skills_status(db, chat_id, note).await
        }

        Command::Run => match flags::set_scraper_enabled(db, true).await {
            Ok(()) => "Monitoring enabled.".to_string(),
            Err(_) => DB_UNREACHABLE.to_string(),
        },

        Command::Stop => match flags::set_scraper_enabled(db, false).await {
            Ok(()) => "Monitoring stopped.".to_string(),
            Err(_) => DB_UNREACHABLE.to_string(),
        },

        Command::Help => Command::descriptions().to_string(),
    }
}

fn skills_summary(list: &[String]) -> String {
    if list.is_empty() {
        "You have no recorded skills.\n\nOptions:\n/add\n/remove\n/clear".to_string()
    } else {
        let lines: Vec<String> = list.iter().map(|s| format!("- {s}")).collect();
        format!(
            "Your current skills:\n{}\n\nOptions:\n/add\n/remove\n/clear",
            lines.join("\n")
        )
    }
}

async fn with_skills_status(db: &Database, chat_id: i64, note: String) -> String {
    match skills::skills_for(db, chat_id).await {
        Ok(list) => format!("{note}\n\n{}", skills_summary(&list)),
        Err(_) => note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigwatch_core::{FlagSource, FlagState};
    use gigwatch_storage::SqliteFlags;
    use tempfile::tempdir;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[test]
    fn commands_parse_with_arguments() {
        let cmd = Command::parse("/add data science", "gigwatch_bot").unwrap();
        assert_eq!(cmd, Command::Add("data science".to_string()));

        let cmd = Command::parse("/register", "gigwatch_bot").unwrap();
        assert_eq!(cmd, Command::Register);
    }

    #[tokio::test]
    async fn register_then_register_again() {
        let (db, _dir) = test_db().await;

        let first = dispatch_command(&db, 42, "alex", Command::Register).await;
        assert!(first.contains("Registered"));

        let second = dispatch_command(&db, 42, "alex", Command::Register).await;
        assert!(second.contains("already registered"));
    }

    #[tokio::test]
    async fn add_requires_registration() {
        let (db, _dir) = test_db().await;
        let reply = dispatch_command(&db, 42, "alex", Command::Add("python".into())).await;
        assert!(reply.contains("/register"));
    }

    #[tokio::test]
    async fn add_remove_clear_round_trip() {
        let (db, _dir) = test_db().await;
        dispatch_command(&db, 42, "alex", Command::Register).await;

        let added = dispatch_command(&db, 42, "alex", Command::Add("Data Science".into())).await;
        assert!(added.contains("Skill added: data-science."));
        assert!(added.contains("- data-science"));

        let again = dispatch_command(&db, 42, "alex", Command::Add("data science".into())).await;
        assert!(again.contains("already recorded"));

        let removed =
            dispatch_command(&db, 42, "alex", Command::Remove("data science".into())).await;
        assert!(removed.contains("Skill removed: data-science."));

        let missing = dispatch_command(&db, 42, "alex", Command::Remove("mysql".into())).await;
        assert!(missing.contains("not recorded"));

        dispatch_command(&db, 42, "alex", Command::Add("python".into())).await;
        let cleared = dispatch_command(&db, 42, "alex", Command::Clear).await;
        assert!(cleared.contains("Cleared 1 skills."));
    }

    #[tokio::test]
    async fn blank_skill_arguments_prompt_for_usage() {
        let (db, _dir) = test_db().await;
        let reply = dispatch_command(&db, 42, "alex", Command::Add("  ".into())).await;
        assert!(reply.contains("/add <skill>"));
        let reply = dispatch_command(&db, 42, "alex", Command::Remove(String::new())).await;
        assert!(reply.contains("/remove <skill>"));
    }

    #[tokio::test]
    async fn run_and_stop_toggle_the_flag() {
        let (db, _dir) = test_db().await;

        let stopped = dispatch_command(&db, 42, "alex", Command::Stop).await;
        assert!(stopped.contains("stopped"));
        let flags = SqliteFlags::new(db.clone());
        assert_eq!(flags.scraper_state().await, FlagState::Disabled);

        let started = dispatch_command(&db, 42, "alex", Command::Run).await;
        assert!(started.contains("enabled"));
        assert_eq!(flags.scraper_state().await, FlagState::Enabled);
    }

    #[tokio::test]
    async fn help_lists_every_command() {
        let (db, _dir) = test_db().await;
        let help = dispatch_command(&db, 42, "alex", Command::Help).await;
        for name in ["/register", "/skills", "/add", "/remove", "/clear", "/run", "/stop"] {
            assert!(help.contains(name), "help should mention {name}");
        }
    }
}
