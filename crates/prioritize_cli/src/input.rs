//! Line parser for the interactive session.
//!
//! # Grammar
//! - `add <category> <priority> <YYYY-MM-DD> <HH:MM> <HH:MM> <name...> [| description]`
//! - `done <id>`, `rm <id>`
//! - `ls`, `sort <priority label>`
//! - `help`, `quit`
//!
//! Priorities accept `high|medium|low|none` in any case.

use chrono::{NaiveDate, NaiveTime};
use prioritize_core::model::task::{DATE_FORMAT, TIME_FORMAT};
use prioritize_core::{Category, Command, Priority, TaskDraft, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Run(Command),
    Help,
    Quit,
    Empty,
}

pub const USAGE: &str = "commands:
  add <category> <priority> <YYYY-MM-DD> <HH:MM> <HH:MM> <name...> [| description]
  done <id>
  rm <id>
  ls
  sort <High|Medium|Low|No Priority>
  help
  quit";

pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(Input::Empty),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        "ls" | "list" => Ok(Input::Run(Command::List)),
        "sort" => Ok(Input::Run(Command::Sort(rest.to_string()))),
        "done" => parse_id(rest).map(|id| Input::Run(Command::Complete(id))),
        "rm" | "delete" => parse_id(rest).map(|id| Input::Run(Command::Delete(id))),
        "add" => parse_add(rest).map(|draft| Input::Run(Command::Create(draft))),
        other => Err(format!("unknown command `{other}`; try `help`")),
    }
}

fn parse_id(value: &str) -> Result<TaskId, String> {
    value
        .parse::<TaskId>()
        .map_err(|_| format!("expected a task id, got `{value}`"))
}

fn parse_add(rest: &str) -> Result<TaskDraft, String> {
    let (head, desc) = match rest.split_once('|') {
        Some((head, desc)) => (head, desc.trim()),
        None => (rest, ""),
    };

    let mut parts = head.split_whitespace();
    let mut next = |field: &str| {
        parts
            .next()
            .ok_or_else(|| format!("missing {field}; try `help`"))
    };

    // An unknown category is passed on as `None` so the core reports it.
    let category = Category::parse(next("category")?);
    let priority = parse_priority(next("priority")?)?;
    let date = next("date")?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| format!("invalid date `{date}`, expected YYYY-MM-DD"))?;
    let start = parse_time(next("start time")?)?;
    let end = parse_time(next("end time")?)?;
    let name = parts.collect::<Vec<_>>().join(" ");

    Ok(TaskDraft::scheduled(name, category, date, start, end)
        .with_priority(priority)
        .with_desc(desc))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    match value.to_ascii_lowercase().as_str() {
        "high" => Ok(Priority::High),
        "medium" => Ok(Priority::Medium),
        "low" => Ok(Priority::Low),
        "none" | "no-priority" => Ok(Priority::NoPriority),
        _ => Err(format!(
            "invalid priority `{value}`, expected high|medium|low|none"
        )),
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| format!("invalid time `{value}`, expected HH:MM"))
}
