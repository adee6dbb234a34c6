//! Interactive terminal front end.
//!
//! # Responsibility
//! - Wire config, logging, the task store, the registry and the reminder
//!   thread together for one session.
//! - Translate stdin lines into core commands and render the results.

mod input;

use input::{parse_line, Input, USAGE};
use log::{error, info};
use prioritize_core::{
    dispatch, init_logging, lock_registry, AppConfig, Announcer, CommandOutcome,
    ReminderScheduler, SharedRegistry, SqliteTaskRepository, Task, TaskRegistry,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

/// Prints phrases where the speech engine would speak them.
struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn announce(&self, text: &str) {
        println!("[speak] {text}");
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("prioritize: {message}");
            error!("event=app_exit module=cli status=error");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let log_dir = config.log_dir.to_string_lossy();
    if let Err(err) = init_logging(config.log_level, &log_dir) {
        eprintln!("prioritize: file logging disabled: {err}");
    }

    let repo = SqliteTaskRepository::open(&config.db_path)
        .map_err(|err| format!("cannot open `{}`: {err}", config.db_path.display()))?;
    let registry = TaskRegistry::open(repo)
        .map_err(|err| format!("cannot load tasks: {err}"))?
        .into_shared();
    let announcer: Arc<dyn Announcer> = Arc::new(ConsoleAnnouncer);

    let reminders = ReminderScheduler::new(Arc::clone(&registry), Arc::clone(&announcer))
        .with_interval(config.sweep_interval)
        .start()
        .map_err(|err| format!("cannot start reminder thread: {err}"))?;
    info!("event=app_ready module=cli status=ok");

    println!("Prioritize Me {}", prioritize_core::core_version());
    render_tasks(&lock_registry(&registry).list().to_vec());
    let session = read_commands(&registry, announcer.as_ref());

    reminders.stop();
    info!("event=app_exit module=cli status=ok");
    session.map_err(|err| format!("stdin: {err}"))
}

fn read_commands(
    registry: &SharedRegistry<SqliteTaskRepository>,
    announcer: &dyn Announcer,
) -> io::Result<()> {
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        match parse_line(&line?) {
            Ok(Input::Quit) => break,
            Ok(Input::Empty) => {}
            Ok(Input::Help) => println!("{USAGE}"),
            Ok(Input::Run(command)) => {
                let outcome = {
                    let mut guard = lock_registry(registry);
                    dispatch(&mut *guard, announcer, command)
                };
                match outcome {
                    Ok(outcome) => render_outcome(&outcome),
                    Err(err) => println!("error: {err}"),
                }
            }
            Err(message) => println!("error: {message}"),
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn render_outcome(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Created(task) => println!("created #{}", task.id),
        CommandOutcome::Completed(task) => println!("completed #{}", task.id),
        CommandOutcome::Deleted(task) => println!("deleted #{}", task.id),
        CommandOutcome::Listed(tasks) => render_tasks(tasks),
    }
}

fn render_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks today.");
        return;
    }
    for task in tasks {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        println!(
            "{mark} #{} {} ({} - {}) [{}]",
            task.id, task.name, task.start, task.end, task.priority
        );
        println!("      Category: {} | Date: {}", task.category, task.date);
        if !task.desc.is_empty() {
            println!("      {}", task.desc);
        }
    }
}
