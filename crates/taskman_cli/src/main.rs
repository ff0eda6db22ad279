use clap::Parser;
use clap::error::ErrorKind;
use tabled::{Table, Tabled};
use taskman_cli::cli::{Cli, Command, PrefsCommand, SwitchArg};
use taskman_core::error::AppError;
use taskman_core::model::{Task, TaskStatus};
use taskman_core::ops::{self, NewTask, TaskPatch};
use taskman_core::prefs::{self, Palette, Preferences};
use taskman_core::storage::kv::FileKvStore;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            due: task.due_date.clone(),
            status: task.status.label().to_string(),
            priority: task.priority.label().to_string(),
        }
    }
}

fn print_tasks_plain(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks available");
        return;
    }
    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from_task).collect();
    println!("{}", Table::new(rows));
}

fn print_tasks_json(tasks: &[Task]) {
    println!("{}", serde_json::json!(tasks));
}

fn print_task_json(task: &Task) {
    println!("{}", serde_json::json!(task));
}

fn print_missing(id: &str, json: bool) {
    if json {
        println!("null");
    } else {
        println!("No task with id {id}");
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_data(message)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Add {
            title,
            description,
            due,
            priority,
        } => {
            let title = title.unwrap_or_default();
            let task = ops::add_task(NewTask {
                title,
                description,
                due_date: due,
                priority: priority.into(),
            })?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::List { status, sort } => {
            let tasks = ops::list_tasks(status.into(), sort.into())?;
            if cli.json {
                print_tasks_json(&tasks);
            } else {
                print_tasks_plain(&tasks);
            }
        }
        Command::Today => {
            let store = FileKvStore::from_env()?;
            let summary = ops::home_summary_with(&store);
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "displayName": summary.display_name,
                        "total": summary.total,
                        "dueToday": summary.due_today,
                        "highPriority": summary.high_priority,
                    })
                );
            } else {
                let loaded = prefs::load(&store);
                let palette = Palette::for_prefs(loaded.theme, &loaded.accent);
                let name = summary.display_name.as_deref().unwrap_or("User");
                println!("{}", palette.accentize(&format!("Hi, {name}")));
                println!("You have {} targets", summary.total);
                println!();
                println!("Today's Tasks");
                if summary.due_today.is_empty() {
                    println!("{}", palette.mutedize("(none)"));
                } else {
                    print_tasks_plain(&summary.due_today);
                }
                println!();
                println!("High Priority Tasks");
                if summary.high_priority.is_empty() {
                    println!("{}", palette.mutedize("(none)"));
                } else {
                    print_tasks_plain(&summary.high_priority);
                }
            }
        }
        Command::Day { date, status } => {
            let day = ops::tasks_for_date(date.as_deref(), status.into())?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "date": day.date_key, "tasks": day.tasks })
                );
            } else if day.tasks.is_empty() {
                println!("No tasks for {}", day.date_key);
            } else {
                println!("Tasks for {}", day.date_key);
                print_tasks_plain(&day.tasks);
            }
        }
        Command::Calendar => {
            let marks = ops::calendar_markers()?;
            if cli.json {
                println!("{}", serde_json::json!(marks));
            } else if marks.is_empty() {
                println!("No due dates marked");
            } else {
                for (date, markers) in &marks {
                    println!("{date}  {} task(s)", markers.len());
                }
            }
        }
        Command::Show { id } => match ops::get_task(&id)? {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else {
                    let description = if task.description.is_empty() {
                        "No description"
                    } else {
                        task.description.as_str()
                    };
                    println!("Title:       {}", task.title);
                    println!("Description: {description}");
                    println!("Status:      {}", task.status.label());
                    println!("Due:         {}", task.due_date);
                    println!("Priority:    {}", task.priority.label());
                }
            }
            None => print_missing(&id, cli.json),
        },
        Command::Edit {
            id,
            title,
            description,
            due,
            priority,
        } => {
            let patch = TaskPatch {
                title,
                description,
                due_date: due,
                status: None,
                priority: priority.map(Into::into),
            };
            match ops::update_task(&id, patch)? {
                Some(task) => {
                    if cli.json {
                        print_task_json(&task);
                    } else {
                        println!("Updated task: {} ({})", task.title, task.id);
                    }
                }
                None => print_missing(&id, cli.json),
            }
        }
        Command::Toggle { id } => match ops::toggle_status(&id)? {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else {
                    let verb = match task.status {
                        TaskStatus::Completed => "Completed",
                        TaskStatus::Pending => "Reopened",
                    };
                    println!("{verb} task: {} ({})", task.title, task.id);
                }
            }
            None => print_missing(&id, cli.json),
        },
        Command::Delete { id } => match ops::delete_task(&id)? {
            Some(task) => {
                if cli.json {
                    print_task_json(&task);
                } else {
                    println!("Deleted task: {} ({})", task.title, task.id);
                }
            }
            None => print_missing(&id, cli.json),
        },
        Command::Export { path } => {
            let payload = ops::export_json()?;
            std::fs::write(&path, payload).map_err(|err| AppError::io(err.to_string()))?;
            println!("Exported tasks to {}", path.display());
        }
        Command::Prefs { prefs: command } => run_prefs_command(command, cli.json)?,
    }

    Ok(())
}

fn run_prefs_command(command: PrefsCommand, json: bool) -> Result<(), AppError> {
    let store = FileKvStore::from_env()?;
    match command {
        PrefsCommand::Show => {
            let loaded = prefs::load(&store);
            if json {
                print_prefs_json(&loaded);
            } else {
                println!(
                    "Display name:  {}",
                    loaded.display_name.as_deref().unwrap_or("(none)")
                );
                println!(
                    "Avatar:        {}",
                    loaded.avatar_uri.as_deref().unwrap_or("(none)")
                );
                println!("Theme:         {}", loaded.theme.as_str());
                println!("Accent:        {}", loaded.accent);
                println!(
                    "Notifications: {}",
                    if loaded.notifications_enabled { "on" } else { "off" }
                );
            }
        }
        PrefsCommand::SetName { name } => {
            prefs::set_display_name(&store, &name);
            println!("Display name set to {name}");
        }
        PrefsCommand::SetAvatar { uri } => {
            prefs::set_avatar(&store, &uri);
            println!("Avatar set to {uri}");
        }
        PrefsCommand::SetTheme { theme } => {
            let theme: prefs::Theme = theme.into();
            prefs::set_theme(&store, theme);
            println!("Theme set to {}", theme.as_str());
        }
        PrefsCommand::SetAccent { color } => {
            if prefs::parse_hex_color(&color).is_none() {
                return Err(AppError::invalid_data(
                    "accent must be a hex color like #4CAF50",
                ));
            }
            prefs::set_accent(&store, &color);
            println!("Accent set to {color}");
        }
        PrefsCommand::Notifications { state } => {
            let enabled = state == SwitchArg::On;
            ops::set_notifications_enabled(enabled)?;
            println!(
                "Notifications {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }

    Ok(())
}

fn print_prefs_json(loaded: &Preferences) {
    println!(
        "{}",
        serde_json::json!({
            "displayName": loaded.display_name,
            "avatarUri": loaded.avatar_uri,
            "theme": loaded.theme.as_str(),
            "accent": loaded.accent,
            "notificationsEnabled": loaded.notifications_enabled,
        })
    );
}

fn init_logging() -> Option<flexi_logger::LoggerHandle> {
    let spec = std::env::var("TASKMAN_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| "warn".to_string());

    flexi_logger::Logger::try_with_str(spec)
        .ok()
        .and_then(|logger| logger.start().ok())
}

fn main() {
    let _logger = init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                err.exit();
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
