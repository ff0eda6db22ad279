use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskman_core::model::Priority;
use taskman_core::prefs::Theme;
use taskman_core::view::{SortKey, StatusFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskman add "Buy milk" --due "01-06-2025 09:30" --priority high
    Add {
        title: Option<String>,
        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Due date, DD-MM-YYYY with an optional HH:MM
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
    },
    /// List tasks
    ///
    /// Example: taskman list --status pending --sort due-date
    List {
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        #[arg(long, value_enum, default_value_t = SortArg::None)]
        sort: SortArg,
    },
    /// Home summary: greeting, totals, today's tasks, high-priority backlog
    Today,
    /// Timeline for a single day
    ///
    /// Example: taskman day 01-06-2025 --status completed
    Day {
        date: Option<String>,
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
    },
    /// Calendar markers grouped by due date
    Calendar,
    /// Show details of a task
    ///
    /// Example: taskman show 1748771234567
    Show {
        id: String,
    },
    /// Edit a task's fields
    ///
    /// Example: taskman edit 1748771234567 --title "Buy oat milk"
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,
    },
    /// Flip a task between pending and completed
    Toggle {
        id: String,
    },
    /// Delete a task
    Delete {
        id: String,
    },
    /// Write the task collection to a JSON file
    ///
    /// Example: taskman export backup.json
    Export {
        #[arg(default_value = "tasks.json")]
        path: PathBuf,
    },
    /// Read or change user preferences
    Prefs {
        #[command(subcommand)]
        prefs: PrefsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Print all preferences
    Show,
    /// Set the display name
    SetName { name: String },
    /// Set the avatar image URI
    SetAvatar { uri: String },
    /// Switch between the light and dark theme
    SetTheme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
    /// Set the accent color (hex, e.g. #4CAF50)
    SetAccent { color: String },
    /// Turn reminder notifications on or off
    Notifications {
        #[arg(value_enum)]
        state: SwitchArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    All,
    Pending,
    Completed,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => Self::All,
            StatusArg::Pending => Self::Pending,
            StatusArg::Completed => Self::Completed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    None,
    Title,
    DueDate,
    Priority,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => Self::None,
            SortArg::Title => Self::Title,
            SortArg::DueDate => Self::DueDate,
            SortArg::Priority => Self::Priority,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchArg {
    On,
    Off,
}
