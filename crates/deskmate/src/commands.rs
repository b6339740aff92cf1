//! Subcommands shared by one-shot invocations and the interactive shell.

use anyhow::Context;
use clap::{Parser, Subcommand};
use deskmate_core::{Assistant, ReminderEntry, format_time};
use deskmate_protocol::{ClientDraft, ClientRecord, TaskRecord, TaskStatus};

/// Operations on tasks, clients, the credential and the chat gateway.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task from free text, e.g. `add Client call at 3pm in conference room`
    Add {
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            num_args = 1..
        )]
        text: Vec<String>,
    },
    /// Show the schedule in time order
    List,
    /// Show the three-column status board
    Board,
    /// Move a task to another column (todo, in-progress, done)
    Status {
        /// Task id or a unique prefix of it
        id: String,
        status: TaskStatus,
    },
    /// Manage client records
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },
    /// Manage the chat API key
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
    /// Ask the chat assistant about your tasks and clients
    Ask {
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            num_args = 1..
        )]
        query: Vec<String>,
    },
    /// List every task with time, location and category
    Details,
    /// Show the first timed task
    Next,
    /// Show the reminder state of every task
    Reminders,
    /// Arm reminders and wait until they fire or Ctrl-C
    Watch,
    /// Interactive session
    Shell,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Save a client record
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        contact: String,
        #[arg(long, default_value = "")]
        file_name: String,
        #[arg(long, default_value = "")]
        file_details: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List saved clients
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Save the API key used for chat requests
    Set { key: String },
    /// Remove the saved API key
    Clear,
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

/// Run a command to completion and return the text to print.
///
/// `watch` and `shell` are session commands handled by the caller.
pub async fn execute(assistant: &mut Assistant, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Add { text } => {
            let task = assistant
                .add_task(&text.join(" "))
                .context("failed to add task")?;
            Assistant::confirmation(task)
        }
        Command::List => render_schedule(&assistant.sorted_tasks(), assistant.reminders()),
        Command::Board => render_board(assistant),
        Command::Status { id, status } => {
            let task = assistant
                .set_status(&id, status)
                .context("failed to update task status")?;
            format!("Moved '{}' to {}.", task.title, status.heading())
        }
        Command::Client { command } => match command {
            ClientCommand::Add {
                name,
                contact,
                file_name,
                file_details,
                notes,
            } => {
                let client = assistant
                    .add_client(ClientDraft {
                        name,
                        contact,
                        file_name,
                        file_details,
                        notes,
                    })
                    .context("failed to save client")?;
                format!("Client saved: {}.", client.name)
            }
            ClientCommand::List => render_clients(assistant.clients()),
        },
        Command::Key { command } => match command {
            KeyCommand::Set { key } => {
                assistant
                    .save_credential(&key)
                    .context("failed to save API key")?;
                "API key saved.".to_string()
            }
            KeyCommand::Clear => {
                if assistant.clear_credential().context("failed to clear API key")? {
                    "API key removed.".to_string()
                } else {
                    "No API key was saved.".to_string()
                }
            }
        },
        Command::Ask { query } => assistant
            .answer(&query.join(" "))
            .await
            .unwrap_or_else(|| "Nothing to ask.".to_string()),
        Command::Details => assistant.details(),
        Command::Next => assistant.next_summary(),
        Command::Reminders => render_reminders(assistant.reminders()),
        Command::Watch | Command::Shell => "Already in an interactive session.".to_string(),
    };
    Ok(output)
}

fn short_id(task: &TaskRecord) -> String {
    task.id.to_string().chars().take(8).collect()
}

/// Schedule listing with the reminder annotation of each task.
pub fn render_schedule(tasks: &[TaskRecord], reminders: &[ReminderEntry]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.".to_string();
    }
    let mut lines = Vec::with_capacity(tasks.len());
    for task in tasks {
        let reminder = reminders
            .iter()
            .find(|entry| entry.task_id == task.id)
            .map(ReminderEntry::display_line)
            .unwrap_or_default();
        lines.push(format!(
            "[{}] {:>8}  {} | {} | {} | {} | {}",
            short_id(task),
            format_time(task.time),
            task.title,
            task.location,
            task.category,
            task.status,
            reminder
        ));
    }
    lines.join("\n")
}

fn render_board(assistant: &Assistant) -> String {
    let board = assistant.board();
    let mut lines = Vec::new();
    for status in TaskStatus::ALL {
        let column = board.column(status);
        lines.push(format!("{} ({})", status.heading(), column.len()));
        if column.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for task in column {
            lines.push(format!(
                "  [{}] {} ({})",
                short_id(task),
                task.title,
                format_time(task.time)
            ));
        }
    }
    lines.join("\n")
}

fn render_clients(clients: &[ClientRecord]) -> String {
    if clients.is_empty() {
        return "No clients yet.".to_string();
    }
    clients
        .iter()
        .map(|client| {
            format!(
                "{} | {} | {} | {} | {}",
                client.name, client.contact, client.file_name, client.file_details, client.notes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_reminders(reminders: &[ReminderEntry]) -> String {
    if reminders.is_empty() {
        return "No tasks yet.".to_string();
    }
    reminders
        .iter()
        .map(|entry| {
            format!(
                "{:>8}  {}: {}",
                format_time(entry.time),
                entry.title,
                entry.display_line()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
